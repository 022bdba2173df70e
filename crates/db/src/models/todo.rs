//! Todo entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use todo_core::datetime::{deserialize_nullable as nullable_timestamp, deserialize_optional};
use todo_core::todo::{deserialize_lenient_bool, deserialize_nullable, DeadlineWindow};
use todo_core::types::{DbId, Timestamp};

/// A todo row from the `todos` table.
///
/// Serializes with the public wire keys in column order; unset timestamps
/// render as `null`.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Todo {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub deadline_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new todo.
///
/// `title` is optional at the wire level so a missing title reaches the
/// repository and is rejected there as a validation error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTodo {
    pub title: Option<String>,
    pub description: Option<String>,
    /// Defaults to `false` if omitted or unrecognizable.
    #[serde(default, deserialize_with = "deserialize_lenient_bool")]
    pub completed: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_optional")]
    pub deadline_at: Option<Timestamp>,
}

/// DTO for partially updating a todo. All fields are optional.
///
/// `description` and `deadline_at` use `Option<Option<_>>` so an explicit
/// `null` clears the value while a missing key leaves it untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTodo {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub description: Option<Option<String>>,
    /// An unrecognizable value is ignored rather than applied.
    #[serde(default, deserialize_with = "deserialize_lenient_bool")]
    pub completed: Option<bool>,
    #[serde(default, deserialize_with = "nullable_timestamp")]
    pub deadline_at: Option<Option<Timestamp>>,
}

/// Conjunction of list predicates. The default matches every todo.
#[derive(Debug, Clone, Copy, Default)]
pub struct TodoFilter {
    pub completed: Option<bool>,
    /// Only todos whose non-null `deadline_at` lies inside the window.
    pub window: Option<DeadlineWindow>,
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    #[test]
    fn todo_serializes_all_wire_keys() {
        let at = Utc.with_ymd_and_hms(2023, 2, 20, 0, 0, 0).unwrap();
        let todo = Todo {
            id: 1,
            title: "Watch lecture".to_string(),
            description: None,
            completed: false,
            deadline_at: None,
            created_at: at,
            updated_at: at,
        };
        let json = serde_json::to_value(&todo).unwrap();
        let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        for key in [
            "id",
            "title",
            "description",
            "completed",
            "deadline_at",
            "created_at",
            "updated_at",
        ] {
            assert!(keys.contains(&key), "missing key {key}");
        }
        assert!(json["deadline_at"].is_null());
        assert!(json["description"].is_null());
        assert_eq!(json["created_at"], "2023-02-20T00:00:00Z");
    }

    #[test]
    fn create_todo_defaults() {
        let input: CreateTodo = serde_json::from_str(r#"{"title":"Buy milk"}"#).unwrap();
        assert_eq!(input.title.as_deref(), Some("Buy milk"));
        assert!(input.description.is_none());
        assert!(input.completed.is_none());
        assert!(input.deadline_at.is_none());
    }

    #[test]
    fn create_todo_parses_naive_deadline() {
        let input: CreateTodo =
            serde_json::from_str(r#"{"title":"t","deadline_at":"2023-02-27T00:00:00"}"#).unwrap();
        assert_eq!(
            input.deadline_at,
            Some(Utc.with_ymd_and_hms(2023, 2, 27, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn create_todo_tolerates_missing_title() {
        let input: CreateTodo = serde_json::from_str(r#"{"completed":true}"#).unwrap();
        assert!(input.title.is_none());
        assert_eq!(input.completed, Some(true));
    }

    #[test]
    fn update_todo_all_fields_optional() {
        let input: UpdateTodo = serde_json::from_str("{}").unwrap();
        assert!(input.title.is_none());
        assert!(input.description.is_none());
        assert!(input.completed.is_none());
        assert!(input.deadline_at.is_none());
    }

    #[test]
    fn update_todo_explicit_nulls_clear() {
        let input: UpdateTodo =
            serde_json::from_str(r#"{"description":null,"deadline_at":null}"#).unwrap();
        assert_eq!(input.description, Some(None));
        assert_eq!(input.deadline_at, Some(None));
    }

    #[test]
    fn update_todo_string_completed() {
        let input: UpdateTodo = serde_json::from_str(r#"{"completed":"true"}"#).unwrap();
        assert_eq!(input.completed, Some(true));
        let input: UpdateTodo = serde_json::from_str(r#"{"completed":"nope"}"#).unwrap();
        assert_eq!(input.completed, None);
    }
}
