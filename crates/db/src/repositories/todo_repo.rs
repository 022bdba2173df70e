//! Repository for the `todos` table.

use chrono::Utc;
use sqlx::SqlitePool;
use todo_core::todo::validate_title;
use todo_core::types::DbId;

use crate::error::DbError;
use crate::models::todo::{CreateTodo, Todo, TodoFilter, UpdateTodo};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, completed, deadline_at, created_at, updated_at";

/// Provides CRUD operations for todos.
pub struct TodoRepo;

impl TodoRepo {
    /// Insert a new todo, returning the created row.
    ///
    /// Fails with a validation error if the title is missing or blank.
    /// `completed` defaults to `false`; `created_at` and `updated_at` are
    /// set to the same instant.
    pub async fn create(pool: &SqlitePool, input: &CreateTodo) -> Result<Todo, DbError> {
        let title = validate_title(input.title.as_deref())?;
        let now = Utc::now();

        let query = format!(
            "INSERT INTO todos (title, description, completed, deadline_at, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        let todo = sqlx::query_as::<_, Todo>(&query)
            .bind(title)
            .bind(&input.description)
            .bind(input.completed.unwrap_or(false))
            .bind(input.deadline_at)
            .bind(now)
            .bind(now)
            .fetch_one(pool)
            .await?;
        Ok(todo)
    }

    /// Find a todo by its ID.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Todo>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM todos WHERE id = $1");
        sqlx::query_as::<_, Todo>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List todos matching every predicate in `filter`, in insertion order.
    ///
    /// The window predicate never matches a todo without a deadline.
    pub async fn list(pool: &SqlitePool, filter: &TodoFilter) -> Result<Vec<Todo>, sqlx::Error> {
        if filter.window.is_some_and(|w| w.is_empty()) {
            return Ok(Vec::new());
        }
        let (window_from, window_to) = filter.window.map(|w| (w.from, w.to)).unzip();
        tracing::debug!(
            completed = ?filter.completed,
            window_from = ?window_from,
            window_to = ?window_to,
            "Listing todos"
        );

        let query = format!(
            "SELECT {COLUMNS} FROM todos
             WHERE ($1 IS NULL OR completed = $1)
               AND ($2 IS NULL OR (deadline_at IS NOT NULL
                                   AND deadline_at >= $2
                                   AND deadline_at <= $3))
             ORDER BY id"
        );
        sqlx::query_as::<_, Todo>(&query)
            .bind(filter.completed)
            .bind(window_from)
            .bind(window_to)
            .fetch_all(pool)
            .await
    }

    /// Update a todo. Only fields present in `input` are applied.
    ///
    /// A present `title` must not be blank. `description` and `deadline_at`
    /// are cleared when their inner value is `None`. `updated_at` is
    /// refreshed and never moves backwards.
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        input: &UpdateTodo,
    ) -> Result<Option<Todo>, DbError> {
        if input.title.is_some() {
            validate_title(input.title.as_deref())?;
        }
        let description_provided = input.description.is_some();
        let description_value = input.description.as_ref().and_then(|v| v.as_deref());
        let deadline_provided = input.deadline_at.is_some();
        let deadline_value = input.deadline_at.flatten();

        let query = format!(
            "UPDATE todos SET
                title       = COALESCE($2, title),
                description = CASE WHEN $3 THEN $4 ELSE description END,
                completed   = COALESCE($5, completed),
                deadline_at = CASE WHEN $6 THEN $7 ELSE deadline_at END,
                updated_at  = MAX($8, updated_at)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let todo = sqlx::query_as::<_, Todo>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(description_provided)
            .bind(description_value)
            .bind(input.completed)
            .bind(deadline_provided)
            .bind(deadline_value)
            .bind(Utc::now())
            .fetch_optional(pool)
            .await?;
        Ok(todo)
    }

    /// Permanently delete a todo by ID, returning the row as it was.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<Option<Todo>, sqlx::Error> {
        let query = format!("DELETE FROM todos WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Todo>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
