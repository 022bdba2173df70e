//! Query parameter types for API handlers.

/// Query parameters for `GET /todos` (`?completed=&window=`).
///
/// Both are kept as raw strings: `completed` must reject unparsable values
/// with a 400 while `window` silently ignores them, which a typed extractor
/// cannot express. A repeated key keeps its first value.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct TodoListParams {
    pub completed: Option<String>,
    pub window: Option<String>,
}

impl TodoListParams {
    /// Build from decoded query pairs, as extracted by
    /// `Query<Vec<(String, String)>>`. Unknown keys are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "completed" => &mut params.completed,
                "window" => &mut params.window,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        params
    }
}
