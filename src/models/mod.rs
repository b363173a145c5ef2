use serde::{Deserialize, Deserializer};

/// Full export of the to-do service, as returned by `GET /api/export`.
#[derive(Debug, Deserialize, Clone)]
pub struct Snapshot {
    pub exported_at: String,
    pub stats: Stats,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub todos: Vec<Todo>,
}

impl Snapshot {
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }

    /// `exported_at` cut to the second, with the date/time separator replaced by a space.
    pub fn updated_at(&self) -> String {
        self.exported_at
            .chars()
            .take(19)
            .collect::<String>()
            .replace('T', " ")
    }
}

/// Counts reported by the service. Trusted as-is, never recomputed from `todos`.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub total: u64,
    pub pending: u64,
    pub completed: u64,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: u64,
    pub name: String,
    pub icon: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Todo {
    pub title: String,
    #[serde(deserialize_with = "deserialize_flag")]
    pub completed: bool,
    #[serde(default)]
    pub category_id: Option<u64>, // 0 for uncategorized
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub reminder_at: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Todo {
    /// Category the todo is filed under; `None` when uncategorized.
    pub fn category(&self) -> Option<u64> {
        self.category_id.filter(|id| *id != 0)
    }

    pub fn due_date(&self) -> Option<&str> {
        non_empty(&self.due_date)
    }

    pub fn has_reminder(&self) -> bool {
        non_empty(&self.reminder_at).is_some()
    }

    pub fn notes(&self) -> Option<&str> {
        non_empty(&self.notes)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

// SQLite rows carry booleans as 0/1.
#[derive(Deserialize)]
#[serde(untagged)]
enum Flag {
    Bool(bool),
    Int(i64),
}

fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(value) => value,
        Flag::Int(value) => value != 0,
    })
}
