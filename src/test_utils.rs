use crate::models::{Category, Snapshot, Stats, Todo};
use crate::publisher::{Memory, MemoryStore, PublishError};
use std::cell::RefCell;
use std::rc::Rc;

/// Builds a snapshot whose stats match the given todos.
pub fn snapshot(categories: Vec<Category>, todos: Vec<Todo>) -> Snapshot {
    let completed = todos.iter().filter(|t| t.completed).count() as u64;
    let total = todos.len() as u64;
    Snapshot {
        exported_at: "2024-03-01T10:15:30.123Z".to_string(),
        stats: Stats {
            total,
            pending: total - completed,
            completed,
        },
        categories,
        todos,
    }
}

pub fn category(id: u64, name: &str, icon: &str) -> Category {
    Category {
        id,
        name: name.to_string(),
        icon: icon.to_string(),
    }
}

pub fn pending(title: &str, category_id: Option<u64>) -> Todo {
    Todo {
        title: title.to_string(),
        completed: false,
        category_id,
        ..Default::default()
    }
}

pub fn done(title: &str) -> Todo {
    Todo {
        title: title.to_string(),
        completed: true,
        ..Default::default()
    }
}

/// Keeps every memory it is asked to store.
#[derive(Clone, Default)]
pub struct RecordingStore {
    stored: Rc<RefCell<Vec<Memory>>>,
}

impl RecordingStore {
    pub fn stored(&self) -> Vec<Memory> {
        self.stored.borrow().clone()
    }
}

impl MemoryStore for RecordingStore {
    fn store_memory(&self, memory: &Memory) -> Result<(), PublishError> {
        self.stored.borrow_mut().push(memory.clone());
        Ok(())
    }
}

pub struct FailingStore;

impl MemoryStore for FailingStore {
    fn store_memory(&self, _memory: &Memory) -> Result<(), PublishError> {
        Err(PublishError::Io(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "memory store unavailable",
        )))
    }
}
