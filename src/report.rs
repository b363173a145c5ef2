//! Renders an export snapshot as a markdown memory note.

use crate::models::{Category, Snapshot, Todo};
use std::collections::HashMap;

pub const UNKNOWN_CATEGORY_NAME: &str = "未知";
pub const UNKNOWN_CATEGORY_ICON: &str = "📋";
pub const RECENTLY_COMPLETED_LIMIT: usize = 5;

pub struct ReportFormatter {
    title: String,
}

impl Default for ReportFormatter {
    fn default() -> Self {
        Self::new("待办事项")
    }
}

impl ReportFormatter {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    /// `None` only when there is no snapshot; a present snapshot always yields at least the header.
    pub fn format(&self, snapshot: Option<&Snapshot>) -> Option<String> {
        snapshot.map(|s| self.render(s))
    }

    pub fn render(&self, snapshot: &Snapshot) -> String {
        let mut lines = vec![
            format!("# {}", self.title),
            format!("更新时间: {}", snapshot.updated_at()),
            String::new(),
            "## 统计".to_string(),
            format!("- 总数: {}", snapshot.stats.total),
            format!("- 待完成: {}", snapshot.stats.pending),
            format!("- 已完成: {}", snapshot.stats.completed),
            String::new(),
        ];

        let categories: HashMap<u64, &Category> =
            snapshot.categories.iter().map(|c| (c.id, c)).collect();
        let groups = PendingGroups::partition(&snapshot.todos);

        for (category_id, todos) in &groups.by_category {
            let (icon, name) = match categories.get(category_id) {
                Some(category) => (category.icon.as_str(), category.name.as_str()),
                None => (UNKNOWN_CATEGORY_ICON, UNKNOWN_CATEGORY_NAME),
            };
            lines.push(format!("## {icon} {name}"));
            for todo in todos {
                let reminder = if todo.has_reminder() { " 🔔" } else { "" };
                lines.push(format!("- [ ] {}{}{}", todo.title, due(todo), reminder));
                if let Some(notes) = todo.notes() {
                    lines.push(format!("  - 备注: {notes}"));
                }
            }
            lines.push(String::new());
        }

        // Uncategorized items only carry the due date.
        if !groups.uncategorized.is_empty() {
            lines.push("## 📋 未分类".to_string());
            for todo in &groups.uncategorized {
                lines.push(format!("- [ ] {}{}", todo.title, due(todo)));
            }
            lines.push(String::new());
        }

        let completed: Vec<&Todo> = snapshot
            .todos
            .iter()
            .filter(|t| t.completed)
            .take(RECENTLY_COMPLETED_LIMIT)
            .collect();
        if !completed.is_empty() {
            lines.push("## ✅ 最近完成".to_string());
            for todo in completed {
                lines.push(format!("- [x] {}", todo.title));
            }
            lines.push(String::new());
        }

        lines.join("\n")
    }
}

/// Shorthand for [`ReportFormatter::format`] with the default title.
pub fn format_report(snapshot: Option<&Snapshot>) -> Option<String> {
    ReportFormatter::default().format(snapshot)
}

fn due(todo: &Todo) -> String {
    todo.due_date()
        .map(|date| format!(" (📅 {date})"))
        .unwrap_or_default()
}

/// Pending todos split by category, in first-encounter order.
struct PendingGroups<'a> {
    by_category: Vec<(u64, Vec<&'a Todo>)>,
    uncategorized: Vec<&'a Todo>,
}

impl<'a> PendingGroups<'a> {
    fn partition(todos: &'a [Todo]) -> Self {
        let mut by_category: Vec<(u64, Vec<&'a Todo>)> = Vec::new();
        let mut positions: HashMap<u64, usize> = HashMap::new();
        let mut uncategorized = Vec::new();

        for todo in todos.iter().filter(|t| !t.completed) {
            match todo.category() {
                Some(id) => {
                    let index = *positions.entry(id).or_insert_with(|| {
                        by_category.push((id, Vec::new()));
                        by_category.len() - 1
                    });
                    by_category[index].1.push(todo);
                }
                None => uncategorized.push(todo),
            }
        }

        Self {
            by_category,
            uncategorized,
        }
    }
}
