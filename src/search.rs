//! Filtering tasks at render time

use crate::task::Task;


/// Tells which tasks should be displayed
#[derive(Clone, Debug, PartialEq)]
pub enum SearchFilter {
    /// Return all tasks
    All,
    /// Return only tasks whose text contains this (lowercase) string
    Text(String),
}

impl SearchFilter {
    /// Build a filter from what the user typed. An empty text matches every task
    pub fn from_text(text: &str) -> Self {
        if text.is_empty() {
            SearchFilter::All
        } else {
            SearchFilter::Text(text.to_lowercase())
        }
    }

    /// Case-insensitive substring match over the text of the task
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            SearchFilter::All => true,
            SearchFilter::Text(needle) => task.text().to_lowercase().contains(needle.as_str()),
        }
    }

    pub fn filter<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        tasks.iter().filter(|t| self.matches(t)).collect()
    }
}

impl Default for SearchFilter {
    fn default() -> Self {
        SearchFilter::All
    }
}
