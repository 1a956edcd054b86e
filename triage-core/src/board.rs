//! The rendering sink: one error slot plus one results area.
//!
//! Callers own the board and pass it explicitly to whatever renders into it.

use serde_json::Value;

use crate::card::TaskCard;

pub const NO_TASKS: &str = "No tasks to display.";

#[derive(Debug, Clone, Default, PartialEq)]
pub enum Results {
    /// Nothing has been rendered yet.
    #[default]
    Untouched,
    /// A render happened with an empty list.
    NoTasks,
    Cards(Vec<TaskCard>),
}

#[derive(Debug, Clone, Default)]
pub struct Board {
    error: String,
    results: Results,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = message.into();
    }

    pub fn clear_error(&mut self) {
        self.error.clear();
    }

    /// Current error text, empty when there is none.
    pub fn error(&self) -> &str {
        &self.error
    }

    pub fn has_error(&self) -> bool {
        !self.error.is_empty()
    }

    pub fn results(&self) -> &Results {
        &self.results
    }

    pub fn cards(&self) -> &[TaskCard] {
        match &self.results {
            Results::Cards(cards) => cards,
            _ => &[],
        }
    }

    /// Replace the results area with one card per item, in the order given.
    pub fn render_tasks(&mut self, items: &[Value], with_explanations: bool) {
        if items.is_empty() {
            self.results = Results::NoTasks;
            return;
        }

        let cards = items
            .iter()
            .enumerate()
            .map(|(idx, item)| TaskCard::from_item(item, idx, with_explanations))
            .collect();
        self.results = Results::Cards(cards);
    }
}
