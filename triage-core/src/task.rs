//! Task records as the analysis service understands them.
//!
//! Inputs travel as raw `serde_json::Value`s so that malformed records reach the
//! server untouched. The typed [`TaskRecord`] is only used to build the example list.

use chrono::{Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub title: String,

    /// ISO date (YYYY-MM-DD).
    pub due_date: NaiveDate,

    /// 0-10, not validated client-side.
    pub importance: u8,

    pub estimated_hours: f64,

    /// Opaque identifiers, passed through as-is.
    #[serde(default)]
    pub dependencies: Vec<serde_json::Value>,
}

impl TaskRecord {
    pub fn new(title: impl Into<String>, due_date: NaiveDate) -> Self {
        Self {
            title: title.into(),
            due_date,
            importance: 5,
            estimated_hours: 1.0,
            dependencies: Vec::new(),
        }
    }

    pub fn with_importance(mut self, importance: u8) -> Self {
        self.importance = importance;
        self
    }

    pub fn with_hours(mut self, hours: f64) -> Self {
        self.estimated_hours = hours;
        self
    }
}

/// Build the four canned example tasks, with due dates relative to `today`.
pub fn example_tasks(today: NaiveDate) -> Vec<TaskRecord> {
    let tomorrow = today + Days::new(1);
    let in_three = today + Days::new(3);
    let last_week = today - Days::new(7);

    vec![
        TaskRecord::new("Finish assignment report", tomorrow)
            .with_importance(9)
            .with_hours(3.0),
        TaskRecord::new("Pay electricity bill", last_week)
            .with_importance(8)
            .with_hours(0.5),
        TaskRecord::new("Refactor old codebase", in_three)
            .with_importance(6)
            .with_hours(10.0),
        TaskRecord::new("Plan weekend trip", in_three)
            .with_importance(4)
            .with_hours(2.0),
    ]
}

/// Pretty-printed JSON for the example list, ready to drop into an input buffer.
pub fn example_json(today: NaiveDate) -> String {
    // A Vec of plain structs always serializes.
    serde_json::to_string_pretty(&example_tasks(today)).unwrap_or_else(|_| "[]".to_string())
}

/// Today's date in UTC.
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_example_dates_are_relative_to_today() {
        let tasks = example_tasks(day(2026, 3, 1));
        assert_eq!(tasks.len(), 4);
        assert_eq!(tasks[0].due_date, day(2026, 3, 2));
        assert_eq!(tasks[1].due_date, day(2026, 2, 22));
        assert_eq!(tasks[2].due_date, day(2026, 3, 4));
        assert_eq!(tasks[3].due_date, tasks[2].due_date);
    }

    #[test]
    fn test_example_json_is_an_array_of_records() {
        let json = example_json(day(2026, 1, 31));
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        let arr = parsed.as_array().unwrap();
        assert_eq!(arr.len(), 4);
        assert_eq!(arr[0]["title"], "Finish assignment report");
        assert_eq!(arr[0]["due_date"], "2026-02-01");
        assert_eq!(arr[1]["estimated_hours"], 0.5);
        assert!(arr[3]["dependencies"].as_array().unwrap().is_empty());
        // pretty-printed
        assert!(json.contains("\n  "));
    }
}
