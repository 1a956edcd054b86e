//! Card display model: one result item turned into the fields a card shows.
//!
//! Server responses are loosely typed, so every field is read defensively from
//! the raw JSON with two kinds of fallback:
//! - "falsy" fallbacks (`title`, `due_date`) kick in for missing, null, "", 0 or false
//! - "nullish" fallbacks (`importance`, `estimated_hours`) only for missing or null,
//!   so a legitimate `0` is kept.

use serde::Serialize;
use serde_json::Value;

use crate::priority::Priority;

pub const MISSING: &str = "?";
pub const NO_DUE_DATE: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskCard {
    pub title: String,
    pub due_date: String,
    pub importance: String,
    pub estimated_hours: String,
    pub priority: Priority,
    pub score: f64,
    /// Score rounded to one decimal place.
    pub score_display: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl TaskCard {
    /// Build the card for the item at zero-based position `idx`.
    ///
    /// With explanations the item is a suggestion wrapper `{task, reason}`; a
    /// wrapper without a usable `task` falls back to the wrapper itself.
    pub fn from_item(item: &Value, idx: usize, with_explanations: bool) -> Self {
        let (task, reason) = if with_explanations {
            let task = item.get("task").filter(|t| is_truthy(t)).unwrap_or(item);
            let reason = item
                .get("reason")
                .filter(|r| is_truthy(r))
                .map(display_text);
            (task, reason)
        } else {
            (item, None)
        };

        let title = task
            .get("title")
            .filter(|t| is_truthy(t))
            .map(display_text)
            .unwrap_or_else(|| format!("Task #{}", idx + 1));

        let score = task.get("score").and_then(Value::as_f64).unwrap_or(0.0);

        let importance = nullish_text(task.get("importance"));
        let estimated_hours = nullish_text(task.get("estimated_hours"));

        let due_date = task
            .get("due_date")
            .filter(|d| is_truthy(d))
            .map(display_text)
            .unwrap_or_else(|| NO_DUE_DATE.to_string());

        Self {
            title,
            due_date,
            importance,
            estimated_hours,
            priority: Priority::from_score(score),
            score,
            score_display: format_score(score),
            reason,
        }
    }
}

/// Score to one decimal place, rounding exact ties away from zero.
///
/// `{:.1}` rounds ties to even, so 85.25 would show as "85.2". A tie at one
/// decimal only happens when the fractional part is exactly .25 or .75, and
/// those values (and ten times them) are exact in f64. Zero of either sign
/// prints as "0.0".
pub fn format_score(score: f64) -> String {
    if score == 0.0 {
        return "0.0".to_string();
    }
    let quarters = score * 4.0;
    let tie = quarters.fract() == 0.0 && quarters.rem_euclid(2.0) == 1.0;
    if tie {
        // f64::round is half-away-from-zero
        format!("{:.1}", (score * 10.0).round() / 10.0)
    } else {
        format!("{score:.1}")
    }
}

fn nullish_text(v: Option<&Value>) -> String {
    match v {
        None | Some(Value::Null) => MISSING.to_string(),
        Some(v) => display_text(v),
    }
}

/// Loose truthiness over JSON values.
pub fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Render a JSON value the way it reads when interpolated into text:
/// strings unquoted, whole numbers without a trailing `.0`.
pub fn display_text(v: &Value) -> String {
    match v {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(u) = n.as_u64() {
                u.to_string()
            } else {
                // f64 Display already drops a zero fraction
                n.as_f64().map(|f| f.to_string()).unwrap_or_else(|| n.to_string())
            }
        }
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|i| match i {
                Value::Null => String::new(),
                other => display_text(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_zero_hours_is_preserved() {
        let item = json!({
            "title": "A",
            "score": 130,
            "importance": 5,
            "estimated_hours": 0,
            "due_date": "2024-01-01"
        });
        let card = TaskCard::from_item(&item, 0, false);
        assert_eq!(card.estimated_hours, "0");
        assert_eq!(card.importance, "5");
        assert_eq!(card.priority, Priority::High);
        assert_eq!(card.score_display, "130.0");
        assert_eq!(card.due_date, "2024-01-01");
    }

    #[test]
    fn test_fallbacks_for_empty_record() {
        let card = TaskCard::from_item(&json!({}), 2, false);
        assert_eq!(card.title, "Task #3");
        assert_eq!(card.importance, MISSING);
        assert_eq!(card.estimated_hours, MISSING);
        assert_eq!(card.due_date, NO_DUE_DATE);
        assert_eq!(card.score, 0.0);
        assert_eq!(card.score_display, "0.0");
        assert_eq!(card.priority, Priority::Low);
        assert_eq!(card.reason, None);
    }

    #[test]
    fn test_null_is_nullish_but_empty_title_is_falsy() {
        let item = json!({"title": "", "importance": null, "due_date": "", "score": "99"});
        let card = TaskCard::from_item(&item, 0, false);
        assert_eq!(card.title, "Task #1");
        assert_eq!(card.importance, MISSING);
        assert_eq!(card.due_date, NO_DUE_DATE);
        // non-numeric score
        assert_eq!(card.score, 0.0);
    }

    #[test]
    fn test_non_object_items_render_with_defaults() {
        let card = TaskCard::from_item(&json!(42), 0, false);
        assert_eq!(card.title, "Task #1");
        assert_eq!(card.estimated_hours, MISSING);
    }

    #[test]
    fn test_suggestion_wrapper() {
        let item = json!({
            "task": {"title": "Pay bill", "score": 85.34, "importance": 8, "estimated_hours": 0.5},
            "reason": "'Pay bill' is overdue"
        });
        let card = TaskCard::from_item(&item, 0, true);
        assert_eq!(card.title, "Pay bill");
        assert_eq!(card.priority, Priority::Medium);
        assert_eq!(card.score_display, "85.3");
        assert_eq!(card.estimated_hours, "0.5");
        assert_eq!(card.reason.as_deref(), Some("'Pay bill' is overdue"));
    }

    #[test]
    fn test_wrapper_without_task_falls_back_to_item() {
        let item = json!({"title": "Bare", "score": 121, "reason": "why not"});
        let card = TaskCard::from_item(&item, 0, true);
        assert_eq!(card.title, "Bare");
        assert_eq!(card.priority, Priority::High);
        assert_eq!(card.reason.as_deref(), Some("why not"));
    }

    #[test]
    fn test_reason_ignored_without_explanations() {
        let item = json!({"title": "T", "reason": "hidden"});
        let card = TaskCard::from_item(&item, 0, false);
        assert_eq!(card.reason, None);
    }

    #[test]
    fn test_score_ties_round_away_from_zero() {
        assert_eq!(format_score(85.25), "85.3");
        assert_eq!(format_score(0.25), "0.3");
        assert_eq!(format_score(0.75), "0.8");
        assert_eq!(format_score(-0.25), "-0.3");
        assert_eq!(format_score(2.5), "2.5");
        // 0.35 is stored just below the tie
        assert_eq!(format_score(0.35), "0.3");
        assert_eq!(format_score(10.0), "10.0");
    }

    #[test]
    fn test_negative_zero_score() {
        assert_eq!(format_score(-0.0), "0.0");
        assert_eq!(format_score(-0.01), "-0.0");

        let card = TaskCard::from_item(&json!({"score": 85.25}), 0, false);
        assert_eq!(card.score_display, "85.3");
        let card = TaskCard::from_item(&json!({"score": -0.0}), 0, false);
        assert_eq!(card.score_display, "0.0");
    }

    #[test]
    fn test_display_text() {
        assert_eq!(display_text(&json!(3.0)), "3");
        assert_eq!(display_text(&json!(0.5)), "0.5");
        assert_eq!(display_text(&json!(-2)), "-2");
        assert_eq!(display_text(&json!([1, null, "a"])), "1,,a");
        assert_eq!(display_text(&json!({"k": 1})), "[object Object]");
    }

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!(false)));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!("0")));
    }
}
