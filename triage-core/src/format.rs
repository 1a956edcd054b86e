//! Board output: plain-text cards for the terminal, `task-card` HTML markup, or JSON.

use crate::board::{Board, NO_TASKS, Results};
use crate::card::TaskCard;

/// Plain-text rendering of the results area.
pub fn to_text(board: &Board) -> String {
    let mut s = String::new();
    match board.results() {
        Results::Untouched => {}
        Results::NoTasks => {
            s.push_str(NO_TASKS);
            s.push('\n');
        }
        Results::Cards(cards) => {
            for (i, c) in cards.iter().enumerate() {
                if i > 0 {
                    s.push('\n');
                }
                s.push_str(&card_text(c));
            }
        }
    }
    s
}

fn card_text(c: &TaskCard) -> String {
    let mut s = format!("[{}] {}\n", c.priority.label(), c.title);
    s.push_str(&format!(
        "  Due: {} · Importance: {}/10 · Est: {}h\n",
        c.due_date, c.importance, c.estimated_hours
    ));
    s.push_str(&format!("  Score: {}\n", c.score_display));
    if let Some(reason) = &c.reason {
        s.push_str(&format!("  > {}\n", reason));
    }
    s
}

/// HTML fragment for the results container. Every interpolated value is escaped.
pub fn to_html(board: &Board) -> String {
    let mut s = String::new();
    match board.results() {
        Results::Untouched => {}
        Results::NoTasks => {
            s.push_str(&format!("<p>{}</p>\n", NO_TASKS));
        }
        Results::Cards(cards) => {
            for c in cards {
                s.push_str(&card_html(c));
            }
        }
    }
    s
}

fn card_html(c: &TaskCard) -> String {
    let mut s = String::new();
    s.push_str("<article class=\"task-card\">\n");
    s.push_str("  <div class=\"task-main\">\n");
    s.push_str(&format!(
        "    <div class=\"task-title\">{}</div>\n",
        escape_html(&c.title)
    ));
    s.push_str(&format!(
        "    <div class=\"task-meta\">Due: <strong>{}</strong> · Importance: <strong>{}</strong>/10 · Est: <strong>{}</strong>h</div>\n",
        escape_html(&c.due_date),
        escape_html(&c.importance),
        escape_html(&c.estimated_hours)
    ));
    s.push_str(&format!(
        "    <span class=\"task-badge {}\">{}</span>\n",
        c.priority.css_class(),
        c.priority.label()
    ));
    s.push_str("  </div>\n");
    s.push_str(&format!(
        "  <div class=\"score-pill\">Score: <strong>{}</strong></div>\n",
        c.score_display
    ));
    if let Some(reason) = &c.reason {
        s.push_str(&format!(
            "  <div class=\"explanation\">{}</div>\n",
            escape_html(reason)
        ));
    }
    s.push_str("</article>\n");
    s
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// The card display models as a pretty JSON array (`[]` for the placeholder).
pub fn to_json(board: &Board) -> serde_json::Result<String> {
    serde_json::to_string_pretty(board.cards())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn board_with(items: &[serde_json::Value], with_explanations: bool) -> Board {
        let mut b = Board::new();
        b.render_tasks(items, with_explanations);
        b
    }

    #[test]
    fn test_text_placeholder() {
        let b = board_with(&[], false);
        assert_eq!(to_text(&b), "No tasks to display.\n");
        assert_eq!(to_text(&Board::new()), "");
    }

    #[test]
    fn test_text_card() {
        let b = board_with(
            &[json!({"title": "X", "score": 10, "importance": 3, "estimated_hours": 0, "due_date": "2026-01-02"})],
            false,
        );
        let out = to_text(&b);
        assert!(out.starts_with("[Low priority] X\n"));
        assert!(out.contains("Due: 2026-01-02 · Importance: 3/10 · Est: 0h"));
        assert!(out.contains("Score: 10.0"));
        assert!(!out.contains("> "));
    }

    #[test]
    fn test_html_escapes_server_text() {
        let b = board_with(
            &[json!({"task": {"title": "<b>x</b>", "score": 90}, "reason": "a & b"})],
            true,
        );
        let html = to_html(&b);
        assert!(html.contains("&lt;b&gt;x&lt;/b&gt;"));
        assert!(html.contains("task-badge priority-medium\">Medium priority"));
        assert!(html.contains("<div class=\"explanation\">a &amp; b</div>"));
        assert_eq!(html.matches("<article class=\"task-card\">").count(), 1);
    }

    #[test]
    fn test_html_placeholder() {
        let b = board_with(&[], true);
        assert_eq!(to_html(&b), "<p>No tasks to display.</p>\n");
    }

    #[test]
    fn test_json_cards() {
        let b = board_with(&[json!({"title": "J", "score": 120})], false);
        let v: serde_json::Value = serde_json::from_str(&to_json(&b).unwrap()).unwrap();
        assert_eq!(v[0]["title"], "J");
        assert_eq!(v[0]["priority"], "high");
        assert_eq!(v[0]["score_display"], "120.0");
        assert!(v[0].get("reason").is_none());
    }
}
