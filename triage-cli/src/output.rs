use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use triage_core::{Board, format};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Terminal cards
    #[default]
    Text,
    /// `task-card` article markup
    Html,
    /// Card display models
    Json,
}

pub fn render(board: &Board, fmt: OutputFormat) -> Result<String> {
    Ok(match fmt {
        OutputFormat::Text => format::to_text(board),
        OutputFormat::Html => format::to_html(board),
        OutputFormat::Json => {
            let mut s = format::to_json(board).context("serialize cards")?;
            s.push('\n');
            s
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_formats() {
        let mut board = Board::new();
        board.render_tasks(&[json!({"title": "X", "score": 10})], false);

        assert!(render(&board, OutputFormat::Text).unwrap().contains("[Low priority] X"));
        assert!(render(&board, OutputFormat::Html).unwrap().contains("task-card"));
        let v: serde_json::Value =
            serde_json::from_str(&render(&board, OutputFormat::Json).unwrap()).unwrap();
        assert_eq!(v[0]["score_display"], "10.0");
    }
}
