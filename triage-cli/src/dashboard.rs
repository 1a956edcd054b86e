use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use serde_json::Value;
use std::io::{self, Stdout};
use std::path::PathBuf;
use tokio::sync::mpsc;
use triage_client::{Action, ApiError, Controller, KNOWN_STRATEGIES};
use triage_core::{NO_TASKS, Priority, Results, TaskCard, today_utc};

use crate::state::read_task_input;

type Outcome = (Action, Result<Vec<Value>, ApiError>);

/// Where the dashboard's task list comes from. Stdin is drained once up front
/// so `r` can restore it.
#[derive(Debug, Clone, PartialEq)]
pub enum InputSource {
    Example,
    File(PathBuf),
    Stdin(String),
}

impl InputSource {
    /// `-` reads stdin now, before the terminal goes raw.
    pub fn from_arg(file: Option<PathBuf>) -> Result<Self> {
        Ok(match file {
            Some(p) if p.as_os_str() == "-" => InputSource::Stdin(read_task_input(&p)?),
            Some(p) => InputSource::File(p),
            None => InputSource::Example,
        })
    }
}

pub fn run_dashboard(controller: Controller, source: InputSource) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = dashboard_loop(&mut terminal, controller, source);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

struct Dashboard {
    controller: Controller,
    source: InputSource,
    /// Title of the input pane; names what is actually loaded.
    loaded: String,
    scroll: u16,
    tx: mpsc::UnboundedSender<Outcome>,
}

impl Dashboard {
    fn new(controller: Controller, source: InputSource, tx: mpsc::UnboundedSender<Outcome>) -> Self {
        Self {
            controller,
            source,
            loaded: String::new(),
            scroll: 0,
            tx,
        }
    }

    /// (Re)load the input from its source. An unreadable file leaves the
    /// example list loaded and puts the read error on the board.
    fn load_input(&mut self) {
        match &self.source {
            InputSource::Example => {
                self.controller.fill_example(today_utc());
                self.loaded = "tasks (example)".to_string();
            }
            InputSource::Stdin(s) => {
                self.controller.set_input(s.clone());
                self.loaded = "tasks (stdin)".to_string();
            }
            InputSource::File(p) => match read_task_input(p) {
                Ok(s) => {
                    self.controller.set_input(s);
                    self.loaded = format!("tasks ({})", p.display());
                }
                Err(e) => {
                    self.controller.fill_example(today_utc());
                    self.controller.set_error(format!("{e:#}"));
                    self.loaded = "tasks (example)".to_string();
                }
            },
        }
    }

    fn show_example(&mut self) {
        self.controller.fill_example(today_utc());
        self.loaded = "tasks (example)".to_string();
    }

    /// Fire one request. Responses are applied in completion order.
    fn spawn(&mut self, action: Action) {
        let fut = self.controller.start(action);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(fut.await);
        });
    }

    fn cycle_strategy(&mut self) {
        let current = self.controller.strategy();
        let next = match KNOWN_STRATEGIES.iter().position(|s| *s == current) {
            Some(i) => KNOWN_STRATEGIES[(i + 1) % KNOWN_STRATEGIES.len()],
            None => KNOWN_STRATEGIES[0],
        };
        self.controller.set_strategy(next);
    }
}

fn dashboard_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    controller: Controller,
    source: InputSource,
) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Outcome>();
    let mut dash = Dashboard::new(controller, source, tx);
    dash.load_input();

    loop {
        while let Ok((action, outcome)) = rx.try_recv() {
            dash.controller.apply(action, outcome);
            dash.scroll = 0;
        }

        terminal.draw(|f| {
            let size = f.area();
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3),
                    Constraint::Min(5),
                    Constraint::Length(3),
                ])
                .split(size);

            let header = Paragraph::new(Line::from(vec![
                Span::styled(
                    "Task triage",
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(
                    dash.controller.client().base_url().to_string(),
                    Style::default().fg(Color::Gray),
                ),
                Span::raw("  strategy: "),
                Span::styled(
                    dash.controller.strategy().to_string(),
                    Style::default().fg(Color::Cyan),
                ),
            ]))
            .block(Block::default().borders(Borders::ALL));
            f.render_widget(header, rows[0]);

            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
                .split(rows[1]);

            let input = Paragraph::new(dash.controller.input())
                .block(Block::default().borders(Borders::ALL).title(dash.loaded.as_str()))
                .wrap(Wrap { trim: false });
            f.render_widget(input, cols[0]);

            let results = Paragraph::new(results_text(dash.controller.board().results()))
                .block(Block::default().borders(Borders::ALL).title("results"))
                .wrap(Wrap { trim: false })
                .scroll((dash.scroll, 0));
            f.render_widget(results, cols[1]);

            let error = dash.controller.board().error();
            let footer = if error.is_empty() {
                Paragraph::new(Line::from(Span::styled(
                    "a=analyze  s=suggest  t=strategy  e=example  r=reload  j/k=scroll  q=quit",
                    Style::default().fg(Color::Gray),
                )))
            } else {
                Paragraph::new(Line::from(Span::styled(
                    error.to_string(),
                    Style::default().fg(Color::Red),
                )))
            };
            f.render_widget(footer.block(Block::default().borders(Borders::ALL)), rows[2]);
        })?;

        if event::poll(std::time::Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Char('a') => dash.spawn(Action::Analyze),
                    KeyCode::Char('s') => dash.spawn(Action::Suggest),
                    KeyCode::Char('t') => dash.cycle_strategy(),
                    KeyCode::Char('e') => dash.show_example(),
                    KeyCode::Char('r') => dash.load_input(),
                    KeyCode::Char('j') | KeyCode::Down => {
                        dash.scroll = dash.scroll.saturating_add(1);
                    }
                    KeyCode::Char('k') | KeyCode::Up => {
                        dash.scroll = dash.scroll.saturating_sub(1);
                    }
                    _ => {}
                }
            }
        }
    }

    Ok(())
}

fn priority_color(p: Priority) -> Color {
    match p {
        Priority::High => Color::Red,
        Priority::Medium => Color::Yellow,
        Priority::Low => Color::Green,
    }
}

fn results_text(results: &Results) -> Text<'static> {
    match results {
        Results::Untouched => Text::from(Line::styled(
            "press a to analyze or s for suggestions",
            Style::default().fg(Color::Gray),
        )),
        Results::NoTasks => Text::from(Line::raw(NO_TASKS)),
        Results::Cards(cards) => {
            let mut lines = Vec::new();
            for c in cards {
                lines.extend(card_lines(c));
                lines.push(Line::raw(""));
            }
            Text::from(lines)
        }
    }
}

fn card_lines(c: &TaskCard) -> Vec<Line<'static>> {
    let color = priority_color(c.priority);
    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                c.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                format!("[{}]", c.priority.label()),
                Style::default().fg(color),
            ),
        ]),
        Line::styled(
            format!(
                "Due: {} · Importance: {}/10 · Est: {}h",
                c.due_date, c.importance, c.estimated_hours
            ),
            Style::default().fg(Color::Gray),
        ),
        Line::from(vec![
            Span::raw("Score: "),
            Span::styled(c.score_display.clone(), Style::default().fg(color)),
        ]),
    ];
    if let Some(reason) = &c.reason {
        lines.push(Line::styled(
            reason.clone(),
            Style::default().add_modifier(Modifier::ITALIC),
        ));
    }
    lines
}
