//! The UI controller: owns the input buffer, the strategy selection and the board,
//! and drives parse → request → render for the two actions.

use std::future::Future;

use chrono::NaiveDate;
use serde_json::Value;
use tracing::{error, info};
use triage_core::{Board, example_json, parse_tasks};

use crate::api::{ApiClient, DEFAULT_STRATEGY};
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Analyze,
    Suggest,
}

impl Action {
    pub fn name(self) -> &'static str {
        match self {
            Action::Analyze => "analyze",
            Action::Suggest => "suggest",
        }
    }

    /// Suggestion results carry a `reason` per item.
    pub fn with_explanations(self) -> bool {
        matches!(self, Action::Suggest)
    }
}

/// Parse `input` and run `action` against the service.
pub async fn run_action(
    client: &ApiClient,
    action: Action,
    input: &str,
    strategy: &str,
) -> Result<Vec<Value>> {
    let tasks = parse_tasks(input)?;
    match action {
        Action::Analyze => client.analyze(&tasks, strategy).await,
        Action::Suggest => client.suggest(&tasks).await,
    }
}

pub struct Controller {
    client: ApiClient,
    input: String,
    strategy: String,
    board: Board,
}

impl Controller {
    /// A controller with an empty input buffer and the default strategy.
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            input: String::new(),
            strategy: DEFAULT_STRATEGY.to_string(),
            board: Board::new(),
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    pub fn strategy(&self) -> &str {
        &self.strategy
    }

    pub fn set_strategy(&mut self, strategy: impl Into<String>) {
        self.strategy = strategy.into();
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Show a failure that happened outside a request, e.g. while loading the input.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.board.set_error(message);
    }

    /// Replace the input with the canned example list and clear the error slot.
    pub fn fill_example(&mut self, today: NaiveDate) {
        self.input = example_json(today);
        self.board.clear_error();
    }

    /// Clear the error slot and snapshot the inputs for `action`.
    ///
    /// The returned future owns everything it needs, so it can be spawned;
    /// feed its output back through [`Controller::apply`]. Nothing stops two of
    /// these from overlapping: whichever is applied last wins the board.
    pub fn start(
        &mut self,
        action: Action,
    ) -> impl Future<Output = (Action, Result<Vec<Value>>)> + Send + 'static {
        self.board.clear_error();
        let client = self.client.clone();
        let input = self.input.clone();
        let strategy = self.strategy.clone();
        async move {
            let outcome = run_action(&client, action, &input, &strategy).await;
            (action, outcome)
        }
    }

    /// Render a successful outcome, or show the failure and keep the previous results.
    pub fn apply(&mut self, action: Action, outcome: Result<Vec<Value>>) {
        match outcome {
            Ok(items) => {
                info!(action = action.name(), count = items.len(), "rendering results");
                self.board.render_tasks(&items, action.with_explanations());
            }
            Err(e) => {
                error!(action = action.name(), error = %e, "request failed");
                self.board.set_error(e.to_string());
            }
        }
    }

    pub async fn analyze(&mut self) {
        let (action, outcome) = self.start(Action::Analyze).await;
        self.apply(action, outcome);
    }

    pub async fn suggest(&mut self) {
        let (action, outcome) = self.start(Action::Suggest).await;
        self.apply(action, outcome);
    }
}
