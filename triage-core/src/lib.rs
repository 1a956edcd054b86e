//! triage-core: task records, input parsing and card rendering for the task triage client.
//!
//! Nothing in here touches the network; scoring happens on the analysis server.

pub mod board;
pub mod card;
pub mod format;
pub mod input;
pub mod priority;
pub mod task;

pub use board::{Board, NO_TASKS, Results};
pub use card::TaskCard;
pub use input::{InputError, parse_tasks};
pub use priority::Priority;
pub use task::{TaskRecord, example_json, example_tasks, today_utc};
