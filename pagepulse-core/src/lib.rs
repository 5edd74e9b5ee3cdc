pub mod aggregate;
pub mod collector;
pub mod error;
pub mod model;
pub mod report;
pub mod run;
pub mod score;

pub use collector::{RetryPolicy, SampleCollector};
pub use error::PulseError;
pub use model::{Category, RunStats, Strategy, Summary};
pub use run::{Orchestrator, RunReport};
pub use score::ScoreClient;
