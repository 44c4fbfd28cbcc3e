pub mod narrative;
pub mod orchestrator;
pub mod prompt;
pub mod reconcile;
pub mod remote;

pub use crate::domain::model::{Card, InterpretationResult, Source, Spread};
pub use crate::domain::ports::{InterpretationClient, RemoteCallOutcome, RemoteSettings};
pub use crate::utils::error::Result;
