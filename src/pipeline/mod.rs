//! Game orchestration
//!
//! [`TrainingPipeline`] alternates two agents over fresh games, hands every
//! move's reward to agents that can learn, and reports to observers.

pub mod observers;
pub mod training;

pub use observers::{BoardPrinter, ProgressObserver};
pub use training::{
    DEFAULT_MAX_TURNS, GameRecord, TrainingConfig, TrainingPipeline, TrainingResult,
    save_learners,
};
