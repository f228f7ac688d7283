//! Ports (trait boundaries) between the game core and its drivers.
//!
//! The orchestrator only talks to players and observers through these traits,
//! so search agents, learners, and humans are interchangeable.

pub mod agent;
pub mod observer;

pub use agent::{Agent, Trainable};
pub use observer::Observer;
