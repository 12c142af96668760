//! Session engine: event handling and deterministic scheduling.

pub mod scheduler;
pub mod session;

pub use scheduler::{TaskKind, TaskScheduler};
pub use session::GameSession;
