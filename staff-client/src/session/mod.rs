//! Client session: current identity plus its durable copy

mod manager;
mod storage;

pub use manager::{SessionManager, SessionState};
pub use storage::{SESSION_KEY, SessionStorage, StoredSession};
