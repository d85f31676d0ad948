//! Business Logic Services

pub mod flows;
pub mod prompt;
pub mod sessions;

pub use flows::Assistant;
pub use sessions::{CallerIdentity, MemorySessionStore, NullSessionStore, SessionStore};
