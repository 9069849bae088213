//! Resource managers: one per resource kind, each bound to its collection.

mod manager;

pub use manager::{OperationError, ResourceManager};
