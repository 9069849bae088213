//! Service layer: document storage and the resource managers built on it.
//! - `storage` holds the collection handle abstraction and its backends.
//! - `resources` maps the five CRUD operations onto one collection handle
//!   and translates storage faults into per-operation failures.

pub mod errors;
pub mod resources;
pub mod runtime;
pub mod storage;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
