//! Record and resource-kind definitions shared by the service and server crates.

pub mod errors;
pub mod record;
pub mod resource;

pub use record::{merge, record_id, Record, ID_FIELD};
pub use resource::ResourceKind;
