//! Cache-friendly projections derived from a resource's full graph state.

pub mod resource_data;

pub use resource_data::{BinaryData, ResourceData};
