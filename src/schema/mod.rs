//! Schema building blocks: labels, semantic types, axes and columns.
pub mod axis;
pub mod column;
pub mod dtype;
pub mod ids;
pub mod label;

// Re-export key types for convenient access
pub use axis::{AxisDomain, FreeAxes};
pub use column::{BoundColumn, Column};
pub use dtype::DType;
pub use ids::{DefinitionId, Owner, SliceId};
pub use label::{Label, Value};
