//! Model layer
//!
//! Typed views of the dashboard backend's JSON responses.
//!
//! Structure:
//! - `resource_kind.rs` - The fixed set of resource kinds
//! - `payload.rs` - Debug endpoint payload (focal resource + relations)
//! - `records.rs` - Namespace list endpoint records

pub mod payload;
pub mod records;
pub mod resource_kind;

pub use payload::{
    AttributeValue, DebugEvent, DebugPayload, LegacyGraph, RelatedResources, RelationGroup,
    ResourceRef, ResourceTarget,
};
pub use records::{
    ContainerStatus, EventRecord, Health, ImageRecord, PodDetails, PodHealth, PodResources,
    RequestLimit, age_since, format_age,
};
pub use resource_kind::ResourceKind;
