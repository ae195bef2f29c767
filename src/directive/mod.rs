//! Processing directives
//!
//! Maps a generic transformation request onto a proxy-agnostic, ordered set
//! of processing options. Nothing in this module knows about URL syntax or
//! cryptography; see [`crate::uri`] for serialization.

pub mod focus;
pub mod mapper;
pub mod request;
pub mod types;

pub use focus::{calculate_center, calculate_relative_center};
pub use mapper::{map_directive, resolve_resize_type};
pub use request::{
    Area, AreaUnits, FocusArea, ParseSizeError, ProcessingConfiguration, SizeMarker, SizeValue,
    SourceMetadata,
};
pub use types::{DirectiveOption, Gravity, ProcessingDirective, ResizeType};
