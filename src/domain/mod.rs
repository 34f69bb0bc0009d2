//! Domain Layer
//!
//! Pure logic of the neutralization pipeline, free of process and VCS I/O.
//!
//! ## Structure
//!
//! - `entities/` - Deleted components, dependency matches, neutralization records
//! - `value_objects/` - Immutable value types (ContentHash, CommentStyle, DeltaMode, TestLevel)
//! - `services/` - Scanner, neutralizer and preview differ
//! - `ports/` - Interface definitions for infrastructure
//!
//! All file access goes through the [`ports::FileSystem`] port so services
//! can run against a temporary tree in tests.

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
