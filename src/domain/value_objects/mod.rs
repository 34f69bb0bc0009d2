//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod comment_style;
mod delta_mode;
mod hash;
mod ignore_patterns;
mod metadata_type;
mod test_level;

pub use comment_style::{CommentStyle, DISABLED_MARKER};
pub use delta_mode::DeltaMode;
pub use hash::ContentHash;
pub use ignore_patterns::{IgnoreError, IgnorePatterns, IGNORE_FILE_NAME};
pub use metadata_type::{ComponentRef, MetadataType};
pub use test_level::TestLevel;
