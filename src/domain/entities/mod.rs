//! Domain Entities
//!
//! - `DeletedComponent` / `DeletionManifest` - components marked for removal
//! - `DependencyMatch` - a source file referencing deleted components
//! - `NeutralizationRecord` / `NeutralizationLedger` - what was mutated and how to undo it

mod component;
mod dependency;
mod neutralization;

pub use component::{DeletedComponent, DeletionManifest};
pub use dependency::DependencyMatch;
pub use neutralization::{LedgerError, NeutralizationLedger, NeutralizationRecord};
