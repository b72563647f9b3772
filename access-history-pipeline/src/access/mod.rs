//! Who may use an asset: the practitioner roster and the per-view set of
//! grants made from it.

mod registry;
mod roster;

pub use registry::AccessRegistry;
pub use roster::{Practitioner, Roster};
