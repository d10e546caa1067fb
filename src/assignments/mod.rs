//! The project modal's role-assignment editing session: normalization of
//! server records, the in-session edit list, and the save-time
//! reconciliation of local edits against persisted state.

mod editor;
mod normalize;
mod reconcile;

pub use editor::*;
pub use normalize::*;
pub use reconcile::*;
