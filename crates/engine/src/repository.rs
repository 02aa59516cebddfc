//! Group persistence seam.
//!
//! The engine never decides where groups live. Hosts hand it groups loaded
//! through a [`GroupRepository`] and write them back through the same trait.
use crate::{ExpenseGroup, ResultEngine};

/// Source of the current group snapshots.
///
/// Implementations report I/O failures as [`EngineError::Storage`] and
/// decoding failures as [`EngineError::Json`].
///
///  [`EngineError::Storage`]: crate::EngineError::Storage
///  [`EngineError::Json`]: crate::EngineError::Json
pub trait GroupRepository {
    fn load(&self) -> ResultEngine<Vec<ExpenseGroup>>;

    fn save(&self, groups: &[ExpenseGroup]) -> ResultEngine<()>;
}
