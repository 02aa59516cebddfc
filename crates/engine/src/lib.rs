//! Expense splitting engine.
//!
//! A group of people shares a list of expenses and discounts. Each item is
//! split equally among the people it applies to, an optional tip is added on
//! each person's positive share, and people settling together (payment
//! groups) are shown one combined figure.
//!
//! The heart of the crate is [`compute`], a pure function from an
//! [`ExpenseGroup`] snapshot to its [`Calculations`]. Around it:
//!
//! - [`ExpenseGroup`] operations keep a group consistent while it is edited;
//! - [`validation`] rejects malformed documents before they reach the engine;
//! - [`person_breakdown`] explains a single person's balance item by item;
//! - [`Engine`] is an in-memory store of groups with memoized calculations;
//! - [`GroupRepository`] is the seam to whatever persists the groups.
pub use breakdown::{ItemShare, PaymentGroupShare, PersonBreakdown, person_breakdown};
pub use calculations::{Calculations, PersonAmounts, VALIDITY_TOLERANCE, compute};
pub use error::EngineError;
pub use groups::ExpenseGroup;
pub use items::{Item, ItemKind};
pub use memo::CalculationCache;
pub use ops::{Engine, EngineBuilder};
pub use people::{Person, PersonId};
pub use repository::GroupRepository;

mod breakdown;
mod calculations;
mod error;
mod groups;
mod items;
mod memo;
mod ops;
mod people;
mod repository;
mod util;
pub mod validation;

pub type ResultEngine<T> = Result<T, EngineError>;
