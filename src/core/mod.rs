//! Core guard types and logic.
//!
//! This module contains the transition-guard model:
//! - State domains via the `State` trait
//! - Entities that own a `StateCell` of current state and cached results
//! - `TransitionGuard`, which runs an operation under a state precondition
//!   and commits the transition
//!
//! Guards never touch global state; everything they read or write lives on
//! the entity passed to each call.

mod entity;
mod error;
mod guard;
mod state;

pub use entity::{entity_name, OperationId, StateCell, Stateful};
pub use error::{DomainError, GuardError, StateError};
pub use guard::{FailureHandler, Operation, TransitionGuard};
pub use state::{NameCase, State, StateDomain};
