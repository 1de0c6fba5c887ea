//! Transition Guard: guarded state transitions for plain Rust types
//!
//! An entity keeps its business fields as ordinary data and owns one
//! [`StateCell`](core::StateCell) holding its current state and the last
//! result of each guarded operation. A [`TransitionGuard`] wraps one operation
//! and declares the states the entity must be in before it runs and the state
//! it moves to once it completes.
//!
//! # Core Concepts
//!
//! - **State**: closed, named domains declared with [`state_enum!`]
//! - **Entity**: any type implementing [`Stateful`], with a static initial state
//! - **Guard**: precondition, target state, idempotent replay and failure handler
//!   wrapped around one operation
//!
//! # Example
//!
//! ```rust
//! use std::convert::Infallible;
//! use transition_guard::core::StateCell;
//! use transition_guard::{state_enum, Stateful, TransitionGuard};
//!
//! state_enum! {
//!     pub enum MachineState {
//!         Initial,
//!         Final,
//!     }
//! }
//!
//! struct Machine {
//!     cell: StateCell<MachineState>,
//! }
//!
//! impl Stateful for Machine {
//!     type State = MachineState;
//!     const INITIAL_STATE: Option<MachineState> = Some(MachineState::Initial);
//!
//!     fn state_cell(&self) -> &StateCell<MachineState> {
//!         &self.cell
//!     }
//!
//!     fn state_cell_mut(&mut self) -> &mut StateCell<MachineState> {
//!         &mut self.cell
//!     }
//! }
//!
//! let to_final = TransitionGuard::<Machine, (), &'static str, Infallible>::builder("to_final")
//!     .from(MachineState::Initial)
//!     .to(MachineState::Final)
//!     .operation(|_machine, ()| Ok("transitioning to final state"))
//!     .build()
//!     .unwrap();
//!
//! let mut machine = Machine { cell: StateCell::initial_for::<Machine>() };
//!
//! assert_eq!(to_final.call(&mut machine, ()).unwrap(), Some("transitioning to final state"));
//! assert_eq!(machine.current_state(), Some(&MachineState::Final));
//!
//! let error = to_final.call(&mut machine, ()).unwrap_err();
//! assert!(error.is_state_error());
//! ```

pub mod builder;
pub mod config;
pub mod core;

// Re-export commonly used types
pub use crate::builder::{BuildError, GuardTable, GuardTableBuilder, TransitionGuardBuilder};
pub use crate::config::{ErrorStyle, GuardConfig};
pub use crate::core::{GuardError, State, StateCell, StateError, Stateful, TransitionGuard};
