//! Builder API for ergonomic guard construction.
//!
//! This module provides fluent builders for guards and guard tables, and the
//! `state_enum!` macro for declaring state domains with minimal boilerplate.

pub mod error;
pub mod guard;
pub mod macros;
pub mod table;

pub use error::BuildError;
pub use guard::TransitionGuardBuilder;
pub use table::{GuardTable, GuardTableBuilder};

use crate::core::{Stateful, TransitionGuard};

/// Create a guard that moves an entity from one state to another.
///
/// # Example
///
/// ```
/// use std::convert::Infallible;
/// use transition_guard::builder::simple_guard;
/// use transition_guard::core::{StateCell, Stateful};
/// use transition_guard::state_enum;
///
/// state_enum! {
///     enum Valve {
///         Closed,
///         Open,
///     }
/// }
///
/// struct Pipe {
///     cell: StateCell<Valve>,
/// }
///
/// impl Stateful for Pipe {
///     type State = Valve;
///     const INITIAL_STATE: Option<Valve> = Some(Valve::Closed);
///
///     fn state_cell(&self) -> &StateCell<Valve> {
///         &self.cell
///     }
///
///     fn state_cell_mut(&mut self) -> &mut StateCell<Valve> {
///         &mut self.cell
///     }
/// }
///
/// let open = simple_guard("open", Valve::Closed, Valve::Open, |_pipe: &mut Pipe, ()| {
///     Ok::<_, Infallible>(())
/// })
/// .unwrap();
///
/// let mut pipe = Pipe { cell: StateCell::initial_for::<Pipe>() };
/// open.call(&mut pipe, ()).unwrap();
/// assert_eq!(pipe.current_state(), Some(&Valve::Open));
/// ```
pub fn simple_guard<E, A, R, X, F>(
    name: impl Into<String>,
    from: E::State,
    to: E::State,
    operation: F,
) -> Result<TransitionGuard<E, A, R, X>, BuildError>
where
    E: Stateful,
    F: Fn(&mut E, A) -> Result<R, X> + Send + Sync + 'static,
{
    TransitionGuardBuilder::new(name)
        .from(from)
        .to(to)
        .operation(operation)
        .build()
}

/// Create a guard with no precondition and no target: it always runs and
/// never changes the entity's state.
pub fn unguarded<E, A, R, X, F>(
    name: impl Into<String>,
    operation: F,
) -> Result<TransitionGuard<E, A, R, X>, BuildError>
where
    E: Stateful,
    F: Fn(&mut E, A) -> Result<R, X> + Send + Sync + 'static,
{
    TransitionGuardBuilder::new(name).operation(operation).build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{State, StateCell};
    use serde::{Deserialize, Serialize};
    use std::convert::Infallible;

    #[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
    enum TestState {
        Start,
        Middle,
        End,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            match self {
                Self::Start => "Start",
                Self::Middle => "Middle",
                Self::End => "End",
            }
        }

        fn members() -> &'static [Self] {
            &[Self::Start, Self::Middle, Self::End]
        }
    }

    struct Task {
        cell: StateCell<TestState>,
    }

    impl Stateful for Task {
        type State = TestState;

        fn state_cell(&self) -> &StateCell<TestState> {
            &self.cell
        }

        fn state_cell_mut(&mut self) -> &mut StateCell<TestState> {
            &mut self.cell
        }
    }

    #[test]
    fn simple_guard_builds() {
        let guard = simple_guard("advance", TestState::Start, TestState::Middle, |_t: &mut Task, ()| {
            Ok::<_, Infallible>(())
        })
        .unwrap();

        assert_eq!(guard.expected(), &[TestState::Start]);
        assert_eq!(guard.target(), Some(&TestState::Middle));
        assert!(guard.permits(Some(&TestState::Start)));
        assert!(!guard.permits(Some(&TestState::End)));
    }

    #[test]
    fn unguarded_runs_from_any_state() {
        let guard = unguarded("peek", |t: &mut Task, ()| {
            Ok::<_, Infallible>(t.current_state().cloned())
        })
        .unwrap();

        for start in [None, Some(TestState::Start), Some(TestState::End)] {
            let mut task = Task {
                cell: StateCell::new(start.clone()),
            };
            let seen = guard.call(&mut task, ()).unwrap();

            assert_eq!(seen, Some(start.clone()));
            assert_eq!(task.current_state(), start.as_ref());
        }
    }
}
