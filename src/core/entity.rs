//! State-holding entities.
//!
//! An entity owns a [`StateCell`]: its current state plus the last result of
//! each guarded operation. The cell is the only part of an entity a guard
//! touches, so the rest of the entity's fields can stay read-only.

use super::state::State;
use serde::{Deserialize, Serialize};
use std::any::{type_name, Any};
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_OPERATION_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a guarded operation, allocated once when its guard is built.
///
/// Results are cached per operation, never per argument list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OperationId(u64);

impl OperationId {
    pub(crate) fn next() -> Self {
        Self(NEXT_OPERATION_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "op#{}", self.0)
    }
}

/// Current state and result cache of one entity.
///
/// Reads are public so tests and tooling can inspect an entity. Writes go
/// through the guarded-call protocol.
pub struct StateCell<S: State> {
    current: Option<S>,
    results: HashMap<OperationId, Box<dyn Any + Send + Sync>>,
}

impl<S: State> StateCell<S> {
    /// Create a cell in `initial` with an empty cache.
    pub fn new(initial: Option<S>) -> Self {
        Self {
            current: initial,
            results: HashMap::new(),
        }
    }

    /// Create a cell in the initial state declared by `E`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use transition_guard::core::{StateCell, Stateful};
    /// use transition_guard::state_enum;
    ///
    /// state_enum! {
    ///     enum Light {
    ///         Off,
    ///         On,
    ///     }
    /// }
    ///
    /// struct Lamp {
    ///     cell: StateCell<Light>,
    /// }
    ///
    /// impl Stateful for Lamp {
    ///     type State = Light;
    ///     const INITIAL_STATE: Option<Light> = Some(Light::Off);
    ///
    ///     fn state_cell(&self) -> &StateCell<Light> {
    ///         &self.cell
    ///     }
    ///
    ///     fn state_cell_mut(&mut self) -> &mut StateCell<Light> {
    ///         &mut self.cell
    ///     }
    /// }
    ///
    /// let lamp = Lamp { cell: StateCell::initial_for::<Lamp>() };
    /// assert_eq!(lamp.current_state(), Some(&Light::Off));
    /// ```
    pub fn initial_for<E>() -> Self
    where
        E: Stateful<State = S>,
    {
        Self::new(E::INITIAL_STATE)
    }

    pub fn current(&self) -> Option<&S> {
        self.current.as_ref()
    }

    /// Check whether the cell currently holds `state`.
    pub fn is_in(&self, state: &S) -> bool {
        self.current.as_ref() == Some(state)
    }

    /// The cached result of `operation`, if it has one of type `R`.
    pub fn cached<R: 'static>(&self, operation: OperationId) -> Option<&R> {
        self.results
            .get(&operation)
            .and_then(|result| result.downcast_ref::<R>())
    }

    pub fn has_cached(&self, operation: OperationId) -> bool {
        self.results.contains_key(&operation)
    }

    /// Number of operations with a cached result.
    pub fn cached_len(&self) -> usize {
        self.results.len()
    }

    /// Put the cell back into `state` and forget every cached result.
    pub fn reset(&mut self, state: Option<S>) {
        self.current = state;
        self.results.clear();
    }

    pub(crate) fn store<R>(&mut self, operation: OperationId, result: R)
    where
        R: Send + Sync + 'static,
    {
        self.results.insert(operation, Box::new(result));
    }

    pub(crate) fn commit(&mut self, state: Option<S>) {
        self.current = state;
    }
}

impl<S: State> Default for StateCell<S> {
    fn default() -> Self {
        Self::new(None)
    }
}

impl<S: State> fmt::Debug for StateCell<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateCell")
            .field("current", &self.current)
            .field("cached", &self.results.len())
            .finish()
    }
}

/// Trait for types whose operations are guarded by state transitions.
///
/// The initial state is a static property of the type. Types built on top of
/// another stateful type reuse its declaration by referring to it, e.g.
/// `const INITIAL_STATE: Option<Light> = Lamp::INITIAL_STATE;`.
pub trait Stateful {
    type State: State;

    /// State a freshly constructed entity starts in. `None` unless declared.
    const INITIAL_STATE: Option<Self::State> = None;

    fn state_cell(&self) -> &StateCell<Self::State>;

    fn state_cell_mut(&mut self) -> &mut StateCell<Self::State>;

    fn current_state(&self) -> Option<&Self::State> {
        self.state_cell().current()
    }
}

/// Short type name of an entity, used in errors and log events.
pub fn entity_name<E: ?Sized>() -> &'static str {
    let full = type_name::<E>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
