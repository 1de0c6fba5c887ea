//! Transition guards around entity operations.
//!
//! A guard wraps exactly one operation. Each call checks the entity's current
//! state, replays the cached result of an idempotent transition that already
//! reached its target, rejects calls from unexpected states, runs the
//! operation and finally commits the new state and result to the entity.

use super::entity::{entity_name, OperationId, Stateful};
use super::error::{GuardError, StateError};
use super::state::NameCase;
use crate::builder::TransitionGuardBuilder;
use crate::config::ErrorStyle;
use tracing::{debug, trace};

/// Operation wrapped by a guard. Receives the entity and the call arguments.
pub type Operation<E, A, R, X> = Box<dyn Fn(&mut E, A) -> Result<R, X> + Send + Sync>;

/// Called with the operation's error and the original arguments. An `Ok`
/// result is committed like a success; an `Err` propagates to the caller.
pub type FailureHandler<E, A, R, X> = Box<dyn Fn(&mut E, X, A) -> Result<R, X> + Send + Sync>;

/// A state precondition and transition attached to one operation.
///
/// Guards are immutable once built and hold no per-entity data: the current
/// state and cached results live in the entity's
/// [`StateCell`](super::StateCell). A single guard can therefore be shared,
/// e.g. from a `static`, by every instance of the entity type.
///
/// # Example
///
/// ```rust
/// use std::convert::Infallible;
/// use transition_guard::core::{StateCell, Stateful, TransitionGuard};
/// use transition_guard::state_enum;
///
/// state_enum! {
///     enum Phase {
///         Draft,
///         Published,
///     }
/// }
///
/// struct Post {
///     title: String,
///     cell: StateCell<Phase>,
/// }
///
/// impl Stateful for Post {
///     type State = Phase;
///     const INITIAL_STATE: Option<Phase> = Some(Phase::Draft);
///
///     fn state_cell(&self) -> &StateCell<Phase> {
///         &self.cell
///     }
///
///     fn state_cell_mut(&mut self) -> &mut StateCell<Phase> {
///         &mut self.cell
///     }
/// }
///
/// let publish = TransitionGuard::<Post, (), String, Infallible>::builder("publish")
///     .from(Phase::Draft)
///     .to(Phase::Published)
///     .idempotent()
///     .operation(|post: &mut Post, ()| Ok(format!("published {}", post.title)))
///     .build()
///     .unwrap();
///
/// let mut post = Post {
///     title: "hello".to_string(),
///     cell: StateCell::initial_for::<Post>(),
/// };
///
/// assert_eq!(publish.call(&mut post, ()).unwrap().as_deref(), Some("published hello"));
/// assert_eq!(post.current_state(), Some(&Phase::Published));
///
/// // Already published: the first result is replayed.
/// post.title = "changed".to_string();
/// assert_eq!(publish.call(&mut post, ()).unwrap().as_deref(), Some("published hello"));
/// ```
pub struct TransitionGuard<E: Stateful, A, R, X> {
    pub(crate) id: OperationId,
    pub(crate) name: String,
    pub(crate) expected: Vec<E::State>,
    pub(crate) target: Option<E::State>,
    pub(crate) idempotent: bool,
    pub(crate) operation: Operation<E, A, R, X>,
    pub(crate) on_error: Option<FailureHandler<E, A, R, X>>,
    pub(crate) retain: Option<fn(&A) -> A>,
    pub(crate) error_style: ErrorStyle,
    pub(crate) name_case: Option<NameCase>,
}

impl<E: Stateful, A, R, X> TransitionGuard<E, A, R, X> {
    /// Start building a guard for the operation called `name`.
    pub fn builder(name: impl Into<String>) -> TransitionGuardBuilder<E, A, R, X> {
        TransitionGuardBuilder::new(name)
    }

    pub(crate) fn from_parts(
        name: String,
        expected: Vec<E::State>,
        target: Option<E::State>,
        operation: Operation<E, A, R, X>,
    ) -> Self {
        Self {
            id: OperationId::next(),
            name,
            expected,
            target,
            idempotent: false,
            operation,
            on_error: None,
            retain: None,
            error_style: ErrorStyle::default(),
            name_case: None,
        }
    }

    /// Identity under which results are cached.
    pub fn id(&self) -> OperationId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Accepted source states. Empty means any state is accepted.
    pub fn expected(&self) -> &[E::State] {
        &self.expected
    }

    /// State committed after a successful call. `None` keeps the current state.
    pub fn target(&self) -> Option<&E::State> {
        self.target.as_ref()
    }

    pub fn is_idempotent(&self) -> bool {
        self.idempotent
    }

    pub fn has_failure_handler(&self) -> bool {
        self.on_error.is_some()
    }

    /// Check the precondition against `state` (pure).
    pub fn permits(&self, state: Option<&E::State>) -> bool {
        self.expected.is_empty() || state.is_some_and(|s| self.expected.contains(s))
    }

    /// Check whether a call from `state` would replay instead of running (pure).
    pub fn replays_from(&self, state: Option<&E::State>) -> bool {
        self.idempotent && self.target.is_some() && state == self.target.as_ref()
    }
}

impl<E, A, R, X> TransitionGuard<E, A, R, X>
where
    E: Stateful,
    R: Clone + Send + Sync + 'static,
    X: std::error::Error + 'static,
{
    /// Run the wrapped operation under the guard.
    ///
    /// Returns `Ok(None)` only when an idempotent guard short-circuits on an
    /// entity that already sits in its target state but has no cached result.
    pub fn call(&self, entity: &mut E, args: A) -> Result<Option<R>, GuardError<E::State, X>> {
        let actual = entity.current_state().cloned();
        trace!(
            entity = entity_name::<E>(),
            operation = %self.name,
            from = ?actual,
            "guarded call"
        );

        if self.replays_from(actual.as_ref()) {
            let cached = entity.state_cell().cached::<R>(self.id).cloned();
            debug!(
                entity = entity_name::<E>(),
                operation = %self.name,
                replayed = cached.is_some(),
                "target already reached, skipping operation"
            );
            return Ok(cached);
        }

        if !self.permits(actual.as_ref()) {
            debug!(
                entity = entity_name::<E>(),
                operation = %self.name,
                from = ?actual,
                expected = ?self.expected,
                "rejected call from unexpected state"
            );
            let error = StateError::new(
                entity_name::<E>(),
                self.name.clone(),
                self.expected.clone(),
                actual,
            )
            .styled(self.error_style, self.name_case);
            return Err(error.into());
        }

        let retained = self.retain.map(|retain| retain(&args));
        let result = match (self.operation)(entity, args) {
            Ok(result) => result,
            Err(error) => match (&self.on_error, retained) {
                (Some(handler), Some(args)) => {
                    debug!(
                        entity = entity_name::<E>(),
                        operation = %self.name,
                        error = %error,
                        "handling operation failure"
                    );
                    handler(entity, error, args).map_err(GuardError::Operation)?
                }
                _ => return Err(GuardError::Operation(error)),
            },
        };

        let next = self.target.clone().or_else(|| actual.clone());
        debug!(
            entity = entity_name::<E>(),
            operation = %self.name,
            from = ?actual,
            to = ?next,
            "committing transition"
        );
        let cell = entity.state_cell_mut();
        cell.store(self.id, result.clone());
        cell.commit(next);

        Ok(Some(result))
    }
}
