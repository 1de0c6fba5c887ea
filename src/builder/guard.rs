//! Builder for constructing transition guards.

use crate::builder::error::BuildError;
use crate::config::{ErrorStyle, GuardConfig};
use crate::core::{
    FailureHandler, NameCase, Operation, State, StateDomain, Stateful, TransitionGuard,
};

/// Builder for constructing guards with a fluent API.
pub struct TransitionGuardBuilder<E: Stateful, A, R, X> {
    name: String,
    expected: Vec<E::State>,
    target: Option<E::State>,
    idempotent: bool,
    operation: Option<Operation<E, A, R, X>>,
    on_error: Option<FailureHandler<E, A, R, X>>,
    retain: Option<fn(&A) -> A>,
    error_style: ErrorStyle,
    name_case: Option<NameCase>,
}

impl<E: Stateful, A, R, X> TransitionGuardBuilder<E, A, R, X> {
    /// Create a new guard builder for the operation called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            expected: Vec::new(),
            target: None,
            idempotent: false,
            operation: None,
            on_error: None,
            retain: None,
            error_style: ErrorStyle::default(),
            name_case: None,
        }
    }

    /// Accept calls from `state` (optional, repeatable).
    /// Without any source state every call passes the precondition.
    pub fn from(mut self, state: E::State) -> Self {
        if !self.expected.contains(&state) {
            self.expected.push(state);
        }
        self
    }

    /// Accept calls from any of `states`.
    pub fn from_any<I>(self, states: I) -> Self
    where
        I: IntoIterator<Item = E::State>,
    {
        states.into_iter().fold(self, Self::from)
    }

    /// Set the state committed on success (optional).
    pub fn to(mut self, state: E::State) -> Self {
        self.target = Some(state);
        self
    }

    /// Replay the cached result instead of running once the target is reached.
    pub fn idempotent(mut self) -> Self {
        self.idempotent = true;
        self
    }

    /// Set the wrapped operation (required).
    pub fn operation<F>(mut self, operation: F) -> Self
    where
        F: Fn(&mut E, A) -> Result<R, X> + Send + Sync + 'static,
    {
        self.operation = Some(Box::new(operation));
        self
    }

    /// Convert operation failures into results (optional).
    ///
    /// The handler receives the call's arguments, so they are cloned before
    /// the operation runs.
    pub fn on_error<F>(mut self, handler: F) -> Self
    where
        A: Clone,
        F: Fn(&mut E, X, A) -> Result<R, X> + Send + Sync + 'static,
    {
        self.on_error = Some(Box::new(handler));
        self.retain = Some(A::clone);
        self
    }

    /// Apply formatting settings for rejected calls.
    pub fn config(mut self, config: &GuardConfig) -> Self {
        self.error_style = config.error_style;
        self.name_case = config.name_case;
        self
    }

    /// Build the guard.
    /// Returns an error if no operation was set or the state domain is invalid
    /// under the naming policy the guard renders with.
    pub fn build(self) -> Result<TransitionGuard<E, A, R, X>, BuildError> {
        let operation = self.operation.ok_or(BuildError::MissingOperation)?;
        let case = self.name_case.unwrap_or(<E::State as State>::NAME_CASE);
        StateDomain::<E::State>::with_case(case)?;

        let mut guard =
            TransitionGuard::from_parts(self.name, self.expected, self.target, operation);
        guard.idempotent = self.idempotent;
        guard.on_error = self.on_error;
        guard.retain = self.retain;
        guard.error_style = self.error_style;
        guard.name_case = self.name_case;

        Ok(guard)
    }
}
