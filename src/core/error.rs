//! Errors raised by state domains and guarded calls.

use super::state::{NameCase, State};
use crate::config::ErrorStyle;
use thiserror::Error;

/// Errors detected while validating a state domain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("State domain '{domain}' declares no members")]
    Empty { domain: &'static str },

    #[error("State '{member}' renders to an empty label")]
    EmptyLabel { member: String },

    #[error("Duplicate state value '{value}' declared by both '{first}' and '{second}'")]
    DuplicateValue {
        value: String,
        first: String,
        second: String,
    },
}

/// Raised when a guarded operation is called while its entity is outside the
/// accepted source states. Nothing is invoked and nothing is mutated.
#[derive(Debug, Clone, Error)]
#[error("{}", self.render())]
pub struct StateError<S: State> {
    entity: &'static str,
    operation: String,
    expected: Vec<S>,
    actual: Option<S>,
    style: ErrorStyle,
    case: Option<NameCase>,
}

impl<S: State> StateError<S> {
    pub fn new(
        entity: &'static str,
        operation: impl Into<String>,
        expected: Vec<S>,
        actual: Option<S>,
    ) -> Self {
        Self {
            entity,
            operation: operation.into(),
            expected,
            actual,
            style: ErrorStyle::default(),
            case: None,
        }
    }

    /// Choose how the message is rendered. A `None` case keeps the domain's own.
    pub fn styled(mut self, style: ErrorStyle, case: Option<NameCase>) -> Self {
        self.style = style;
        self.case = case;
        self
    }

    /// Type name of the entity the call was made on.
    pub fn entity(&self) -> &'static str {
        self.entity
    }

    /// Name of the rejected operation.
    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// The accepted source states.
    pub fn expected(&self) -> &[S] {
        &self.expected
    }

    /// The state the entity was actually in.
    pub fn actual(&self) -> Option<&S> {
        self.actual.as_ref()
    }

    fn label(&self, state: &S) -> String {
        state.label(self.case.unwrap_or(S::NAME_CASE)).into_owned()
    }

    fn render(&self) -> String {
        let mut expected: Vec<String> = self.expected.iter().map(|s| self.label(s)).collect();
        expected.sort();
        let actual = self
            .actual
            .as_ref()
            .map_or_else(|| "None".to_string(), |s| self.label(s));

        match self.style {
            ErrorStyle::Entity => format!(
                "Actual state for '{}' does not match expected state(s)\nExpected states: {}\nActual state: {}",
                self.entity,
                expected.join(", "),
                actual
            ),
            ErrorStyle::Operation => format!(
                "Current state for '{}.{}()' does not match expected state(s): \nExpected state in:\n{:?}\nActual state:\n{}",
                self.entity, self.operation, expected, actual
            ),
        }
    }
}

/// Error returned from a guarded call.
///
/// Operation errors pass through unchanged; only the precondition check adds
/// an error of its own.
#[derive(Debug, Error)]
pub enum GuardError<S: State, X: std::error::Error + 'static> {
    #[error(transparent)]
    State(#[from] StateError<S>),

    #[error(transparent)]
    Operation(X),
}

impl<S: State, X: std::error::Error + 'static> GuardError<S, X> {
    pub fn is_state_error(&self) -> bool {
        matches!(self, GuardError::State(_))
    }

    pub fn as_state_error(&self) -> Option<&StateError<S>> {
        match self {
            GuardError::State(error) => Some(error),
            GuardError::Operation(_) => None,
        }
    }

    /// Recover the operation's own error, if that is what this is.
    pub fn into_operation(self) -> Option<X> {
        match self {
            GuardError::Operation(error) => Some(error),
            GuardError::State(_) => None,
        }
    }
}
