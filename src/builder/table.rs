//! Tables of guards attached to one entity type.
//!
//! A table keeps an entity type's guarded operations together, addressed by
//! operation name, so callers can dispatch by name or ask which operations
//! the entity's current state allows.

use crate::builder::error::BuildError;
use crate::builder::guard::TransitionGuardBuilder;
use crate::core::{Stateful, TransitionGuard};
use std::collections::HashMap;

/// Guards for one entity type, in registration order.
pub struct GuardTable<E: Stateful, A, R, X> {
    guards: Vec<TransitionGuard<E, A, R, X>>,
    index: HashMap<String, usize>,
}

impl<E: Stateful, A, R, X> GuardTable<E, A, R, X> {
    /// Look up the guard attached to `name`.
    pub fn get(&self, name: &str) -> Option<&TransitionGuard<E, A, R, X>> {
        self.index.get(name).map(|&i| &self.guards[i])
    }

    /// Operation names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.guards.iter().map(|guard| guard.name())
    }

    /// Guards that would run or replay from `state` rather than reject (pure).
    pub fn available_from<'a>(
        &'a self,
        state: Option<&'a E::State>,
    ) -> impl Iterator<Item = &'a TransitionGuard<E, A, R, X>> + 'a {
        self.guards
            .iter()
            .filter(move |guard| guard.replays_from(state) || guard.permits(state))
    }

    pub fn len(&self) -> usize {
        self.guards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guards.is_empty()
    }
}

/// Builder for constructing guard tables with a fluent API.
pub struct GuardTableBuilder<E: Stateful, A, R, X> {
    guards: Vec<TransitionGuard<E, A, R, X>>,
}

impl<E: Stateful, A, R, X> GuardTableBuilder<E, A, R, X> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self { guards: Vec::new() }
    }

    /// Add a guard using a builder.
    /// Returns an error if the builder fails validation.
    pub fn guard(mut self, builder: TransitionGuardBuilder<E, A, R, X>) -> Result<Self, BuildError> {
        let guard = builder.build()?;
        self.guards.push(guard);
        Ok(self)
    }

    /// Add a pre-built guard.
    pub fn add_guard(mut self, guard: TransitionGuard<E, A, R, X>) -> Self {
        self.guards.push(guard);
        self
    }

    /// Add multiple guards at once.
    pub fn guards(mut self, guards: Vec<TransitionGuard<E, A, R, X>>) -> Self {
        self.guards.extend(guards);
        self
    }

    /// Build the table.
    /// Returns an error if no guard was added or a name is used twice.
    pub fn build(self) -> Result<GuardTable<E, A, R, X>, BuildError> {
        if self.guards.is_empty() {
            return Err(BuildError::NoGuards);
        }

        let mut index = HashMap::with_capacity(self.guards.len());
        for (i, guard) in self.guards.iter().enumerate() {
            if index.insert(guard.name().to_string(), i).is_some() {
                return Err(BuildError::DuplicateOperation {
                    name: guard.name().to_string(),
                });
            }
        }

        Ok(GuardTable {
            guards: self.guards,
            index,
        })
    }
}

impl<E: Stateful, A, R, X> Default for GuardTableBuilder<E, A, R, X> {
    fn default() -> Self {
        Self::new()
    }
}
