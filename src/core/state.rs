//! State identity for guarded entities.
//!
//! A state domain is a closed, declaration-ordered set of fieldless values.
//! Each value has a declared name and, optionally, an explicit value that
//! overrides the name when the state is rendered as a string.

use super::error::DomainError;
use serde::{Deserialize, Serialize};
use std::any::type_name;
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt::Debug;

/// Casing applied to a declared name when a state has no explicit value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NameCase {
    /// `Initial` renders as `initial`.
    #[default]
    Lower,
    /// `Initial` renders as `INITIAL`.
    Upper,
    /// The declared name is used as written.
    Declared,
}

impl NameCase {
    /// Render a declared name under this policy.
    pub fn apply<'a>(&self, name: &'a str) -> Cow<'a, str> {
        match self {
            NameCase::Lower => Cow::Owned(name.to_lowercase()),
            NameCase::Upper => Cow::Owned(name.to_uppercase()),
            NameCase::Declared => Cow::Borrowed(name),
        }
    }
}

/// Trait for the states a guarded entity moves through.
///
/// States are opaque identities: they carry no data and compare by value.
/// Most domains are declared with the [`state_enum!`](crate::state_enum)
/// macro, which derives this trait.
///
/// # Required Traits
///
/// - `Clone` + `Eq`: states are copied into errors and compared on every call
/// - `Debug`: states must be debuggable for diagnostics
/// - `Serialize` + `Deserialize`: states can be written out alongside their entity
///
/// # Example
///
/// ```rust
/// use transition_guard::core::{NameCase, State};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
/// enum Door {
///     Open,
///     Closed,
/// }
///
/// impl State for Door {
///     fn name(&self) -> &str {
///         match self {
///             Self::Open => "Open",
///             Self::Closed => "Closed",
///         }
///     }
///
///     fn members() -> &'static [Self] {
///         &[Self::Open, Self::Closed]
///     }
/// }
///
/// assert_eq!(Door::Open.label(NameCase::Upper), "OPEN");
/// assert_eq!(Door::Closed.display_label(), "closed");
/// ```
pub trait State:
    Clone + Eq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync + 'static
{
    /// Casing used when the state is displayed without an explicit policy.
    const NAME_CASE: NameCase = NameCase::Lower;

    /// The member name as declared.
    fn name(&self) -> &str;

    /// An explicit value given at declaration, if any.
    ///
    /// Default implementation returns `None`, so labels derive from the name.
    fn value(&self) -> Option<&str> {
        None
    }

    /// Every member of the domain, in declaration order.
    fn members() -> &'static [Self];

    /// String form of the state under `case`. An explicit value always wins.
    fn label(&self, case: NameCase) -> Cow<'_, str> {
        match self.value() {
            Some(value) => Cow::Borrowed(value),
            None => case.apply(self.name()),
        }
    }

    /// String form of the state under the domain's own [`NAME_CASE`](State::NAME_CASE).
    fn display_label(&self) -> Cow<'_, str> {
        self.label(Self::NAME_CASE)
    }
}

/// A validated view over the members of a state domain.
///
/// Building a domain checks that the members render to distinct, non-empty
/// labels, then allows reverse lookup from label to state.
#[derive(Debug, Clone)]
pub struct StateDomain<S: State> {
    members: &'static [S],
    case: NameCase,
    labels: HashMap<String, usize>,
}

impl<S: State> StateDomain<S> {
    /// Validate the domain using its own naming policy.
    pub fn new() -> Result<Self, DomainError> {
        Self::with_case(S::NAME_CASE)
    }

    /// Validate the domain, rendering labels under `case`.
    pub fn with_case(case: NameCase) -> Result<Self, DomainError> {
        let members = S::members();
        if members.is_empty() {
            return Err(DomainError::Empty {
                domain: type_name::<S>(),
            });
        }

        let mut labels = HashMap::with_capacity(members.len());
        for (index, member) in members.iter().enumerate() {
            let label = member.label(case).into_owned();
            if label.is_empty() {
                return Err(DomainError::EmptyLabel {
                    member: member.name().to_string(),
                });
            }
            if let Some(&first) = labels.get(&label) {
                let first: &S = &members[first];
                return Err(DomainError::DuplicateValue {
                    value: label,
                    first: first.name().to_string(),
                    second: member.name().to_string(),
                });
            }
            labels.insert(label, index);
        }

        Ok(Self {
            members,
            case,
            labels,
        })
    }

    /// Members in declaration order.
    pub fn members(&self) -> &'static [S] {
        self.members
    }

    /// The naming policy labels were rendered with.
    pub fn case(&self) -> NameCase {
        self.case
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, state: &S) -> bool {
        self.members.contains(state)
    }

    /// Look a state up by its rendered label.
    pub fn parse(&self, label: &str) -> Option<S> {
        self.labels
            .get(label)
            .map(|&index| self.members[index].clone())
    }
}
