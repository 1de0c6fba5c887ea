//! Macros for declaring state domains.

/// Declare a state domain: a fieldless enum with its `State` and `Display` impls.
///
/// Members may carry an explicit value, which is used in place of the derived
/// label. An optional `case:` directive sets the domain's naming policy
/// (`Lower` unless given).
///
/// # Example
///
/// ```
/// use transition_guard::core::{State, StateDomain};
/// use transition_guard::state_enum;
///
/// state_enum! {
///     pub enum OrderState {
///         Draft,
///         Paid,
///         Shipped = "in-transit",
///     }
///     case: Upper
/// }
///
/// assert_eq!(OrderState::Draft.to_string(), "DRAFT");
/// assert_eq!(OrderState::Shipped.to_string(), "in-transit");
///
/// let domain = StateDomain::<OrderState>::new().unwrap();
/// assert_eq!(domain.parse("PAID"), Some(OrderState::Paid));
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $(= $value:literal)?
            ),* $(,)?
        }

        $(case: $case:ident)?
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::State for $name {
            $(const NAME_CASE: $crate::core::NameCase = $crate::core::NameCase::$case;)?

            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }

            fn value(&self) -> Option<&str> {
                match self {
                    $(Self::$variant => $crate::__state_value!($($value)?)),*
                }
            }

            fn members() -> &'static [Self] {
                &[$(Self::$variant),*]
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(&$crate::core::State::display_label(self))
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __state_value {
    () => {
        None
    };
    ($value:literal) => {
        Some($value)
    };
}
