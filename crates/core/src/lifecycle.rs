//! Closed value sets and state machines.
//!
//! Every selection-style attribute (operator type, blood group, priority...)
//! is declared with [`define_choice!`], which yields an enum that maps to the
//! TEXT value stored in the database. Stateful records are declared with
//! [`define_states!`], which additionally generates the transition table.
//! Action operations go through [`StateMachine::transition`] so an illegal
//! move is rejected in one place instead of by per-handler conditionals.

use crate::error::CoreError;

/// A state enumeration with a central transition table.
pub trait StateMachine: Copy + Eq + std::fmt::Debug + 'static {
    /// Entity name used in error messages (e.g. `"appointment"`).
    const ENTITY: &'static str;

    /// The stored TEXT value of this state.
    fn label(self) -> &'static str;

    /// States reachable from `self` in a single action.
    fn next_states(self) -> &'static [Self];

    /// Whether `self -> to` is listed in the table.
    fn can_transition(self, to: Self) -> bool {
        self.next_states().contains(&to)
    }

    /// Validate `self -> to`, returning the target state on success.
    fn transition(self, to: Self) -> Result<Self, CoreError> {
        if self.can_transition(to) {
            Ok(to)
        } else {
            Err(CoreError::InvalidTransition {
                entity: Self::ENTITY,
                from: self.label(),
                to: to.label(),
            })
        }
    }

    /// Whether no further action can move the record.
    fn is_terminal(self) -> bool {
        self.next_states().is_empty()
    }
}

/// Parse a stored state string, or validate a user-supplied one.
pub fn parse_state<S>(value: &str) -> Result<S, CoreError>
where
    S: std::str::FromStr<Err = CoreError>,
{
    value.parse()
}

/// Declare a closed set of string-valued choices.
///
/// ```ignore
/// define_choice! {
///     /// Patient gender.
///     Gender("gender") {
///         Male = "male",
///         Female = "female",
///     }
/// }
/// ```
macro_rules! define_choice {
    (
        $(#[$meta:meta])*
        $name:ident ($what:expr) {
            $( $(#[$vmeta:meta])* $variant:ident = $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $label)] $variant ),+
        }

        impl $name {
            /// Every accepted value, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The stored TEXT value.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $label ),+
                }
            }

            /// All stored values, for error messages and CHECK constraints.
            pub fn labels() -> Vec<&'static str> {
                Self::ALL.iter().map(|v| v.as_str()).collect()
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::error::CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $label => Ok($name::$variant), )+
                    other => Err($crate::error::CoreError::Validation(format!(
                        "Invalid {} '{}'. Must be one of: {}",
                        $what,
                        other,
                        Self::labels().join(", ")
                    ))),
                }
            }
        }
    };
}

/// Declare a state enumeration together with its transition table.
///
/// Every state must appear on the left of the table (terminal states map to
/// `[]`), so adding a state without deciding its exits fails to compile.
macro_rules! define_states {
    (
        $(#[$meta:meta])*
        $name:ident ($entity:literal) {
            $( $(#[$vmeta:meta])* $variant:ident = $label:literal ),+ $(,)?
        }
        transitions {
            $( $from:ident => [ $($to:ident),* ] ),+ $(,)?
        }
    ) => {
        define_choice! {
            $(#[$meta])*
            $name (concat!($entity, " state")) {
                $( $(#[$vmeta])* $variant = $label ),+
            }
        }

        impl $crate::lifecycle::StateMachine for $name {
            const ENTITY: &'static str = $entity;

            fn label(self) -> &'static str {
                self.as_str()
            }

            fn next_states(self) -> &'static [Self] {
                match self {
                    $( $name::$from => &[ $($name::$to),* ], )+
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    define_states! {
        /// Minimal machine used to exercise the macro.
        Door("door") {
            Open = "open",
            Closed = "closed",
            Locked = "locked",
            Removed = "removed",
        }
        transitions {
            Open => [Closed, Removed],
            Closed => [Open, Locked],
            Locked => [Closed],
            Removed => [],
        }
    }

    #[test]
    fn labels_round_trip_through_from_str() {
        for state in Door::ALL {
            let parsed: Door = parse_state(state.as_str()).unwrap();
            assert_eq!(parsed, *state);
        }
    }

    #[test]
    fn unknown_label_lists_accepted_values() {
        let err = "ajar".parse::<Door>().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Invalid door state 'ajar'"), "{msg}");
        assert!(msg.contains("open, closed, locked, removed"), "{msg}");
    }

    #[test]
    fn listed_transition_is_allowed() {
        assert_eq!(Door::Closed.transition(Door::Locked).unwrap(), Door::Locked);
    }

    #[test]
    fn unlisted_transition_names_both_states() {
        let err = Door::Open.transition(Door::Locked).unwrap_err();
        assert_matches!(
            err,
            CoreError::InvalidTransition {
                entity: "door",
                from: "open",
                to: "locked"
            }
        );
    }

    #[test]
    fn self_transition_is_rejected_unless_listed() {
        assert!(Door::Open.transition(Door::Open).is_err());
    }

    #[test]
    fn terminal_state_has_no_exits() {
        assert!(Door::Removed.is_terminal());
        assert!(!Door::Locked.is_terminal());
    }

    #[test]
    fn serializes_as_stored_label() {
        assert_eq!(serde_json::to_string(&Door::Locked).unwrap(), "\"locked\"");
        let back: Door = serde_json::from_str("\"closed\"").unwrap();
        assert_eq!(back, Door::Closed);
    }
}
