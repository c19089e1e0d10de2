//! Input errors and listener failure reports

use std::fmt;

use thiserror::Error;

use super::events::EventKind;
use super::registry::NodeId;

/// Which code space a rejected code belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeDomain {
    Key,
    Button,
}

impl fmt::Display for CodeDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodeDomain::Key => f.write_str("key"),
            CodeDomain::Button => f.write_str("mouse button"),
        }
    }
}

/// Errors raised by the input query surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InputError {
    /// A queried code lies outside the range tracked for its domain
    #[error("{domain} code {code} is outside the defined range {first}..={last}")]
    InvalidArgument {
        domain: CodeDomain,
        code: i32,
        first: i32,
        last: i32,
    },

    /// A key code inside the tracked range that names no key
    #[error("key code {0} is not assigned to any key")]
    UnassignedKey(i32),
}

impl InputError {
    /// Returns true for out-of-range query codes
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, InputError::InvalidArgument { .. })
    }
}

/// Recipient whose callback failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchTarget {
    /// The primary window listener
    Primary,
    /// A registered subscriber node
    Node(NodeId),
}

impl fmt::Display for DispatchTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchTarget::Primary => f.write_str("primary listener"),
            DispatchTarget::Node(id) => write!(f, "{id}"),
        }
    }
}

/// Why a listener invocation failed
#[derive(Debug, Error)]
pub enum FailureCause {
    /// The callback returned an error
    #[error("{0:#}")]
    Returned(anyhow::Error),

    /// The callback panicked; the payload message is kept
    #[error("panicked: {0}")]
    Panicked(String),

    /// The node was already mutably borrowed when its turn came
    #[error("node is already borrowed")]
    Busy,
}

/// A contained failure of one listener during fan-out
#[derive(Debug, Error)]
#[error("{target} failed while handling {event:?}: {cause}")]
pub struct ListenerFailure {
    pub event: EventKind,
    pub target: DispatchTarget,
    pub cause: FailureCause,
}
