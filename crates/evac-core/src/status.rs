//! Agent lifecycle status.

use std::fmt;

/// Lifecycle status of an agent.
///
/// `Escaped` and `Dead` are terminal: once reached, the agent's status
/// and position never change again.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AgentStatus {
    /// Still on the grid and able to move.
    #[default]
    Alive,
    /// Reached an exit cell.
    Escaped,
    /// Stepped onto (or was caught on) a hazard cell.
    Dead,
}

impl AgentStatus {
    /// Whether this status is terminal (`Escaped` or `Dead`).
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Alive)
    }
}

impl fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Alive => write!(f, "alive"),
            Self::Escaped => write!(f, "escaped"),
            Self::Dead => write!(f, "dead"),
        }
    }
}
