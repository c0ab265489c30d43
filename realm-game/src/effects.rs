use serde::{Deserialize, Serialize};
use std::fmt;

/// Symbolic audio cue requested by the navigator. The player collaborator
/// owns the actual pitch and envelope recipe for each name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Effect {
    Click,
    Transition,
    Success,
    Toggle,
}

impl Effect {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::Transition => "transition",
            Self::Success => "success",
            Self::Toggle => "toggle",
        }
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
