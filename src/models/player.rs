//! Player roster entries.

use serde::{Deserialize, Serialize};

/// Player identifier. Permanent ids come from outside; temporary ids are `temp-xxxxxx`.
pub type PlayerId = String;

/// A player in the allocation roster.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Synthesized in-session to cover a shortfall; has no persistent identity.
    #[serde(default)]
    pub temporary: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
}

impl Player {
    /// A permanent (externally supplied) player.
    pub fn new(id: impl Into<PlayerId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            temporary: false,
            skill: None,
            position: None,
        }
    }

    /// A session-local stand-in player.
    pub fn temporary(id: impl Into<PlayerId>, name: impl Into<String>) -> Self {
        Self {
            temporary: true,
            ..Self::new(id, name)
        }
    }
}
