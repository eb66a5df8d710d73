//! The core models for the shopping assistant conversation.
use serde::{Deserialize, Serialize};

pub const GREETING: &str = "Namaste! I am your Teja Pickles assistant. Looking for a specific flavor or a festive gift recommendation?";

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum TurnRole {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "assistant")]
    Assistant,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct ChatTurn {
    pub role: TurnRole,
    pub text: String,
}

impl ChatTurn {
    pub fn user(text: &str) -> Self {
        Self {
            role: TurnRole::User,
            text: text.to_string(),
        }
    }

    pub fn assistant(text: &str) -> Self {
        Self {
            role: TurnRole::Assistant,
            text: text.to_string(),
        }
    }
}

/// Append-only log of the conversation. Turns can only be pushed.
#[derive(Clone, Debug)]
pub struct Transcript(Vec<ChatTurn>);

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

impl Transcript {
    /// A transcript seeded with the assistant greeting
    pub fn new() -> Self {
        Self(vec![ChatTurn::assistant(GREETING)])
    }

    pub fn turns(&self) -> Vec<ChatTurn> {
        self.0.clone()
    }

    pub fn push(&mut self, turn: ChatTurn) {
        self.0.push(turn)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn last(&self) -> Option<&ChatTurn> {
        self.0.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ChatTurn> {
        self.0.iter()
    }
}
