pub mod core;
pub mod models;

pub use self::core::{
    AssistantSession, AssistantSessionBuilder, EMPTY_REPLY_FALLBACK, ERROR_FALLBACK, Rejection,
    SessionStatus, Submission,
};
pub use self::models::{ChatTurn, GREETING, Transcript, TurnRole};
