mod client;
mod core;

pub use self::client::OpenAiGenerator;
pub use self::core::{Message, Role, completion};
