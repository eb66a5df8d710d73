pub mod chat;
pub mod generator;
pub mod prompt;

pub use generator::{BoxedTextGenerator, TextGenerator};
