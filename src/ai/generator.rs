use anyhow::{Error, Result};
use async_trait::async_trait;

/// A hosted language model that turns a prompt into a reply.
///
/// Implementations return `Ok("")` when the model answered with
/// nothing and `Err` for anything that went wrong on the way
/// (transport, status, payload). The assistant session decides what
/// the customer sees in either case.
#[async_trait]
pub trait TextGenerator {
    async fn generate(&self, system: &str, prompt: &str) -> Result<String, Error>;
}

pub type BoxedTextGenerator = Box<dyn TextGenerator + Send + Sync + 'static>;
