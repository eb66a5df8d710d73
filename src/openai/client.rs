use std::time::Duration;

use anyhow::{Error, Result, anyhow};
use async_trait::async_trait;

use super::core::{Message, Role, completion};
use crate::ai::TextGenerator;
use crate::core::AppConfig;

/// `TextGenerator` backed by an OpenAI compatible chat completions
/// API. Each call is a fresh single-turn conversation: the persona as
/// the system message followed by the customer's text.
#[derive(Clone, Debug)]
pub struct OpenAiGenerator {
    api_hostname: String,
    api_key: String,
    model: String,
    timeout: Duration,
}

impl OpenAiGenerator {
    pub fn new(api_hostname: &str, api_key: &str, model: &str, timeout: Duration) -> Self {
        Self {
            api_hostname: api_hostname.to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            timeout,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            &config.openai_api_hostname,
            &config.openai_api_key,
            &config.openai_model,
            config.assistant_timeout,
        )
    }
}

#[async_trait]
impl TextGenerator for OpenAiGenerator {
    async fn generate(&self, system: &str, prompt: &str) -> Result<String, Error> {
        let messages = vec![
            Message::new(Role::System, system),
            Message::new(Role::User, prompt),
        ];
        let resp = completion(
            &messages,
            &self.api_hostname,
            &self.api_key,
            &self.model,
            self.timeout,
        )
        .await?;

        let message = &resp["choices"][0]["message"];
        if !message.is_object() {
            return Err(anyhow!("No message received. Resp:\n\n {}", resp));
        }

        // A null or missing content field is an empty reply, not a
        // broken payload
        match &message["content"] {
            serde_json::Value::Null => Ok(String::new()),
            serde_json::Value::String(s) => Ok(s.clone()),
            other => Err(anyhow!("Unexpected message content: {}", other)),
        }
    }
}
