//! Test utilities for integration tests
#![allow(dead_code)]
use std::time::Duration;

use storefront::ai::chat::AssistantSession;
use storefront::ai::prompt;
use storefront::core::AppConfig;

/// Config pointing the assistant at `llm_host`, usually a mockito
/// server
pub fn test_config(llm_host: &str) -> AppConfig {
    AppConfig {
        contact_phone: String::from("+91 98765 43210"),
        social_handle: String::from("@tejapickles"),
        catalog_path: None,
        openai_model: String::from("gpt-4o"),
        openai_api_hostname: llm_host.to_string(),
        openai_api_key: String::from("test-api-key"),
        assistant_timeout: Duration::from_secs(5),
    }
}

/// A session using the real OpenAI client against `llm_host`
pub fn test_session(llm_host: &str) -> AssistantSession {
    AssistantSession::from_config(&test_config(llm_host)).expect("Failed to build session")
}

pub fn persona() -> String {
    prompt::persona().expect("Failed to render persona")
}

/// Body of a chat completion response with `content`
pub fn completion_body(content: &str) -> String {
    serde_json::json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "created": 1694268190,
        "model": "gpt-4o",
        "choices": [{
            "index": 0,
            "message": {
                "role": "assistant",
                "content": content
            },
            "finish_reason": "stop"
        }]
    })
    .to_string()
}
