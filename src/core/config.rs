use std::env;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub contact_phone: String,
    pub social_handle: String,
    pub catalog_path: Option<String>,
    pub openai_model: String,
    pub openai_api_hostname: String,
    pub openai_api_key: String,
    pub assistant_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        let contact_phone =
            env::var("STOREFRONT_CONTACT_PHONE").unwrap_or_else(|_| "+91 98765 43210".to_string());
        let social_handle =
            env::var("STOREFRONT_SOCIAL_HANDLE").unwrap_or_else(|_| "@tejapickles".to_string());
        let catalog_path = env::var("STOREFRONT_CATALOG_PATH").ok();
        let openai_api_hostname = env::var("STOREFRONT_LLM_HOST")
            .unwrap_or_else(|_| "https://api.openai.com".to_string());
        let openai_api_key =
            env::var("OPENAI_API_KEY").unwrap_or_else(|_| "thiswontworkforopenai".to_string());
        let openai_model =
            env::var("STOREFRONT_LLM_MODEL").unwrap_or_else(|_| "gpt-4.1-mini".to_string());
        // Unparseable values fall back to the default rather than
        // refusing to start the shop
        let assistant_timeout_secs = env::var("STOREFRONT_ASSISTANT_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(30);

        Self {
            contact_phone,
            social_handle,
            catalog_path,
            openai_api_hostname,
            openai_api_key,
            openai_model,
            assistant_timeout: Duration::from_secs(assistant_timeout_secs),
        }
    }
}
