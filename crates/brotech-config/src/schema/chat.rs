//! Chat assistant configuration types.

use serde::{Deserialize, Serialize};

/// Model used when the config does not name one.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Store key under which the transcript is persisted.
pub const DEFAULT_HISTORY_KEY: &str = "chatHistory";

/// Persona, business context and sales objective for the assistant.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are Tech Bro, a friendly, tech-savvy, and proactive sales assistant for BroTech Web Solutions. IMPORTANT: You must detect the user's language and respond in that same language, including slang and colloquialisms, to build rapport. Your primary goal is to convert visitors into customers by engaging them and guiding them to the contact page for a quote. Be knowledgeable about our services: web development (Business, E-commerce, Portfolios), AI Chatbots, Data Dashboards, and Cybersecurity. After answering 2-3 questions, your main objective is to pivot the conversation towards a sale. For example: 'This sounds like a project we'd love to work on. The best next step is to get a custom quote. Shall I guide you to our contact page?' Always be helpful, but remember to drive the conversation towards conversion.";

/// Chat engine and backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    pub model: String,
    pub system_prompt: String,
    /// Name of the environment variable holding the Gemini API key.
    pub api_key_env: String,
    pub max_tokens: u32,
    pub temperature: f64,
    /// Idle timeout between streamed chunks in seconds. `0` waits forever.
    pub response_timeout_secs: u64,
    pub history_key: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.into(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.into(),
            api_key_env: "API_KEY".into(),
            max_tokens: 4096,
            temperature: 0.7,
            response_timeout_secs: 60,
            history_key: DEFAULT_HISTORY_KEY.into(),
        }
    }
}

impl ChatConfig {
    /// Resolve the API key from the configured env var, then `GEMINI_API_KEY`.
    pub fn resolve_api_key(&self) -> Option<String> {
        [self.api_key_env.as_str(), "GEMINI_API_KEY"]
            .iter()
            .filter(|name| !name.is_empty())
            .find_map(|name| std::env::var(name).ok())
            .filter(|key| !key.trim().is_empty())
    }

    /// The idle timeout, or `None` when disabled.
    pub fn response_timeout(&self) -> Option<std::time::Duration> {
        match self.response_timeout_secs {
            0 => None,
            secs => Some(std::time::Duration::from_secs(secs)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_chat_config() {
        let config = ChatConfig::default();
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.history_key, "chatHistory");
        assert!(config.system_prompt.starts_with("You are Tech Bro"));
        assert_eq!(config.api_key_env, "API_KEY");
    }

    #[test]
    fn zero_timeout_disables_it() {
        let config = ChatConfig {
            response_timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.response_timeout().is_none());

        let config = ChatConfig::default();
        assert_eq!(
            config.response_timeout(),
            Some(std::time::Duration::from_secs(60))
        );
    }

    #[test]
    fn resolve_api_key_reads_configured_env_var() {
        let config = ChatConfig {
            api_key_env: "BROTECH_TEST_KEY_PRESENT".into(),
            ..Default::default()
        };
        std::env::set_var("BROTECH_TEST_KEY_PRESENT", "abc123");
        assert_eq!(config.resolve_api_key().as_deref(), Some("abc123"));
        std::env::remove_var("BROTECH_TEST_KEY_PRESENT");
    }

    #[test]
    fn resolve_api_key_ignores_blank_values() {
        let config = ChatConfig {
            api_key_env: "BROTECH_TEST_KEY_BLANK".into(),
            ..Default::default()
        };
        std::env::set_var("BROTECH_TEST_KEY_BLANK", "   ");
        if std::env::var("GEMINI_API_KEY").is_err() {
            assert!(config.resolve_api_key().is_none());
        }
        std::env::remove_var("BROTECH_TEST_KEY_BLANK");
    }
}
