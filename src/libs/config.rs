use serde::Deserialize;

pub const API_KEY_ENV: &str = "CHAT_COMPLETION_API_KEY";
pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_SYSTEM_PROMPT: &str = "you are beast in mobile developing";
pub const DEFAULT_PROMPT: &str = "short message talking about the future of mobile technology";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Clone, Debug, PartialEq, Deserialize, uniffi::Record)]
#[serde(default)]
pub struct CompletionConfig {
    pub api_url: String,
    pub api_key: String,
    pub model: String,
    pub system_prompt: String,
    pub default_prompt: String,
    pub timeout_secs: u64,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            default_prompt: DEFAULT_PROMPT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl CompletionConfig {
    /// An empty key is filled from the environment, if it is set there.
    pub fn with_env_api_key(mut self) -> Self {
        if self.api_key.is_empty() {
            if let Ok(key) = std::env::var(API_KEY_ENV) {
                self.api_key = key;
            }
        }
        self
    }
}

/// Everything a host passes in when it opens a session.
#[derive(Clone, Debug, PartialEq, Deserialize, uniffi::Record)]
#[serde(default)]
pub struct ChatConfig {
    /// Full path of the database file. Empty means an in-memory store.
    pub database_path: String,
    pub seed_sample_data: bool,
    pub log_filter: Option<String>,
    pub completion: CompletionConfig,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            database_path: String::new(),
            seed_sample_data: true,
            log_filter: None,
            completion: CompletionConfig::default(),
        }
    }
}

impl ChatConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config = ChatConfig::from_json(r#"{ "database_path": "/data/UserDB" }"#).unwrap();

        assert_eq!(config.database_path, "/data/UserDB");
        assert!(config.seed_sample_data);
        assert_eq!(config.completion.model, DEFAULT_MODEL);
        assert_eq!(config.completion.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn nested_completion_fields_override_defaults() {
        let config = ChatConfig::from_json(
            r#"{ "seed_sample_data": false, "completion": { "model": "other", "api_key": "k" } }"#,
        )
        .unwrap();

        assert!(!config.seed_sample_data);
        assert_eq!(config.completion.model, "other");
        assert_eq!(config.completion.api_key, "k");
        assert_eq!(config.completion.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn explicit_api_key_wins_over_environment() {
        let config = CompletionConfig {
            api_key: "explicit".to_string(),
            ..CompletionConfig::default()
        }
        .with_env_api_key();

        assert_eq!(config.api_key, "explicit");
    }
}
