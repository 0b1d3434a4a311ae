//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# BroTech assistant configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[chat]
# model = "gemini-2.5-flash"
# api_key_env = "API_KEY"        # falls back to GEMINI_API_KEY
# max_tokens = 4096              # 1-65536
# temperature = 0.7              # 0.0-2.0
# response_timeout_secs = 60     # 0 waits forever
# history_key = "chatHistory"
# system_prompt = "You are Tech Bro, ..."

[storage]
# backend = "file"               # file | memory
# dir = ""                       # empty uses the platform cache dir

[logging]
# level = "info"                 # trace | debug | info | warn | error
"##
    .to_string()
}
