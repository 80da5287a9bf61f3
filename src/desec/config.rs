use crate::common::{key_file_or_string, ConfigSnafu, Result};

const API_TOKEN_LEN: usize = 28;

#[derive(Clone, serde::Deserialize)]
pub struct Config {
    /// Either the token itself or `@/path/to/file` holding it.
    pub api_token: String,
    pub api_uri: Option<url::Url>,
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Resolves the token from its file if needed and checks its shape.
    pub(super) fn resolve_api_token(&self) -> Result<String> {
        let token = key_file_or_string(self.api_token.clone(), "desec.api_token")?;
        if token.is_empty() {
            return ConfigSnafu {
                message: "missing api token",
                prefix: "desec.api_token",
            }
            .fail();
        }
        let well_formed = token.len() == API_TOKEN_LEN
            && token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !well_formed {
            return ConfigSnafu {
                message: "API key looks invalid",
                prefix: "desec.api_token",
            }
            .fail();
        }
        Ok(token)
    }
}
