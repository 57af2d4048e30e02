use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::domain::TokenStore;

// On-disk layout:
//
// [tokens]
// "<twitch user id>" = "<user access token>"
#[derive(Debug, Default, Deserialize)]
struct TokenFile {
    #[serde(default)]
    tokens: HashMap<String, String>,
}

pub fn parse_tokens(contents: &str) -> Result<HashMap<String, String>, toml::de::Error> {
    toml::from_str::<TokenFile>(contents).map(|file| file.tokens)
}

// Reads user tokens from a TOML file kept current by the login flow.
// The file is re-read on every lookup so refreshed tokens are picked up.
#[derive(Clone, Debug)]
pub struct TomlTokenStore {
    pub path: PathBuf,
}

impl TomlTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl TokenStore for TomlTokenStore {
    async fn user_token(&self, user_id: &str) -> Result<Option<String>, String> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "token file missing");
                return Ok(None);
            }
            Err(err) => return Err(format!("failed to read token file: {err}")),
        };

        let mut tokens =
            parse_tokens(&contents).map_err(|err| format!("failed to parse token file: {err}"))?;
        Ok(tokens.remove(user_id).filter(|token| !token.is_empty()))
    }
}
