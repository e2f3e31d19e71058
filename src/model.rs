use std::fmt;

use crate::{FetchError, Result};

/// Environment variable consulted when no token is passed explicitly.
pub const TOKEN_ENV: &str = "civitai_token";

/// A CivitAI model-version id. Always a non-empty run of ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelId(String);

impl ModelId {
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(FetchError::InvalidInput(raw.to_string()));
        }
        Ok(Self(raw.to_string()))
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

/// API credential. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    /// Explicit value first, then the named environment variable.
    pub fn resolve(explicit: Option<&str>, env_var: &str) -> Result<Self> {
        let from_env = std::env::var(env_var).ok();
        Self::resolve_from(explicit, from_env.as_deref()).ok_or_else(|| FetchError::MissingCredential {
            env_var: env_var.to_string(),
        })
    }

    /// Empty strings count as absent.
    pub fn resolve_from(explicit: Option<&str>, env_value: Option<&str>) -> Option<Self> {
        explicit
            .filter(|t| !t.is_empty())
            .or(env_value.filter(|t| !t.is_empty()))
            .map(|t| Self(t.to_string()))
    }

    pub fn expose(&self) -> &str { &self.0 }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str("Token(***)") }
}
