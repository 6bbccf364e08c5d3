// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Process-wide secret material, injected rather than read through hidden
//! globals so the crypto and broker paths stay testable.

use super::ConfigError;
use std::collections::HashMap;
use std::sync::Once;

static LOAD_DOTENV: Once = Once::new();

/// Named secret values (AES key, RSA PEM blocks, broker password).
///
/// Production use resolves from the process environment (with `.env` support);
/// tests build one from literal pairs.
#[derive(Clone, Default)]
pub struct SecretStore {
    overrides: HashMap<String, String>,
    use_env: bool,
}

// Secret values stay out of Debug output; only the key names show.
impl std::fmt::Debug for SecretStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretStore")
            .field("names", &self.overrides.keys().collect::<Vec<_>>())
            .field("use_env", &self.use_env)
            .finish()
    }
}

impl SecretStore {
    /// Resolve secrets from the process environment. Loads `.env` once per
    /// process, matching how the rest of the harness picks up local overrides.
    pub fn from_env() -> Self {
        LOAD_DOTENV.call_once(|| {
            let _ = dotenv::dotenv();
        });
        Self {
            overrides: HashMap::new(),
            use_env: true,
        }
    }

    /// Build a store from literal name/value pairs. Environment variables are
    /// not consulted, so tests are hermetic.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            overrides: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            use_env: false,
        }
    }

    /// Look up a secret, `None` if absent.
    pub fn get_opt(&self, name: &str) -> Option<String> {
        if let Some(v) = self.overrides.get(name) {
            return Some(v.clone());
        }
        if self.use_env {
            return std::env::var(name).ok();
        }
        None
    }

    /// Look up a required secret.
    pub fn get(&self, name: &str) -> Result<String, ConfigError> {
        self.get_opt(name).ok_or_else(|| ConfigError::MissingSecret {
            name: name.to_string(),
        })
    }
}
