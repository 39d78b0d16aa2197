// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use crate::constants::*;
use crate::Credential;
use async_trait::async_trait;
use edgegrid_core::{Context, Error, ProvideCredential, Result, SigningCredential};
use log::{debug, Level};

/// EnvCredentialProvider loads EdgeGrid credentials from environment variables.
///
/// With the default `AKAMAI` prefix this provider reads:
/// - `AKAMAI_HOST`
/// - `AKAMAI_CLIENT_TOKEN`
/// - `AKAMAI_CLIENT_SECRET`
/// - `AKAMAI_ACCESS_TOKEN`
/// - `AKAMAI_ACCOUNT_KEY` (optional)
///
/// Every absent variable is collected, and the provider fails with a single
/// missing fields error naming all of them.
#[derive(Debug, Clone)]
pub struct EnvCredentialProvider {
    prefix: String,
}

impl Default for EnvCredentialProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvCredentialProvider {
    /// Create a new EnvCredentialProvider using the `AKAMAI` prefix.
    pub fn new() -> Self {
        Self {
            prefix: ENV_DEFAULT_PREFIX.to_string(),
        }
    }

    /// Create a provider for an edgerc-style section name.
    ///
    /// `default` maps to `AKAMAI_*`, any other section `papi` maps to `AKAMAI_PAPI_*`.
    pub fn for_section(section: &str) -> Self {
        if section == EDGERC_DEFAULT_SECTION {
            return Self::new();
        }

        let section = section.to_ascii_uppercase().replace('-', "_");
        Self::new().with_prefix(format!("{ENV_DEFAULT_PREFIX}_{section}"))
    }

    /// Override the variable prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    fn var_name(&self, suffix: &str) -> String {
        format!("{}_{suffix}", self.prefix)
    }
}

#[async_trait]
impl ProvideCredential for EnvCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let mut missing = Vec::new();
        let mut read = |suffix: &str| {
            let name = self.var_name(suffix);
            match ctx.env_var(&name).filter(|v| !v.is_empty()) {
                Some(v) => v,
                None => {
                    missing.push(name);
                    String::new()
                }
            }
        };

        let host = read(ENV_HOST);
        let client_token = read(ENV_CLIENT_TOKEN);
        let client_secret = read(ENV_CLIENT_SECRET);
        let access_token = read(ENV_ACCESS_TOKEN);

        if !missing.is_empty() {
            if ctx.log_enabled(Level::Debug) {
                debug!("credential env vars missing: {missing:?}");
            }
            let names: Vec<&str> = missing.iter().map(String::as_str).collect();
            return Err(Error::credential_missing_fields(&names));
        }

        let cred = Credential::new(host, client_token, client_secret, access_token)
            .with_account_switch_key(
                ctx.env_var(&self.var_name(ENV_ACCOUNT_KEY))
                    .unwrap_or_default(),
            );
        cred.validate()?;

        if ctx.log_enabled(Level::Debug) {
            debug!("loaded credential from env with prefix {}", self.prefix);
        }
        Ok(Some(cred))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edgegrid_core::{ErrorKind, StaticEnv};
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn ctx_with(envs: &[(&str, &str)]) -> Context {
        Context::new().with_env(StaticEnv {
            home_dir: None,
            envs: envs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<HashMap<_, _>>(),
        })
    }

    #[tokio::test]
    async fn test_env_credential_provider() -> anyhow::Result<()> {
        let ctx = ctx_with(&[
            ("AKAMAI_HOST", "akab-host.example.net"),
            ("AKAMAI_CLIENT_TOKEN", "akab-client-token-xxx"),
            ("AKAMAI_CLIENT_SECRET", "SOMESECRET"),
            ("AKAMAI_ACCESS_TOKEN", "akab-access-token-xxx"),
            ("AKAMAI_ACCOUNT_KEY", "ACC-123"),
        ]);

        let cred = EnvCredentialProvider::new()
            .provide_credential(&ctx)
            .await?
            .expect("credential must be loaded");
        assert_eq!(cred.host, "akab-host.example.net");
        assert_eq!(cred.client_token, "akab-client-token-xxx");
        assert_eq!(cred.client_secret, "SOMESECRET");
        assert_eq!(cred.access_token, "akab-access-token-xxx");
        assert_eq!(cred.account_switch_key.as_deref(), Some("ACC-123"));
        Ok(())
    }

    #[tokio::test]
    async fn test_env_credential_provider_lists_all_missing() {
        let ctx = ctx_with(&[("AKAMAI_HOST", "akab-host.example.net")]);

        let err = EnvCredentialProvider::new()
            .provide_credential(&ctx)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CredentialMissingFields);
        assert_eq!(
            err.to_string(),
            "missing required credential fields: AKAMAI_CLIENT_TOKEN, AKAMAI_CLIENT_SECRET, AKAMAI_ACCESS_TOKEN"
        );
    }

    #[tokio::test]
    async fn test_env_credential_provider_rejects_scheme() {
        let ctx = ctx_with(&[
            ("AKAMAI_HOST", "https://akab-host.example.net"),
            ("AKAMAI_CLIENT_TOKEN", "ct"),
            ("AKAMAI_CLIENT_SECRET", "cs"),
            ("AKAMAI_ACCESS_TOKEN", "at"),
        ]);

        let err = EnvCredentialProvider::new()
            .provide_credential(&ctx)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CredentialInvalidHost);
    }

    #[tokio::test]
    async fn test_env_credential_provider_for_section() -> anyhow::Result<()> {
        let ctx = ctx_with(&[
            ("AKAMAI_PROPERTY_MANAGER_HOST", "akab-host.example.net"),
            ("AKAMAI_PROPERTY_MANAGER_CLIENT_TOKEN", "ct"),
            ("AKAMAI_PROPERTY_MANAGER_CLIENT_SECRET", "cs"),
            ("AKAMAI_PROPERTY_MANAGER_ACCESS_TOKEN", "at"),
        ]);

        let cred = EnvCredentialProvider::for_section("property-manager")
            .provide_credential(&ctx)
            .await?
            .expect("credential must be loaded");
        assert_eq!(cred.client_token, "ct");
        assert!(cred.account_switch_key.is_none());
        Ok(())
    }
}
