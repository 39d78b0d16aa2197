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

use crate::provide_credential::*;
use crate::{Credential, RequestSigner};
use edgegrid_core::{Error, ProvideCredential, Result};
use http::header::HeaderName;
use log::LevelFilter;
use std::time::Duration;

/// Where the client takes its credential from.
#[derive(Clone, Debug, Default)]
pub enum CredentialSource {
    /// Environment first, then `~/.edgerc` section `default`.
    #[default]
    Auto,
    /// Environment variables named `<prefix>_HOST` and so on.
    Env {
        /// Variable prefix, `AKAMAI` when `None`.
        prefix: Option<String>,
    },
    /// A section of an edgerc file.
    File {
        /// File path, `AKAMAI_EDGERC` or `~/.edgerc` when `None`.
        path: Option<String>,
        /// Section name, `AKAMAI_EDGERC_SECTION` or `default` when `None`.
        section: Option<String>,
    },
    /// An inline JSON credential object.
    Json(String),
    /// A credential already held by the caller.
    Static(Credential),
}

/// Config carries all the configuration of an EdgeGrid client.
#[derive(Clone, Debug)]
pub struct Config {
    /// Credential source, see [`CredentialSource`].
    pub source: CredentialSource,
    /// Names of the headers taking part in the signature, in emission order.
    ///
    /// - default to empty
    pub headers_to_sign: Vec<String>,
    /// Timeout applied to every request without its own timeout.
    ///
    /// - default to no timeout
    pub timeout: Option<Duration>,
    /// Verbosity of this client's request traces.
    ///
    /// - default to `Info`
    pub log_level: LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: CredentialSource::Auto,
            headers_to_sign: Vec::new(),
            timeout: None,
            log_level: LevelFilter::Info,
        }
    }
}

impl Config {
    /// Create a config reading credentials from `source`.
    pub fn from_source(source: CredentialSource) -> Self {
        Self {
            source,
            ..Default::default()
        }
    }

    /// Build the credential provider selected by `source`.
    pub fn provider(&self) -> Box<dyn ProvideCredential<Credential = Credential>> {
        match &self.source {
            CredentialSource::Auto => Box::new(DefaultCredentialProvider::new()),
            CredentialSource::Env { prefix } => {
                let provider = EnvCredentialProvider::new();
                match prefix {
                    Some(prefix) => Box::new(provider.with_prefix(prefix.clone())),
                    None => Box::new(provider),
                }
            }
            CredentialSource::File { path, section } => {
                let mut provider = EdgercCredentialProvider::new();
                if let Some(path) = path {
                    provider = provider.with_path(path.clone());
                }
                if let Some(section) = section {
                    provider = provider.with_section(section.clone());
                }
                Box::new(provider)
            }
            CredentialSource::Json(text) => Box::new(JsonCredentialProvider::new(text.clone())),
            CredentialSource::Static(cred) => Box::new(StaticCredentialProvider::new(cred.clone())),
        }
    }

    /// Build the request signer, validating `headers_to_sign`.
    pub fn request_signer(&self) -> Result<RequestSigner> {
        let headers = self
            .headers_to_sign
            .iter()
            .map(|name| {
                HeaderName::from_bytes(name.trim().as_bytes()).map_err(|e| {
                    Error::config_invalid(format!("invalid header to sign: {name:?}")).with_source(e)
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(RequestSigner::new().with_headers_to_sign(headers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edgegrid_core::{Context, ErrorKind, StaticEnv};
    use std::collections::HashMap;

    #[test]
    fn test_request_signer_validates_headers() {
        let config = Config {
            headers_to_sign: vec!["X-Custom".to_string(), " x-other ".to_string()],
            ..Default::default()
        };
        assert!(config.request_signer().is_ok());

        let config = Config {
            headers_to_sign: vec!["bad header".to_string()],
            ..Default::default()
        };
        let err = config.request_signer().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }

    #[tokio::test]
    async fn test_provider_dispatches_on_source() {
        let ctx = Context::new().with_env(StaticEnv {
            home_dir: None,
            envs: HashMap::from([
                ("EG_HOST".to_string(), "akab-host.example.net".to_string()),
                ("EG_CLIENT_TOKEN".to_string(), "ct".to_string()),
                ("EG_CLIENT_SECRET".to_string(), "cs".to_string()),
                ("EG_ACCESS_TOKEN".to_string(), "at".to_string()),
            ]),
        });

        let config = Config::from_source(CredentialSource::Env {
            prefix: Some("EG".to_string()),
        });
        let cred = config.provider().provide_credential(&ctx).await.unwrap().unwrap();
        assert_eq!(cred.client_token, "ct");

        let static_cred = Credential::new("akab-host.example.net", "a", "b", "c");
        let config = Config::from_source(CredentialSource::Static(static_cred.clone()));
        let cred = config.provider().provide_credential(&ctx).await.unwrap().unwrap();
        assert_eq!(cred, static_cred);

        let config = Config::from_source(CredentialSource::Json("{}".to_string()));
        let err = config.provider().provide_credential(&ctx).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CredentialMissingFields);
    }
}
