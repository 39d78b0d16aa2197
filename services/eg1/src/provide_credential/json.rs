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

use crate::Credential;
use async_trait::async_trait;
use edgegrid_core::{Context, ProvideCredential, Result};
use std::fmt::{Debug, Formatter};

/// JsonCredentialProvider parses an inline JSON credential object.
///
/// Keys are the lowercase field names: `host`, `client_token`,
/// `client_secret`, `access_token` and the optional `account_key`.
#[derive(Clone)]
pub struct JsonCredentialProvider {
    text: String,
}

impl Debug for JsonCredentialProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonCredentialProvider")
            .field("len", &self.text.len())
            .finish()
    }
}

impl JsonCredentialProvider {
    /// Create a new JsonCredentialProvider from JSON text.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[async_trait]
impl ProvideCredential for JsonCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
        Credential::from_json(&self.text).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edgegrid_core::ErrorKind;

    #[tokio::test]
    async fn test_json_credential_provider() {
        let provider = JsonCredentialProvider::new(
            r#"{"host":"akab-host.example.net","client_token":"ct","client_secret":"SOMESECRET","access_token":"at"}"#,
        );
        assert!(!format!("{provider:?}").contains("SOMESECRET"));

        let cred = provider
            .provide_credential(&Context::new())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(cred.client_secret, "SOMESECRET");
    }

    #[tokio::test]
    async fn test_json_credential_provider_rejects_scheme() {
        let provider = JsonCredentialProvider::new(
            r#"{"host":"http://akab-host.example.net","client_token":"ct","client_secret":"cs","access_token":"at"}"#,
        );
        let err = provider.provide_credential(&Context::new()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CredentialInvalidHost);
        assert!(err.to_string().contains("found http"));
    }
}
