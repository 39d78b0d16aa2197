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

use crate::{Context, Error, ProvideCredential, Result, SignRequest, SigningCredential};
use std::sync::Arc;

/// Signer is the main struct used to sign the request.
///
/// The credential is acquired and validated once, when the signer is built,
/// and is shared read-only by every request signed afterwards.
#[derive(Clone, Debug)]
pub struct Signer<K: SigningCredential> {
    ctx: Context,
    credential: Arc<K>,
    builder: Arc<dyn SignRequest<Credential = K>>,
}

impl<K: SigningCredential> Signer<K> {
    /// Create a new signer from an already loaded credential.
    pub fn new(
        ctx: Context,
        credential: K,
        builder: impl SignRequest<Credential = K>,
    ) -> Result<Self> {
        credential.validate()?;

        Ok(Self {
            ctx,
            credential: Arc::new(credential),
            builder: Arc::new(builder),
        })
    }

    /// Load the credential from `provider` and create a new signer.
    ///
    /// Returns `CredentialMissing` if the provider finds nothing.
    pub async fn load(
        ctx: Context,
        provider: impl ProvideCredential<Credential = K>,
        builder: impl SignRequest<Credential = K>,
    ) -> Result<Self> {
        let credential = provider.provide_credential(&ctx).await?.ok_or_else(|| {
            Error::credential_missing(format!("no credential found by {provider:?}"))
        })?;

        Self::new(ctx, credential, builder)
    }

    /// The credential used by this signer.
    pub fn credential(&self) -> &K {
        &self.credential
    }

    /// The context used by this signer.
    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// Replace the context used for signing.
    pub fn with_context(mut self, ctx: Context) -> Self {
        self.ctx = ctx;
        self
    }

    /// Sign the request.
    ///
    /// `body` must be the exact payload that will be sent with `req`.
    pub async fn sign(&self, req: &mut http::request::Parts, body: &[u8]) -> Result<()> {
        self.builder
            .sign_request(&self.ctx, req, body, &self.credential)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use async_trait::async_trait;

    #[derive(Clone, Debug)]
    struct Token(String);

    impl SigningCredential for Token {
        fn validate(&self) -> Result<()> {
            if self.0.is_empty() {
                return Err(Error::credential_missing_fields(&["token"]));
            }
            Ok(())
        }
    }

    #[derive(Debug)]
    struct Nothing;

    #[async_trait]
    impl ProvideCredential for Nothing {
        type Credential = Token;

        async fn provide_credential(&self, _: &Context) -> Result<Option<Token>> {
            Ok(None)
        }
    }

    #[derive(Debug)]
    struct BodyLength;

    #[async_trait]
    impl SignRequest for BodyLength {
        type Credential = Token;

        async fn sign_request(
            &self,
            _: &Context,
            req: &mut http::request::Parts,
            body: &[u8],
            cred: &Token,
        ) -> Result<()> {
            req.headers
                .insert("x-signed", format!("{}:{}", cred.0, body.len()).parse()?);
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_sign_sees_body() {
        let signer = Signer::new(Context::new(), Token("t".to_string()), BodyLength).unwrap();
        let mut parts = http::Request::new(()).into_parts().0;

        signer.sign(&mut parts, b"hello").await.unwrap();
        assert_eq!(parts.headers.get("x-signed").unwrap(), "t:5");
    }

    #[test]
    fn test_with_context_replaces_context() {
        let signer = Signer::new(Context::new(), Token("t".to_string()), BodyLength).unwrap();
        assert!(signer.context().log_enabled(log::Level::Debug));

        let ctx = signer.context().clone().with_log_level(log::LevelFilter::Off);
        let signer = signer.with_context(ctx);
        assert!(!signer.context().log_enabled(log::Level::Error));
        assert_eq!(signer.credential().0, "t");
    }

    #[tokio::test]
    async fn test_load_without_credential() {
        let err = Signer::load(Context::new(), Nothing, BodyLength)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CredentialMissing);
    }

    #[test]
    fn test_new_rejects_invalid_credential() {
        let err = Signer::new(Context::new(), Token(String::new()), BodyLength).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CredentialMissingFields);
    }
}
