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

use crate::{Context, Error, ProvideCredential, Result};
use async_trait::async_trait;
use log::Level;
use std::fmt::{self, Debug};

/// A chain of credential providers that will be tried in order.
///
/// The first provider returning a credential wins. Errors from a provider are
/// logged and the chain moves on; if nothing yields a credential, the last
/// error seen is returned so callers learn why acquisition failed.
///
/// Logging honours [`Context::log_enabled`].
pub struct ProvideCredentialChain<C>
where
    C: Send + Sync + Unpin + 'static,
{
    providers: Vec<Box<dyn ProvideCredential<Credential = C>>>,
}

impl<C> ProvideCredentialChain<C>
where
    C: Send + Sync + Unpin + 'static,
{
    /// Create a new empty credential provider chain.
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// Add a credential provider to the chain.
    pub fn push(mut self, provider: impl ProvideCredential<Credential = C>) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    /// Add a credential provider to the front of the chain.
    pub fn push_front(mut self, provider: impl ProvideCredential<Credential = C>) -> Self {
        self.providers.insert(0, Box::new(provider));
        self
    }

    /// Create a credential provider chain from a vector of providers.
    pub fn from_vec(providers: Vec<Box<dyn ProvideCredential<Credential = C>>>) -> Self {
        Self { providers }
    }

    /// Number of providers in this chain.
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Returns true if the chain holds no provider.
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl<C> Default for ProvideCredentialChain<C>
where
    C: Send + Sync + Unpin + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Debug for ProvideCredentialChain<C>
where
    C: Send + Sync + Unpin + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProvideCredentialChain")
            .field("providers", &self.providers)
            .finish()
    }
}

#[async_trait]
impl<C> ProvideCredential for ProvideCredentialChain<C>
where
    C: Send + Sync + Unpin + 'static,
{
    type Credential = C;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let mut last_err: Option<Error> = None;

        for provider in &self.providers {
            if ctx.log_enabled(Level::Debug) {
                log::debug!("trying credential provider: {provider:?}");
            }

            match provider.provide_credential(ctx).await {
                Ok(Some(cred)) => {
                    if ctx.log_enabled(Level::Debug) {
                        log::debug!("loaded credential from provider: {provider:?}");
                    }
                    return Ok(Some(cred));
                }
                Ok(None) => {
                    if ctx.log_enabled(Level::Debug) {
                        log::debug!("no credential found in provider: {provider:?}");
                    }
                }
                Err(err) => {
                    if ctx.log_enabled(Level::Warn) {
                        log::warn!("failed to load credential from provider {provider:?}: {err}");
                    }
                    last_err = Some(err);
                }
            }
        }

        match last_err {
            Some(err) => Err(err),
            None => Ok(None),
        }
    }
}
