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

use crate::{Context, Result};
use std::fmt::Debug;

/// SigningCredential is the trait used by signer as the signing credential.
pub trait SigningCredential: Clone + Debug + Send + Sync + Unpin + 'static {
    /// Check the credential, returning the first problem found.
    fn validate(&self) -> Result<()>;

    /// Check if the credential is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

/// ProvideCredential is the trait used by signer to load the credential from the environment.
///
/// A provider returns `Ok(None)` when its source simply holds nothing, and an
/// error when the source exists but cannot produce a valid credential.
#[async_trait::async_trait]
pub trait ProvideCredential: Debug + Send + Sync + Unpin + 'static {
    /// Credential returned by this provider.
    type Credential: Send + Sync + Unpin + 'static;

    /// Load signing credential from current env.
    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>>;
}

#[async_trait::async_trait]
impl<P> ProvideCredential for Box<P>
where
    P: ProvideCredential + ?Sized,
{
    type Credential = P::Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        (**self).provide_credential(ctx).await
    }
}

/// SignRequest is the trait used by signer to sign the request.
#[async_trait::async_trait]
pub trait SignRequest: Debug + Send + Sync + Unpin + 'static {
    /// Credential used by this builder.
    type Credential: Send + Sync + Unpin + 'static;

    /// Sign the request in place.
    ///
    /// ## Body
    ///
    /// `body` must be exactly the bytes that will be transmitted with `req`.
    /// Schemes that hash the payload read it from here, so the caller has to
    /// materialize the body before signing.
    async fn sign_request(
        &self,
        ctx: &Context,
        req: &mut http::request::Parts,
        body: &[u8],
        credential: &Self::Credential,
    ) -> Result<()>;
}
