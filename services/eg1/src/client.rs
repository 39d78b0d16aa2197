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

use crate::constants::SUCCESS_STATUSES;
use crate::{ApiRequest, ApiResponse, Config, Credential, ErrorEnvelope};
use edgegrid_core::{Context, Error, HttpSend, Result, Signer};
use log::{log, Level, LevelFilter};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Client is the signed transport for the EdgeGrid API.
///
/// The credential is loaded and validated once, when the client is built.
/// Client is cheap to clone; clones share the credential and the HTTP client.
#[derive(Clone, Debug)]
pub struct Client {
    signer: Signer<Credential>,
    timeout: Option<Duration>,
}

impl Client {
    /// Load the credential selected by `config` and create a client.
    ///
    /// Fails with the credential error when acquisition or validation fails.
    /// `config.log_level` caps every log line emitted for this client,
    /// including those of credential loading and signing.
    pub async fn new(ctx: Context, config: &Config) -> Result<Self> {
        let ctx = ctx.with_log_level(config.log_level);
        let builder = config.request_signer()?;
        let signer = Signer::load(ctx, config.provider(), builder).await?;

        Ok(Self::from_signer(signer).with_timeout(config.timeout))
    }

    /// Create a client from a ready signer, sending through the signer's context.
    pub fn from_signer(signer: Signer<Credential>) -> Self {
        Self {
            signer,
            timeout: None,
        }
    }

    /// Send requests through `http` instead of the context's HTTP client.
    pub fn with_http_send(mut self, http: impl HttpSend) -> Self {
        let ctx = self.context().clone().with_http_send(http);
        self.signer = self.signer.with_context(ctx);
        self
    }

    /// Timeout applied to requests without their own.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Verbosity of this client's logs, signing included.
    pub fn with_log_level(mut self, level: LevelFilter) -> Self {
        let ctx = self.context().clone().with_log_level(level);
        self.signer = self.signer.with_context(ctx);
        self
    }

    /// The context requests are signed and sent with.
    pub fn context(&self) -> &Context {
        self.signer.context()
    }

    /// The credential used by this client.
    pub fn credential(&self) -> &Credential {
        self.signer.credential()
    }

    /// `https://<host>`
    pub fn base_url(&self) -> String {
        format!("https://{}", self.credential().host)
    }

    /// Sign and send `req`.
    ///
    /// Statuses 200, 201, 202, 204 and 304 are success, anything else is an
    /// `Api` error carrying an [`ErrorEnvelope`].
    pub async fn send(&self, req: ApiRequest) -> Result<ApiResponse> {
        let timeout = req.timeout_value().or(self.timeout);
        let cancel = req.cancel_value();

        let (mut parts, body) = req.to_http(&self.credential().host)?.into_parts();
        self.signer.sign(&mut parts, &body).await?;

        let method = parts.method.clone();
        let url = format!(
            "{}://{}{}",
            parts.uri.scheme_str().unwrap_or("https"),
            parts.uri.authority().map(|a| a.as_str()).unwrap_or_default(),
            parts.uri.path()
        );
        self.trace(Level::Debug, format_args!("sending {method} {}", parts.uri));

        let fut = async {
            let fut = self.context().http_send(http::Request::from_parts(parts, body));
            match timeout {
                Some(t) => match tokio::time::timeout(t, fut).await {
                    Ok(resp) => resp,
                    Err(_) => Err(Error::transport_canceled(format!(
                        "{method} {url} timed out after {t:?}"
                    ))),
                },
                None => fut.await,
            }
        };
        let resp = match cancel {
            Some(token) => tokio::select! {
                biased;
                _ = token.cancelled() => {
                    return Err(Error::transport_canceled(format!("{method} {url} canceled")));
                }
                resp = fut => resp?,
            },
            None => fut.await?,
        };

        let status = resp.status();
        self.trace(
            Level::Debug,
            format_args!("{method} {url} returned {}", status.as_u16()),
        );
        if SUCCESS_STATUSES.contains(&status.as_u16()) {
            return Ok(ApiResponse::from_http(resp));
        }

        let envelope = ErrorEnvelope::from_response(&method, &url, resp);
        self.trace(Level::Warn, format_args!("{envelope}"));
        Err(Error::api(envelope.to_string()).with_source(envelope))
    }

    /// Sign and send `req`, then decode the JSON body into `T`.
    pub async fn send_json<T: DeserializeOwned>(&self, req: ApiRequest) -> Result<T> {
        self.send(req).await?.json()
    }

    fn trace(&self, level: Level, args: std::fmt::Arguments<'_>) {
        if self.context().log_enabled(level) {
            log!(level, "{args}");
        }
    }
}
