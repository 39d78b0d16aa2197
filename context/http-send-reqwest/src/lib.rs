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

//! Reqwest-based HTTP sending implementation for edgegrid.
//!
//! `ReqwestHttpSend` wraps a pooled `reqwest::Client`. The client is safe to
//! share across concurrent requests, so one instance should back every
//! `Context` of a process.

use async_trait::async_trait;
use bytes::Bytes;
use edgegrid_core::{Error, HttpSend, Result};
use http_body_util::BodyExt;
use reqwest::{Client, Request};

/// Reqwest-based implementation of the `HttpSend` trait.
#[derive(Debug, Default, Clone)]
pub struct ReqwestHttpSend {
    client: Client,
}

impl ReqwestHttpSend {
    /// Create a new ReqwestHttpSend with a reqwest::Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpSend for ReqwestHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let req = Request::try_from(req)
            .map_err(|e| Error::request_invalid("failed to convert request").with_source(e))?;
        let resp: http::Response<_> = self
            .client
            .execute(req)
            .await
            .map_err(from_reqwest_error)?
            .into();

        let (parts, body) = resp.into_parts();
        let bs = BodyExt::collect(body)
            .await
            .map(|buf| buf.to_bytes())
            .map_err(from_reqwest_error)?;
        Ok(http::Response::from_parts(parts, bs))
    }
}

fn from_reqwest_error(err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::transport_canceled("request timed out").with_source(err)
    } else if err.is_builder() {
        Error::request_invalid("failed to build request").with_source(err)
    } else {
        Error::transport_network(format!("failed to send request: {err}")).with_source(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edgegrid_core::ErrorKind;

    #[tokio::test]
    async fn test_connection_refused_is_network_error() -> anyhow::Result<()> {
        // Port 9 (discard) is closed on any sane test host.
        let req = http::Request::builder()
            .uri("http://127.0.0.1:9/")
            .body(Bytes::new())?;

        let err = ReqwestHttpSend::default().http_send(req).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TransportNetwork);
        Ok(())
    }
}
