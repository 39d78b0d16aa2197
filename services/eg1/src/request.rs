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

use bytes::Bytes;
use edgegrid_core::{Error, Result};
use http::header::{HeaderName, CONTENT_TYPE};
use http::{HeaderMap, HeaderValue, Method, Uri};
use serde::Serialize;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// ApiRequest describes one call against the EdgeGrid API.
///
/// The body is always fully buffered: the content hash covers every byte,
/// so streaming uploads cannot be signed.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    headers: HeaderMap,
    body: Bytes,
    timeout: Option<Duration>,
    cancel: Option<CancellationToken>,
}

impl ApiRequest {
    /// Create a request for `path`, relative to `https://<host>`.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: HeaderMap::new(),
            body: Bytes::new(),
            timeout: None,
            cancel: None,
        }
    }

    /// Create a `GET` request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// Create a `POST` request.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Create a `PUT` request.
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    /// Create a `DELETE` request.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Create a `PATCH` request.
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    /// Append a query pair.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Append every field of `params` as query pairs.
    pub fn query_params<T: Serialize + ?Sized>(mut self, params: &T) -> Result<Self> {
        let encoded = serde_urlencoded::to_string(params).map_err(|e| {
            Error::request_invalid("failed to encode query parameters").with_source(e)
        })?;
        self.query.extend(form_urlencoded::parse(encoded.as_bytes()).into_owned());
        Ok(self)
    }

    /// Set a header, replacing any previous value.
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Serialize `value` as the JSON body and set `Content-Type: application/json`.
    pub fn json<T: Serialize + ?Sized>(mut self, value: &T) -> Result<Self> {
        let body = serde_json::to_vec(value)
            .map_err(|e| Error::request_invalid("failed to serialize request body").with_source(e))?;
        self.body = body.into();
        self.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(self)
    }

    /// Set a raw body.
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Abort the request when it takes longer than `timeout`.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Abort the request when `token` is cancelled.
    pub fn cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Path as given by the caller.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Buffered body.
    pub fn body_bytes(&self) -> &Bytes {
        &self.body
    }

    pub(crate) fn timeout_value(&self) -> Option<Duration> {
        self.timeout
    }

    pub(crate) fn cancel_value(&self) -> Option<CancellationToken> {
        self.cancel.clone()
    }

    /// Resolve the full URL against `https://<host>`.
    ///
    /// The path keeps its encoding; leading slashes collapse into one.
    pub fn url(&self, host: &str) -> Result<Uri> {
        if self.path.contains('#') {
            return Err(Error::request_invalid(format!(
                "path {:?} must not contain a fragment",
                self.path
            )));
        }
        let only_path = self.path.split('?').next().unwrap_or_default();
        let has_scheme = Uri::try_from(only_path)
            .map(|uri| uri.scheme().is_some())
            .unwrap_or(false);
        if has_scheme {
            return Err(Error::request_invalid(format!(
                "path {:?} must not contain a scheme",
                self.path
            )));
        }

        let mut url = format!("https://{host}/{}", self.path.trim_start_matches('/'));
        if !self.query.is_empty() {
            let mut ser = form_urlencoded::Serializer::new(String::new());
            ser.extend_pairs(&self.query);
            if !url.contains('?') {
                url.push('?');
            } else if !url.ends_with('?') && !url.ends_with('&') {
                url.push('&');
            }
            url.push_str(&ser.finish());
        }

        Uri::try_from(url.as_str()).map_err(|e| {
            Error::request_invalid(format!("invalid request url {url:?}")).with_source(e)
        })
    }

    /// Build the unsigned http request.
    pub fn to_http(&self, host: &str) -> Result<http::Request<Bytes>> {
        let mut req = http::Request::builder()
            .method(self.method.clone())
            .uri(self.url(host)?)
            .body(self.body.clone())?;
        *req.headers_mut() = self.headers.clone();
        Ok(req)
    }
}
