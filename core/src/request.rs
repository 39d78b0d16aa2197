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

use std::mem;
use std::str::FromStr;

use http::uri::Authority;
use http::uri::PathAndQuery;
use http::uri::Scheme;
use http::HeaderMap;
use http::Method;
use http::Uri;

use crate::{Error, Result};

/// Signing context for request.
///
/// The path and query are kept exactly as they appear on the wire: nothing is
/// decoded or re-encoded between [`SigningRequest::build`] and
/// [`SigningRequest::apply`].
#[derive(Debug)]
pub struct SigningRequest {
    /// HTTP method.
    pub method: Method,
    /// HTTP scheme.
    pub scheme: Scheme,
    /// HTTP authority.
    pub authority: Authority,
    /// HTTP path, already percent-encoded by the caller.
    pub path: String,
    /// Raw query string without the leading `?`.
    pub query: Option<String>,
    /// HTTP headers.
    pub headers: HeaderMap,
}

impl SigningRequest {
    /// Build a signing context from http::request::Parts.
    pub fn build(parts: &mut http::request::Parts) -> Result<Self> {
        let uri = mem::take(&mut parts.uri).into_parts();
        let paq = uri
            .path_and_query
            .unwrap_or_else(|| PathAndQuery::from_static("/"));

        Ok(SigningRequest {
            method: parts.method.clone(),
            scheme: uri
                .scheme
                .ok_or_else(|| Error::request_invalid("request without scheme is invalid for signing"))?,
            authority: uri.authority.ok_or_else(|| {
                Error::request_invalid("request without authority is invalid for signing")
            })?,
            path: paq.path().to_string(),
            query: paq.query().map(|v| v.to_string()),

            // Take the headers out of the request to avoid copy.
            // We will return it back when apply the context.
            headers: mem::take(&mut parts.headers),
        })
    }

    /// Apply the signing context back to http::request::Parts.
    pub fn apply(mut self, parts: &mut http::request::Parts) -> Result<()> {
        let paq = PathAndQuery::from_str(&self.path_and_query())?;

        // Return headers back.
        mem::swap(&mut parts.headers, &mut self.headers);
        parts.method = self.method;
        parts.uri = {
            let mut uri_parts = mem::take(&mut parts.uri).into_parts();
            uri_parts.scheme = Some(self.scheme);
            uri_parts.authority = Some(self.authority);
            uri_parts.path_and_query = Some(paq);
            Uri::from_parts(uri_parts)?
        };

        Ok(())
    }

    /// Path followed by `?query` when a non-empty query is present.
    pub fn path_and_query(&self) -> String {
        match self.query.as_deref() {
            Some(q) if !q.is_empty() => format!("{}?{}", self.path, q),
            _ => self.path.clone(),
        }
    }

    /// Append a query pair after any existing query parameters.
    ///
    /// Key and value are form-urlencoded; existing parameters are left untouched.
    pub fn query_push(&mut self, key: &str, value: &str) {
        let pair = form_urlencoded::Serializer::new(String::new())
            .append_pair(key, value)
            .finish();

        self.query = Some(match self.query.take() {
            Some(q) if !q.is_empty() => format!("{q}&{pair}"),
            _ => pair,
        });
    }

    /// Check whether the query already carries the given key.
    pub fn query_contains(&self, key: &str) -> bool {
        self.query
            .as_deref()
            .map(|q| form_urlencoded::parse(q.as_bytes()).any(|(k, _)| k == key))
            .unwrap_or(false)
    }

    /// Collapse every run of whitespace into a single space and trim both ends.
    ///
    /// Works on raw bytes so obs-text values survive untouched.
    pub fn header_value_compress(v: &[u8]) -> Vec<u8> {
        v.split(|b| b.is_ascii_whitespace())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(&b' ')
    }
}
