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

use crate::ApiRequest;
use edgegrid_core::{Error, Result};
use http::Method;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left as-is inside a path segment.
static PATH_SEGMENT_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Endpoint describes one API operation as data.
///
/// `path` may carry `{name}` placeholders which [`Endpoint::request`] fills
/// with percent-encoded path segments.
///
/// ```
/// use edgegrid_eg1::Endpoint;
/// use http::Method;
///
/// const GET_NETWORK_LIST: Endpoint =
///     Endpoint::new(Method::GET, "/network-list/v2/network-lists/{id}");
///
/// let req = GET_NETWORK_LIST.request(&[("id", "123_ABC")]).unwrap();
/// assert_eq!(req.path(), "/network-list/v2/network-lists/123_ABC");
/// ```
#[derive(Debug, Clone)]
pub struct Endpoint {
    method: Method,
    path: &'static str,
}

impl Endpoint {
    /// Create a new endpoint descriptor.
    pub const fn new(method: Method, path: &'static str) -> Self {
        Self { method, path }
    }

    /// HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Path template.
    pub fn path(&self) -> &'static str {
        self.path
    }

    /// Fill the path template and return a request for it.
    ///
    /// Every placeholder must be given; extra params are rejected as well.
    pub fn request(&self, params: &[(&str, &str)]) -> Result<ApiRequest> {
        let mut path = String::with_capacity(self.path.len());
        let mut used = 0;
        let mut rest = self.path;

        while let Some(start) = rest.find('{') {
            let end = rest[start..].find('}').ok_or_else(|| {
                Error::request_invalid(format!("unclosed placeholder in {:?}", self.path))
            })?;
            let name = &rest[start + 1..start + end];
            let value = params
                .iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| *v)
                .ok_or_else(|| {
                    Error::request_invalid(format!(
                        "missing value for {{{name}}} in {:?}",
                        self.path
                    ))
                })?;
            if value.is_empty() {
                return Err(Error::request_invalid(format!(
                    "empty value for {{{name}}} in {:?}",
                    self.path
                )));
            }

            path.push_str(&rest[..start]);
            path.extend(utf8_percent_encode(value, &PATH_SEGMENT_ENCODE_SET));
            used += 1;
            rest = &rest[start + end + 1..];
        }
        path.push_str(rest);

        if used < params.len() {
            let unknown: Vec<&str> = params
                .iter()
                .map(|(k, _)| *k)
                .filter(|k| !self.path.contains(&format!("{{{k}}}")))
                .collect();
            if !unknown.is_empty() {
                return Err(Error::request_invalid(format!(
                    "unknown placeholders {unknown:?} for {:?}",
                    self.path
                )));
            }
        }

        Ok(ApiRequest::new(self.method.clone(), path))
    }
}
