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
use http::{HeaderMap, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// ApiResponse is a response with a success status.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl ApiResponse {
    pub(crate) fn from_http(resp: http::Response<Bytes>) -> Self {
        let (parts, body) = resp.into_parts();
        Self {
            status: parts.status,
            headers: parts.headers,
            body,
        }
    }

    /// Response status.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Response body.
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Consume the response into its body.
    pub fn into_body(self) -> Bytes {
        self.body
    }

    /// Decode the body as JSON. An empty body decodes as `null`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        let body: &[u8] = if self.body.iter().all(u8::is_ascii_whitespace) {
            b"null"
        } else {
            &self.body
        };

        serde_json::from_slice(body).map_err(|e| {
            Error::response_decode(format!(
                "failed to decode {} response body: {e}",
                self.status.as_u16()
            ))
            .with_source(e)
        })
    }
}

/// ErrorEnvelope describes a response outside the success statuses.
///
/// Fields follow the API's problem details object. When the body is not such
/// an object, `status` and `title` come from the HTTP status line and
/// `detail` carries the raw body text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ErrorEnvelope {
    /// Problem type URI.
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    pub instance: String,
    /// Method as reported by the server.
    pub method: String,
    pub server_ip: String,
    pub client_ip: String,
    pub request_id: String,
    pub request_time: String,

    #[serde(skip)]
    request_method: String,
    #[serde(skip)]
    request_url: String,
    #[serde(skip)]
    response: Option<ApiResponse>,
}

impl ErrorEnvelope {
    /// Build an envelope from a failed response.
    ///
    /// `url` is the request URL without its query.
    pub fn from_response(method: &Method, url: &str, resp: http::Response<Bytes>) -> Self {
        let resp = ApiResponse::from_http(resp);
        let status = resp.status();

        let mut envelope = serde_json::from_slice::<ErrorEnvelope>(resp.body())
            .unwrap_or_else(|_| ErrorEnvelope {
                title: status.canonical_reason().unwrap_or_default().to_string(),
                detail: String::from_utf8_lossy(resp.body()).trim().to_string(),
                ..Default::default()
            });
        if envelope.status == 0 {
            envelope.status = status.as_u16();
        }
        if envelope.title.is_empty() {
            envelope.title = status.canonical_reason().unwrap_or_default().to_string();
        }

        envelope.request_method = method.to_string();
        envelope.request_url = url.to_string();
        envelope.response = Some(resp);
        envelope
    }

    /// Find the envelope carried by an `Api` error.
    pub fn from_error(err: &Error) -> Option<&ErrorEnvelope> {
        err.source_as::<ErrorEnvelope>()
    }

    /// The response this envelope was built from.
    pub fn response(&self) -> Option<&ApiResponse> {
        self.response.as_ref()
    }
}

impl Display for ErrorEnvelope {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let detail = if self.detail.is_empty() {
            &self.title
        } else {
            &self.detail
        };
        write!(
            f,
            "{} {}: {} {}",
            self.request_method, self.request_url, self.status, detail
        )
    }
}

impl std::error::Error for ErrorEnvelope {}

#[cfg(test)]
mod tests {
    use super::*;
    use edgegrid_core::ErrorKind;
    use pretty_assertions::assert_eq;

    fn response(status: u16, body: &'static str) -> http::Response<Bytes> {
        http::Response::builder()
            .status(status)
            .body(Bytes::from_static(body.as_bytes()))
            .unwrap()
    }

    #[test]
    fn test_envelope_from_problem_details() {
        let envelope = ErrorEnvelope::from_response(
            &Method::GET,
            "https://akab-host.example.net/foo",
            response(
                403,
                r#"{"type":"/denied","title":"Forbidden","status":403,"detail":"no access","requestId":"abc","serverIp":"10.0.0.1"}"#,
            ),
        );

        assert_eq!(
            envelope.to_string(),
            "GET https://akab-host.example.net/foo: 403 no access"
        );
        assert_eq!(envelope.kind, "/denied");
        assert_eq!(envelope.request_id, "abc");
        assert_eq!(envelope.server_ip, "10.0.0.1");
        assert_eq!(envelope.response().unwrap().status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_envelope_from_plain_body() {
        let envelope = ErrorEnvelope::from_response(
            &Method::POST,
            "https://akab-host.example.net/foo",
            response(502, "upstream unavailable\n"),
        );

        assert_eq!(envelope.status, 502);
        assert_eq!(envelope.title, "Bad Gateway");
        assert_eq!(
            envelope.to_string(),
            "POST https://akab-host.example.net/foo: 502 upstream unavailable"
        );

        let envelope = ErrorEnvelope::from_response(
            &Method::GET,
            "https://akab-host.example.net/foo",
            response(500, ""),
        );
        assert_eq!(
            envelope.to_string(),
            "GET https://akab-host.example.net/foo: 500 Internal Server Error"
        );
    }

    #[test]
    fn test_envelope_round_trips_through_error() {
        let envelope = ErrorEnvelope::from_response(
            &Method::GET,
            "https://akab-host.example.net/foo",
            response(404, r#"{"title":"Not Found"}"#),
        );
        let err = Error::api(envelope.to_string()).with_source(envelope);

        assert_eq!(err.kind(), ErrorKind::Api);
        assert_eq!(ErrorEnvelope::from_error(&err).unwrap().status, 404);
    }

    #[test]
    fn test_json_decoding() {
        let resp = ApiResponse::from_http(response(200, r#"{"x":1}"#));
        let v: serde_json::Value = resp.json().unwrap();
        assert_eq!(v["x"], 1);

        let resp = ApiResponse::from_http(response(204, ""));
        let v: Option<u32> = resp.json().unwrap();
        assert_eq!(v, None);

        let resp = ApiResponse::from_http(response(200, "not json"));
        let err = resp.json::<serde_json::Value>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ResponseDecode);
    }
}
