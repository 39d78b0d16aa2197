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

//! Pure functions producing the exact byte string signed by EG1-HMAC-SHA256.

use crate::constants::EG1_AUTH_PREFIX;
use edgegrid_core::hash::{base64_hmac_sha256, base64_sha256};
use edgegrid_core::SigningRequest;
use http::header::HeaderName;
use http::Method;

/// Content hash of the request body.
///
/// Only `POST` and `PUT` with a non-empty body are hashed, everything else
/// yields an empty string.
pub fn content_hash(method: &Method, body: &[u8]) -> String {
    if body.is_empty() || !(method == Method::POST || method == Method::PUT) {
        return String::new();
    }

    base64_sha256(body)
}

/// Canonicalize the headers listed in `names`.
///
/// Each present header emits `name:value\t` with the value whitespace
/// compressed. Emission follows the order of `names`; absent headers are skipped.
/// Values are taken as raw bytes, so obs-text is signed as sent.
pub fn canonicalize_headers(req: &SigningRequest, names: &[HeaderName]) -> Vec<u8> {
    let mut s = Vec::new();
    for name in names {
        let Some(value) = req.headers.get(name) else {
            continue;
        };

        s.extend_from_slice(name.as_str().as_bytes());
        s.push(b':');
        s.extend_from_slice(&SigningRequest::header_value_compress(value.as_bytes()));
        s.push(b'\t');
    }
    s
}

/// Auth header value up to but not including the `signature=` field.
pub fn auth_header_prefix(
    client_token: &str,
    access_token: &str,
    timestamp: &str,
    nonce: &str,
) -> String {
    format!(
        "{EG1_AUTH_PREFIX}client_token={client_token};access_token={access_token};timestamp={timestamp};nonce={nonce};"
    )
}

/// Join the signed fields with `\t`.
pub fn string_to_sign(
    req: &SigningRequest,
    canonical_headers: &[u8],
    content_hash: &str,
    auth_prefix: &str,
) -> Vec<u8> {
    let method = req.method.as_str().to_ascii_uppercase();
    let scheme = req.scheme.as_str().to_ascii_lowercase();
    let path_and_query = req.path_and_query();

    [
        method.as_bytes(),
        scheme.as_bytes(),
        req.authority.as_str().as_bytes(),
        path_and_query.as_bytes(),
        canonical_headers,
        content_hash.as_bytes(),
        auth_prefix.as_bytes(),
    ]
    .join(&b'\t')
}

/// Derive the per-request signing key.
///
/// The base64 text itself is the key material for the final HMAC.
pub fn signing_key(client_secret: &str, timestamp: &str) -> String {
    base64_hmac_sha256(client_secret.as_bytes(), timestamp.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;
    use pretty_assertions::assert_eq;

    fn request(method: Method, uri: &str, headers: &[(&str, &str)]) -> SigningRequest {
        let mut builder = http::Request::builder().method(method).uri(uri);
        for (k, v) in headers {
            builder = builder.header(*k, *v);
        }
        let mut parts = builder.body(()).unwrap().into_parts().0;
        SigningRequest::build(&mut parts).unwrap()
    }

    #[test]
    fn test_content_hash() {
        let body = br#"{"x":1}"#;
        assert_eq!(
            content_hash(&Method::POST, body),
            "UEG/H3E98gR4Q1PoL2pKU1kxy2Tx9LSlrq/8tyCRiyI="
        );
        assert_eq!(content_hash(&Method::PUT, body), content_hash(&Method::POST, body));
        assert_eq!(content_hash(&Method::GET, body), "");
        assert_eq!(content_hash(&Method::DELETE, body), "");
        assert_eq!(content_hash(&Method::PATCH, body), "");
        assert_eq!(content_hash(&Method::POST, b""), "");
    }

    #[test]
    fn test_canonicalize_headers_follows_list_order() {
        let req = request(
            Method::GET,
            "https://akab-host.example.net/foo",
            &[("X-B", "  two   words "), ("X-A", "b\t c"), ("X-Other", "zzz")],
        );
        let names = [
            HeaderName::from_static("x-a"),
            HeaderName::from_static("x-missing"),
            HeaderName::from_static("x-b"),
        ];

        assert_eq!(
            canonicalize_headers(&req, &names),
            b"x-a:b c\tx-b:two words\t"
        );
        assert_eq!(canonicalize_headers(&req, &[]), b"");
    }

    #[test]
    fn test_canonicalize_headers_keeps_obs_text() {
        let mut parts = http::Request::builder()
            .uri("https://akab-host.example.net/foo")
            .header("x-a", HeaderValue::from_bytes(b"caf\xe9  au lait").unwrap())
            .body(())
            .unwrap()
            .into_parts()
            .0;
        let req = SigningRequest::build(&mut parts).unwrap();

        assert_eq!(
            canonicalize_headers(&req, &[HeaderName::from_static("x-a")]),
            b"x-a:caf\xe9 au lait\t"
        );
    }

    #[test]
    fn test_string_to_sign() {
        let req = request(Method::GET, "https://akab-host.example.net/foo?bar=baz", &[]);
        let prefix = auth_header_prefix(
            "akab-client-token-xxx",
            "akab-access-token-xxx",
            "20210101T00:00:00+0000",
            "00000000-0000-4000-8000-000000000000",
        );

        assert_eq!(
            String::from_utf8(string_to_sign(&req, b"", "", &prefix)).unwrap(),
            "GET\thttps\takab-host.example.net\t/foo?bar=baz\t\t\t\
             EG1-HMAC-SHA256 client_token=akab-client-token-xxx;access_token=akab-access-token-xxx;\
             timestamp=20210101T00:00:00+0000;nonce=00000000-0000-4000-8000-000000000000;"
        );
    }

    #[test]
    fn test_signing_key_is_deterministic() {
        let a = signing_key("SOMESECRET", "20210101T00:00:00+0000");
        let b = signing_key("SOMESECRET", "20210101T00:00:00+0000");
        let c = signing_key("SOMESECRET", "20210101T00:00:01+0000");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 44);
    }
}
