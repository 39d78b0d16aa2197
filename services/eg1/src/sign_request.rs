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

use crate::canonical::{
    auth_header_prefix, canonicalize_headers, content_hash, signing_key, string_to_sign,
};
use crate::constants::ACCOUNT_SWITCH_KEY;
use crate::Credential;
use async_trait::async_trait;
use edgegrid_core::hash::base64_hmac_sha256;
use edgegrid_core::time::{format_edgegrid_timestamp, now, DateTime};
use edgegrid_core::{Context, Result, SignRequest, SigningRequest};
use http::header::{HeaderName, AUTHORIZATION};
use http::request::Parts;
use http::HeaderValue;
use log::{debug, Level};
use uuid::Uuid;

/// RequestSigner that implements EG1-HMAC-SHA256.
///
/// Every call captures a fresh timestamp and nonce unless they were pinned
/// with [`RequestSigner::with_time`] and [`RequestSigner::with_nonce`].
#[derive(Debug, Clone, Default)]
pub struct RequestSigner {
    headers_to_sign: Vec<HeaderName>,

    time: Option<DateTime>,
    nonce: Option<String>,
}

impl RequestSigner {
    /// Create a new signer that signs no headers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Headers whose values take part in the signature, in emission order.
    pub fn with_headers_to_sign(mut self, headers: Vec<HeaderName>) -> Self {
        self.headers_to_sign = headers;
        self
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Specify the nonce.
    ///
    /// # Note
    ///
    /// Reusing a nonce lets the API reject the request as a replay.
    /// Only use this function for testing.
    pub fn with_nonce(mut self, nonce: impl Into<String>) -> Self {
        self.nonce = Some(nonce.into());
        self
    }
}

#[async_trait]
impl SignRequest for RequestSigner {
    type Credential = Credential;

    async fn sign_request(
        &self,
        ctx: &Context,
        req: &mut Parts,
        body: &[u8],
        cred: &Self::Credential,
    ) -> Result<()> {
        let timestamp = format_edgegrid_timestamp(self.time.unwrap_or_else(now));
        let nonce = self
            .nonce
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let mut signing_req = SigningRequest::build(req)?;
        if let Some(key) = &cred.account_switch_key {
            if !signing_req.query_contains(ACCOUNT_SWITCH_KEY) {
                signing_req.query_push(ACCOUNT_SWITCH_KEY, key);
            }
        }

        let headers = canonicalize_headers(&signing_req, &self.headers_to_sign);
        let hash = content_hash(&signing_req.method, body);
        let prefix = auth_header_prefix(&cred.client_token, &cred.access_token, &timestamp, &nonce);
        if ctx.log_enabled(Level::Debug) {
            debug!(
                "signing {} {} with content hash {hash:?} and headers {:?}",
                signing_req.method,
                signing_req.path_and_query(),
                String::from_utf8_lossy(&headers)
            );
        }

        let data = string_to_sign(&signing_req, &headers, &hash, &prefix);
        let key = signing_key(&cred.client_secret, &timestamp);
        let signature = base64_hmac_sha256(key.as_bytes(), &data);

        let mut value = HeaderValue::from_str(&format!("{prefix}signature={signature}"))?;
        value.set_sensitive(true);
        signing_req.headers.insert(AUTHORIZATION, value);

        signing_req.apply(req)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edgegrid_core::time::parse_edgegrid_timestamp;
    use http::Method;
    use pretty_assertions::assert_eq;

    const NONCE: &str = "00000000-0000-4000-8000-000000000000";
    const AUTH_PREFIX: &str = "EG1-HMAC-SHA256 client_token=akab-client-token-xxx;\
        access_token=akab-access-token-xxx;timestamp=20210101T00:00:00+0000;\
        nonce=00000000-0000-4000-8000-000000000000;signature=";

    fn credential() -> Credential {
        Credential::new(
            "akab-host.example.net",
            "akab-client-token-xxx",
            "SOMESECRET",
            "akab-access-token-xxx",
        )
    }

    fn signer_at(ts: &str) -> RequestSigner {
        RequestSigner::new()
            .with_time(parse_edgegrid_timestamp(ts).unwrap())
            .with_nonce(NONCE)
    }

    fn parts(method: Method, uri: &str, headers: &[(&str, &str)]) -> Parts {
        let mut builder = http::Request::builder().method(method).uri(uri);
        for (k, v) in headers {
            builder = builder.header(*k, *v);
        }
        builder.body(()).unwrap().into_parts().0
    }

    async fn sign(
        signer: &RequestSigner,
        cred: &Credential,
        mut req: Parts,
        body: &[u8],
    ) -> (Parts, String) {
        signer
            .sign_request(&Context::new(), &mut req, body, cred)
            .await
            .unwrap();
        let auth = req.headers[AUTHORIZATION].to_str().unwrap().to_string();
        (req, auth)
    }

    #[tokio::test]
    async fn test_canonical_get_signature() {
        let req = parts(Method::GET, "https://akab-host.example.net/foo?bar=baz", &[]);
        let (req, auth) = sign(&signer_at("20210101T00:00:00+0000"), &credential(), req, b"").await;

        assert_eq!(
            auth,
            format!("{AUTH_PREFIX}kYh8/Hxx+jKQdGaOUFv6UasUZ1MHiDlSDO/644SIdZY=")
        );
        assert!(req.headers[AUTHORIZATION].is_sensitive());
        assert_eq!(
            req.uri.to_string(),
            "https://akab-host.example.net/foo?bar=baz"
        );
    }

    #[tokio::test]
    async fn test_post_body_is_hashed() {
        let signer = signer_at("20210101T00:00:00+0000");
        let url = "https://akab-host.example.net/foo";

        let (_, one) = sign(&signer, &credential(), parts(Method::POST, url, &[]), br#"{"x":1}"#).await;
        let (_, two) = sign(&signer, &credential(), parts(Method::POST, url, &[]), br#"{"x":2}"#).await;

        assert_eq!(
            one,
            format!("{AUTH_PREFIX}S7DzJ2XIIQj3eiTm42czCABUoly9FdkjwOzzIvDKnSQ=")
        );
        assert_eq!(
            two,
            format!("{AUTH_PREFIX}mtEnKmDWW+i5sEp6TpEsNGvcFfpA1FWuVI6n0PibxZs=")
        );
    }

    #[tokio::test]
    async fn test_get_ignores_body() {
        let signer = signer_at("20210101T00:00:00+0000");
        let url = "https://akab-host.example.net/foo?bar=baz";

        let (_, auth) = sign(&signer, &credential(), parts(Method::GET, url, &[]), b"ignored").await;
        assert_eq!(
            auth,
            format!("{AUTH_PREFIX}kYh8/Hxx+jKQdGaOUFv6UasUZ1MHiDlSDO/644SIdZY=")
        );
    }

    #[tokio::test]
    async fn test_account_switch_key_is_signed_and_sent() {
        let cred = credential().with_account_switch_key("ACC-123");
        let req = parts(Method::GET, "https://akab-host.example.net/foo", &[]);
        let (req, auth) = sign(&signer_at("20210101T00:00:00+0000"), &cred, req, b"").await;

        assert_eq!(
            req.uri.to_string(),
            "https://akab-host.example.net/foo?accountSwitchKey=ACC-123"
        );
        assert_eq!(
            auth,
            format!("{AUTH_PREFIX}683TeP26dyEnL6XFY+B8INnJqELKNRDCo1/if4gAl/Y=")
        );
    }

    #[tokio::test]
    async fn test_account_switch_key_is_not_duplicated() {
        let cred = credential().with_account_switch_key("ACC-123");
        let req = parts(
            Method::GET,
            "https://akab-host.example.net/foo?accountSwitchKey=ACC-123",
            &[],
        );
        let (req, auth) = sign(&signer_at("20210101T00:00:00+0000"), &cred, req, b"").await;

        assert_eq!(
            req.uri.to_string(),
            "https://akab-host.example.net/foo?accountSwitchKey=ACC-123"
        );
        assert_eq!(
            auth,
            format!("{AUTH_PREFIX}683TeP26dyEnL6XFY+B8INnJqELKNRDCo1/if4gAl/Y=")
        );
    }

    #[tokio::test]
    async fn test_only_listed_headers_are_signed() {
        let signer = signer_at("20210101T00:00:00+0000")
            .with_headers_to_sign(vec![HeaderName::from_static("x-a")]);
        let url = "https://akab-host.example.net/foo?bar=baz";

        let (_, one) = sign(
            &signer,
            &credential(),
            parts(Method::GET, url, &[("X-A", "  b   c "), ("X-Other", "one")]),
            b"",
        )
        .await;
        let (_, two) = sign(
            &signer,
            &credential(),
            parts(Method::GET, url, &[("X-A", "b c"), ("X-Other", "two")]),
            b"",
        )
        .await;

        assert_eq!(
            one,
            format!("{AUTH_PREFIX}Btc0O8VPMuCtf9yDPeBrxXeLZaphfuw0LtXXimzIEKU=")
        );
        assert_eq!(one, two);
    }

    #[tokio::test]
    async fn test_obs_text_header_is_signed_as_raw_bytes() {
        let signer = signer_at("20210101T00:00:00+0000")
            .with_headers_to_sign(vec![HeaderName::from_static("x-a")]);
        let mut req = parts(Method::GET, "https://akab-host.example.net/foo?bar=baz", &[]);
        req.headers.insert(
            "x-a",
            HeaderValue::from_bytes(b"caf\xe9  au lait").unwrap(),
        );

        let (req, auth) = sign(&signer, &credential(), req, b"").await;
        assert_eq!(
            auth,
            format!("{AUTH_PREFIX}zI9FKTHE8DQhVuZZoGfsTdwUe1KBzE6uCKsR3/3JZm0=")
        );
        assert_eq!(req.headers["x-a"].as_bytes(), b"caf\xe9  au lait");
    }

    #[tokio::test]
    async fn test_timestamp_changes_signature() {
        let url = "https://akab-host.example.net/foo?bar=baz";
        let (_, auth) = sign(
            &signer_at("20210101T00:00:01+0000"),
            &credential(),
            parts(Method::GET, url, &[]),
            b"",
        )
        .await;

        assert!(auth.contains(";timestamp=20210101T00:00:01+0000;"));
        assert!(auth.ends_with(";signature=71HPSE5zNYJSADP4tHbmabKY4q5le2RkCxyQ1M/p/68="));
    }

    #[tokio::test]
    async fn test_fresh_nonce_per_request() {
        let signer = RequestSigner::new();
        let url = "https://akab-host.example.net/foo";

        let (_, one) = sign(&signer, &credential(), parts(Method::GET, url, &[]), b"").await;
        let (_, two) = sign(&signer, &credential(), parts(Method::GET, url, &[]), b"").await;

        let nonce = |auth: &str| {
            auth.split(';')
                .find_map(|f| f.strip_prefix("nonce="))
                .map(str::to_string)
                .unwrap()
        };
        assert_ne!(nonce(&one), nonce(&two));
        assert!(Uuid::parse_str(&nonce(&one)).is_ok());
        assert!(!one.ends_with(';'));
    }
}
