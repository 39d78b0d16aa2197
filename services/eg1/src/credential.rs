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

use crate::constants::*;
use edgegrid_core::utils::Redact;
use edgegrid_core::{Error, Result, SigningCredential};
use http::uri::Authority;
use http::Uri;
use ini::{Ini, ParseOption};
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Formatter, Write};

/// Credential that holds the EdgeGrid API client information.
///
/// A credential is immutable once loaded: providers validate it before handing
/// it out and the signer shares it read-only between requests.
#[derive(Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Credential {
    /// API hostname without scheme or path, e.g. `akab-xxx.luna.akamaiapis.net`.
    pub host: String,
    /// Client token of the API client.
    pub client_token: String,
    /// Client secret used as HMAC key material.
    pub client_secret: String,
    /// Access token tying the client to an account.
    pub access_token: String,
    /// Account switch key appended to every signed request when present.
    #[serde(
        rename = "account_key",
        alias = "account_switch_key",
        skip_serializing_if = "Option::is_none"
    )]
    pub account_switch_key: Option<String>,
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("host", &self.host)
            .field("client_token", &Redact::from(&self.client_token))
            .field("client_secret", &Redact::from(&self.client_secret))
            .field("access_token", &Redact::from(&self.access_token))
            .field("account_switch_key", &self.account_switch_key)
            .finish()
    }
}

impl SigningCredential for Credential {
    fn validate(&self) -> Result<()> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(Error::credential_missing_fields(&missing));
        }

        validate_host(&self.host)
    }
}

impl Credential {
    /// Create a new credential from its four required fields.
    pub fn new(
        host: impl Into<String>,
        client_token: impl Into<String>,
        client_secret: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            client_token: client_token.into(),
            client_secret: client_secret.into(),
            access_token: access_token.into(),
            account_switch_key: None,
        }
    }

    /// Set the account switch key.
    pub fn with_account_switch_key(mut self, key: impl Into<String>) -> Self {
        let key = key.into();
        self.account_switch_key = (!key.is_empty()).then_some(key);
        self
    }

    /// Names of the required fields that are empty.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            (KEY_HOST, &self.host),
            (KEY_CLIENT_TOKEN, &self.client_token),
            (KEY_CLIENT_SECRET, &self.client_secret),
            (KEY_ACCESS_TOKEN, &self.access_token),
        ]
        .into_iter()
        .filter(|(_, v)| v.is_empty())
        .map(|(k, _)| k)
        .collect()
    }

    /// Parse the named section of an edgerc document and validate it.
    ///
    /// Section lookup is exact and case-sensitive. Unknown keys are ignored.
    pub fn from_edgerc(content: &str, section: &str) -> Result<Self> {
        let opt = ParseOption {
            enabled_quote: false,
            enabled_escape: false,
            ..ParseOption::default()
        };
        let ini = Ini::load_from_str_opt(content, opt).map_err(|e| {
            Error::credential_invalid("failed to parse edgerc").with_source(e)
        })?;
        let props = ini
            .section(Some(section))
            .ok_or_else(|| Error::credential_section_not_found(section))?;

        let get = |key: &str| props.get(key).map(str::trim).unwrap_or_default().to_string();
        let cred = Self::new(
            get(KEY_HOST),
            get(KEY_CLIENT_TOKEN),
            get(KEY_CLIENT_SECRET),
            get(KEY_ACCESS_TOKEN),
        )
        .with_account_switch_key(get(KEY_ACCOUNT_KEY));

        cred.validate()?;
        Ok(cred)
    }

    /// Render this credential as an edgerc section.
    pub fn to_edgerc(&self, section: &str) -> String {
        let mut s = String::new();
        // Writing into a String never fails.
        let _ = writeln!(s, "[{section}]");
        let _ = writeln!(s, "{KEY_HOST} = {}", self.host);
        let _ = writeln!(s, "{KEY_CLIENT_TOKEN} = {}", self.client_token);
        let _ = writeln!(s, "{KEY_CLIENT_SECRET} = {}", self.client_secret);
        let _ = writeln!(s, "{KEY_ACCESS_TOKEN} = {}", self.access_token);
        if let Some(key) = &self.account_switch_key {
            let _ = writeln!(s, "{KEY_ACCOUNT_KEY} = {key}");
        }
        s
    }

    /// Parse a JSON credential object and validate it.
    pub fn from_json(text: &str) -> Result<Self> {
        let mut cred: Credential = serde_json::from_str(text).map_err(|e| {
            Error::credential_invalid("failed to parse credential json").with_source(e)
        })?;
        if cred.account_switch_key.as_deref() == Some("") {
            cred.account_switch_key = None;
        }

        cred.validate()?;
        Ok(cred)
    }

    /// Serialize this credential as a JSON object.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| Error::unexpected("failed to serialize credential").with_source(e))
    }
}

/// Check that `host` is a bare authority: no scheme, no path, no userinfo.
pub fn validate_host(host: &str) -> Result<()> {
    if host.is_empty() {
        return Err(Error::credential_invalid_host("host must not be empty"));
    }

    let lower = host.to_ascii_lowercase();
    for scheme in ["https", "http"] {
        if lower.starts_with(&format!("{scheme}://")) {
            return Err(Error::credential_invalid_host(format!(
                "host {host:?} must not contain a scheme, found {scheme}"
            )));
        }
    }

    let authority: Authority = host.parse().map_err(|e| {
        Error::credential_invalid_host(format!("host {host:?} is not a valid authority"))
            .with_source(e)
    })?;
    if host.contains('@') || authority.host().is_empty() {
        return Err(Error::credential_invalid_host(format!(
            "host {host:?} must be a hostname with an optional port"
        )));
    }
    let rest = &authority.as_str()[authority.host().len()..];
    if let Some(port) = rest.strip_prefix(':') {
        port.parse::<u16>().map_err(|e| {
            Error::credential_invalid_host(format!("host {host:?} has an invalid port"))
                .with_source(e)
        })?;
    }

    Uri::try_from(format!("https://{host}/")).map_err(|e| {
        Error::credential_invalid_host(format!("host {host:?} does not form a valid url"))
            .with_source(e)
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use edgegrid_core::ErrorKind;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn sample() -> Credential {
        Credential::new(
            "akab-host.example.net",
            "akab-client-token-xxx",
            "SOMESECRET",
            "akab-access-token-xxx",
        )
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let out = format!("{:?}", sample());
        assert!(out.contains("akab-host.example.net"));
        assert!(!out.contains("SOMESECRET"));
        assert!(!out.contains("akab-client-token-xxx"));
    }

    #[test]
    fn test_missing_fields_are_all_listed() {
        let cred = Credential {
            host: "akab-host.example.net".to_string(),
            ..Default::default()
        };
        let err = cred.validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CredentialMissingFields);
        assert_eq!(
            err.to_string(),
            "missing required credential fields: client_token, client_secret, access_token"
        );
    }

    #[test_case("akab-host.example.net" ; "hostname")]
    #[test_case("akab-host.example.net:8443" ; "hostname with port")]
    #[test_case("127.0.0.1:8080" ; "ip with port")]
    fn test_valid_host(host: &str) {
        assert!(validate_host(host).is_ok(), "{host} should be valid");
    }

    #[test_case("https://akab-host.example.net", Some("https") ; "https scheme")]
    #[test_case("http://akab-host.example.net", Some("http") ; "http scheme")]
    #[test_case("HTTPS://akab-host.example.net", Some("https") ; "uppercase scheme")]
    #[test_case("akab-host.example.net/path", None ; "with path")]
    #[test_case("user@akab-host.example.net", None ; "with userinfo")]
    #[test_case("akab host.example.net", None ; "with space")]
    #[test_case("akab-host.example.net:http", None ; "bad port")]
    fn test_invalid_host(host: &str, scheme: Option<&str>) {
        let err = validate_host(host).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CredentialInvalidHost);
        if let Some(scheme) = scheme {
            assert!(err.to_string().contains(&format!("found {scheme}")), "{err}");
        }
    }

    #[test]
    fn test_edgerc_round_trip() {
        let creds = [
            sample(),
            sample().with_account_switch_key("ACC-123"),
            Credential::new(
                "akab-xxx.luna.akamaiapis.net:443",
                "akab-c",
                "s3cr3t+/with=base64==",
                "akab-a",
            ),
        ];

        for cred in creds {
            let text = cred.to_edgerc("papi");
            assert_eq!(Credential::from_edgerc(&text, "papi").unwrap(), cred);
        }
    }

    #[test]
    fn test_json_round_trip() {
        for cred in [sample(), sample().with_account_switch_key("ACC-123")] {
            let text = cred.to_json().unwrap();
            assert_eq!(Credential::from_json(&text).unwrap(), cred);
        }
    }

    #[test]
    fn test_from_edgerc_ignores_unknown_keys() {
        let text = "\
[default]
host = akab-host.example.net
client_token = akab-client-token-xxx
client_secret = SOMESECRET
access_token = akab-access-token-xxx
max_body = 131072

[other]
host = other.example.net
";
        assert_eq!(Credential::from_edgerc(text, "default").unwrap(), sample());
    }

    #[test]
    fn test_from_edgerc_section_lookup_is_exact() {
        let text = sample().to_edgerc("Default");
        let err = Credential::from_edgerc(&text, "default").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CredentialSectionNotFound);
    }

    #[test]
    fn test_from_json_accepts_account_switch_key_alias() {
        let text = r#"{
            "host": "akab-host.example.net",
            "client_token": "akab-client-token-xxx",
            "client_secret": "SOMESECRET",
            "access_token": "akab-access-token-xxx",
            "account_switch_key": "ACC-123"
        }"#;
        let cred = Credential::from_json(text).unwrap();
        assert_eq!(cred.account_switch_key.as_deref(), Some("ACC-123"));
    }

    #[test]
    fn test_from_json_reports_missing_fields() {
        let err = Credential::from_json(r#"{"host": "akab-host.example.net"}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CredentialMissingFields);

        let err = Credential::from_json("not json").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CredentialInvalid);
    }
}
