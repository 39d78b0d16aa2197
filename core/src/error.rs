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

use std::fmt;
use thiserror::Error;

/// The error type for edgegrid operations
#[derive(Error, Debug)]
#[error("{message}")]
pub struct Error {
    kind: ErrorKind,
    message: String,
    #[source]
    source: Option<anyhow::Error>,
}

/// The kind of error that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No credential source is available (no file, no env).
    CredentialMissing,

    /// The requested section is absent from the credential file.
    CredentialSectionNotFound,

    /// Some required credential fields are absent or empty.
    CredentialMissingFields,

    /// The credential host is empty, malformed, or carries a URL scheme.
    CredentialInvalidHost,

    /// Credential source exists but is malformed.
    CredentialInvalid,

    /// Configuration error (missing fields, invalid values)
    ConfigInvalid,

    /// Request cannot be built or signed.
    RequestInvalid,

    /// Connection refused, DNS failure, TLS failure and friends.
    TransportNetwork,

    /// The caller canceled the request or its deadline expired.
    TransportCanceled,

    /// The API answered with a status outside the success set.
    Api,

    /// Success status, but the body does not match the declared shape.
    ResponseDecode,

    /// Unexpected errors (I/O, encoding, etc.)
    Unexpected,
}

impl Error {
    /// Create a new error with the given kind and message
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error
    pub fn with_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Borrow the source as a concrete type, if it is one.
    pub fn source_as<E>(&self) -> Option<&E>
    where
        E: fmt::Display + fmt::Debug + Send + Sync + 'static,
    {
        self.source.as_ref()?.downcast_ref::<E>()
    }

    /// Check if this is a credential error
    pub fn is_credential_error(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::CredentialMissing
                | ErrorKind::CredentialSectionNotFound
                | ErrorKind::CredentialMissingFields
                | ErrorKind::CredentialInvalidHost
                | ErrorKind::CredentialInvalid
        )
    }

    /// Check if this error happened while talking to the network.
    pub fn is_transport_error(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::TransportNetwork | ErrorKind::TransportCanceled
        )
    }
}

// Convenience constructors
impl Error {
    /// Create a credential missing error
    pub fn credential_missing(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::CredentialMissing, message)
    }

    /// Create a section not found error for the given section name
    pub fn credential_section_not_found(section: &str) -> Self {
        Self::new(
            ErrorKind::CredentialSectionNotFound,
            format!("section {section:?} not found"),
        )
    }

    /// Create a missing fields error listing all absent fields
    pub fn credential_missing_fields(fields: &[&str]) -> Self {
        Self::new(
            ErrorKind::CredentialMissingFields,
            format!("missing required credential fields: {}", fields.join(", ")),
        )
    }

    /// Create an invalid host error
    pub fn credential_invalid_host(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::CredentialInvalidHost, message)
    }

    /// Create a credential invalid error
    pub fn credential_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::CredentialInvalid, message)
    }

    /// Create a config invalid error
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConfigInvalid, message)
    }

    /// Create a request invalid error
    pub fn request_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RequestInvalid, message)
    }

    /// Create a transport network error
    pub fn transport_network(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::TransportNetwork, message)
    }

    /// Create a transport canceled error
    pub fn transport_canceled(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::TransportCanceled, message)
    }

    /// Create an api error
    pub fn api(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Api, message)
    }

    /// Create a response decode error
    pub fn response_decode(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ResponseDecode, message)
    }

    /// Create an unexpected error
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unexpected, message)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::CredentialMissing => write!(f, "credentials missing"),
            ErrorKind::CredentialSectionNotFound => write!(f, "credentials section not found"),
            ErrorKind::CredentialMissingFields => write!(f, "credentials missing fields"),
            ErrorKind::CredentialInvalidHost => write!(f, "credentials invalid host"),
            ErrorKind::CredentialInvalid => write!(f, "invalid credentials"),
            ErrorKind::ConfigInvalid => write!(f, "invalid configuration"),
            ErrorKind::RequestInvalid => write!(f, "invalid request"),
            ErrorKind::TransportNetwork => write!(f, "network error"),
            ErrorKind::TransportCanceled => write!(f, "request canceled"),
            ErrorKind::Api => write!(f, "api error"),
            ErrorKind::ResponseDecode => write!(f, "response decode error"),
            ErrorKind::Unexpected => write!(f, "unexpected error"),
        }
    }
}

/// Convenience type alias for Results
pub type Result<T> = std::result::Result<T, Error>;

// Common From implementations
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(err)
    }
}

impl From<std::fmt::Error> for Error {
    fn from(err: std::fmt::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::Error> for Error {
    fn from(err: http::Error) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::header::InvalidHeaderValue> for Error {
    fn from(err: http::header::InvalidHeaderValue) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::header::InvalidHeaderName> for Error {
    fn from(err: http::header::InvalidHeaderName) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::header::ToStrError> for Error {
    fn from(err: http::header::ToStrError) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::uri::InvalidUri> for Error {
    fn from(err: http::uri::InvalidUri) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::uri::InvalidUriParts> for Error {
    fn from(err: http::uri::InvalidUriParts) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<std::string::FromUtf8Error> for Error {
    fn from(err: std::string::FromUtf8Error) -> Self {
        Self::unexpected(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(anyhow::Error::from(err))
    }
}
