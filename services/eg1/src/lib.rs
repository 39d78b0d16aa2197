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

//! EdgeGrid EG1-HMAC-SHA256 signing and signed transport.
//!
//! This crate signs requests for EdgeGrid administrative APIs and sends them
//! through the HTTP client configured on an [`edgegrid_core::Context`].
//!
//! ## Quick Start
//!
//! ```no_run
//! use edgegrid_core::{Context, OsEnv};
//! use edgegrid_eg1::{ApiRequest, Client, Config, CredentialSource};
//! use edgegrid_file_read_tokio::TokioFileRead;
//! use edgegrid_http_send_reqwest::ReqwestHttpSend;
//!
//! #[tokio::main]
//! async fn main() -> edgegrid_core::Result<()> {
//!     let ctx = Context::new()
//!         .with_file_read(TokioFileRead)
//!         .with_http_send(ReqwestHttpSend::default())
//!         .with_env(OsEnv);
//!
//!     // Read `~/.edgerc`, section `papi`.
//!     let config = Config::from_source(CredentialSource::File {
//!         path: None,
//!         section: Some("papi".to_string()),
//!     });
//!     let client = Client::new(ctx, &config).await?;
//!
//!     let groups: serde_json::Value = client
//!         .send_json(ApiRequest::get("/papi/v1/groups"))
//!         .await?;
//!     println!("{groups}");
//!     Ok(())
//! }
//! ```
//!
//! ## Credential Sources
//!
//! ### Environment Variables
//!
//! ```bash
//! export AKAMAI_HOST=akab-xxx.luna.akamaiapis.net
//! export AKAMAI_CLIENT_TOKEN=akab-client-token
//! export AKAMAI_CLIENT_SECRET=client-secret
//! export AKAMAI_ACCESS_TOKEN=akab-access-token
//! export AKAMAI_ACCOUNT_KEY=account-switch-key  # Optional
//! ```
//!
//! ### Edgerc File
//!
//! ```ini
//! [default]
//! host = akab-xxx.luna.akamaiapis.net
//! client_token = akab-client-token
//! client_secret = client-secret
//! access_token = akab-access-token
//! ```
//!
//! `AKAMAI_EDGERC` and `AKAMAI_EDGERC_SECTION` override the default path and
//! section.
//!
//! ### Inline JSON
//!
//! The same keys as the edgerc file, as a JSON object.

mod constants;

mod credential;
pub use credential::{validate_host, Credential};

mod config;
pub use config::{Config, CredentialSource};

mod provide_credential;
pub use provide_credential::*;

pub mod canonical;

mod sign_request;
pub use sign_request::RequestSigner;

mod request;
pub use request::ApiRequest;

mod response;
pub use response::{ApiResponse, ErrorEnvelope};

mod client;
pub use client::Client;

mod endpoint;
pub use endpoint::Endpoint;
