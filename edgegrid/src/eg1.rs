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

//! EdgeGrid EG1-HMAC-SHA256 support with convenience APIs

pub use edgegrid_eg1::*;

#[cfg(feature = "default-context")]
use crate::{Context, OsEnv, Result};
#[cfg(feature = "default-context")]
use edgegrid_file_read_tokio::TokioFileRead;
#[cfg(feature = "default-context")]
use edgegrid_http_send_reqwest::ReqwestHttpSend;

/// Create a client with the default components.
///
/// The credential is loaded and validated before any HTTP client is created,
/// so a bad credential never opens a connection pool.
///
/// # Example
///
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> edgegrid::Result<()> {
/// use edgegrid::eg1::{ApiRequest, Config, CredentialSource};
///
/// let config = Config::from_source(CredentialSource::Env { prefix: None });
/// let client = edgegrid::eg1::default_client(&config).await?;
///
/// let resp = client.send(ApiRequest::get("/papi/v1/contracts")).await?;
/// println!("{}", resp.status());
/// # Ok(())
/// # }
/// ```
#[cfg(feature = "default-context")]
pub async fn default_client(config: &Config) -> Result<Client> {
    let ctx = Context::new().with_file_read(TokioFileRead).with_env(OsEnv);
    let client = Client::new(ctx, config).await?;

    Ok(client.with_http_send(ReqwestHttpSend::default()))
}
