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
use crate::Credential;
use async_trait::async_trait;
use edgegrid_core::{Context, Error, ErrorKind, ProvideCredential, Result};
use log::{debug, Level};

/// EdgercCredentialProvider loads credentials from a section of an edgerc file.
///
/// The path is taken from, in order:
///
/// - [`EdgercCredentialProvider::with_path`]
/// - env value: `AKAMAI_EDGERC`
/// - `~/.edgerc`
///
/// The section is taken from [`EdgercCredentialProvider::with_section`], then
/// `AKAMAI_EDGERC_SECTION`, then `default`.
#[derive(Debug, Clone, Default)]
pub struct EdgercCredentialProvider {
    path: Option<String>,
    section: Option<String>,
}

impl EdgercCredentialProvider {
    /// Create a new EdgercCredentialProvider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read credentials from this file.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Read credentials from this section.
    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }
}

#[async_trait]
impl ProvideCredential for EdgercCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let path = self
            .path
            .clone()
            .or_else(|| ctx.env_var(AKAMAI_EDGERC))
            .unwrap_or_else(|| EDGERC_DEFAULT_PATH.to_string());
        let section = self
            .section
            .clone()
            .or_else(|| ctx.env_var(AKAMAI_EDGERC_SECTION))
            .unwrap_or_else(|| EDGERC_DEFAULT_SECTION.to_string());

        let path = ctx.expand_home_dir(&path).ok_or_else(|| {
            Error::credential_missing(format!("cannot expand {path}: home dir not found"))
        })?;

        let content = ctx.file_read_as_string(&path).await.map_err(|e| {
            if e.kind() == ErrorKind::CredentialMissing {
                e
            } else {
                Error::credential_missing(format!("failed to read edgerc {path}")).with_source(e)
            }
        })?;

        let cred = Credential::from_edgerc(&content, &section)?;
        if ctx.log_enabled(Level::Debug) {
            debug!("loaded credential from edgerc {path} section {section}");
        }
        Ok(Some(cred))
    }
}
