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

//! Tokio-based file reading implementation for edgegrid.
//!
//! This crate provides `TokioFileRead`, an async file reader that implements
//! the `FileRead` trait from `edgegrid_core` using Tokio's file system operations.
//!
//! Credential providers use it to read `~/.edgerc`.
//!
//! ## Example
//!
//! ```no_run
//! use edgegrid_core::{Context, OsEnv};
//! use edgegrid_file_read_tokio::TokioFileRead;
//!
//! #[tokio::main]
//! async fn main() {
//!     let ctx = Context::new()
//!         .with_file_read(TokioFileRead)
//!         .with_env(OsEnv);
//!
//!     let path = ctx.expand_home_dir("~/.edgerc").expect("home dir must be known");
//!     match ctx.file_read(&path).await {
//!         Ok(content) => println!("Read {} bytes", content.len()),
//!         Err(e) => eprintln!("Failed to read file: {}", e),
//!     }
//! }
//! ```

use async_trait::async_trait;
use edgegrid_core::{Error, FileRead, Result};
use std::io::ErrorKind;

/// Tokio-based implementation of the `FileRead` trait.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioFileRead;

#[async_trait]
impl FileRead for TokioFileRead {
    async fn file_read(&self, path: &str) -> Result<Vec<u8>> {
        tokio::fs::read(path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => {
                Error::credential_missing(format!("file {path} not found")).with_source(e)
            }
            _ => Error::unexpected(format!("failed to read file {path}")).with_source(e),
        })
    }
}
