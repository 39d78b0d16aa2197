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

//! Example of listing property manager groups with auto-discovered credentials

use edgegrid_core::{Context, OsEnv};
use edgegrid_eg1::{ApiRequest, Client, Config, ErrorEnvelope};
use edgegrid_file_read_tokio::TokioFileRead;
use edgegrid_http_send_reqwest::ReqwestHttpSend;
use log::LevelFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(LevelFilter::Debug)
        .init();

    let ctx = Context::new()
        .with_file_read(TokioFileRead)
        .with_http_send(ReqwestHttpSend::default())
        .with_env(OsEnv);

    // Environment first, then `~/.edgerc` section `default`.
    let config = Config {
        log_level: LevelFilter::Debug,
        ..Default::default()
    };
    let client = Client::new(ctx, &config).await?;
    println!("Loaded credential: {:?}", client.credential());

    match client
        .send_json::<serde_json::Value>(ApiRequest::get("/papi/v1/groups"))
        .await
    {
        Ok(groups) => println!("{groups:#}"),
        Err(err) => match ErrorEnvelope::from_error(&err) {
            Some(envelope) => println!("API rejected the request: {envelope}"),
            None => return Err(err.into()),
        },
    }

    Ok(())
}
