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

use anyhow::Result;
use bytes::Bytes;
use edgegrid_core::Context;
use edgegrid_http_send_reqwest::ReqwestHttpSend;
use reqwest::Client;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    // Tune the pool once; every clone of the context shares it.
    let client = Client::builder()
        .timeout(Duration::from_secs(30))
        .pool_max_idle_per_host(10)
        .user_agent("edgegrid-example/1.0")
        .build()?;

    let ctx = Context::new().with_http_send(ReqwestHttpSend::new(client));

    let req = http::Request::builder()
        .method("GET")
        .uri("https://httpbin.org/get")
        .header("X-Test-Header", "edgegrid-example")
        .body(Bytes::new())?;

    match ctx.http_send(req).await {
        Ok(resp) => {
            println!("Response status: {}", resp.status());
            for (name, value) in resp.headers() {
                println!("  {name}: {value:?}");
            }
        }
        Err(e) => eprintln!("Request failed ({}): {e}", e.kind()),
    }

    Ok(())
}
