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

/// Prefix of the Authorization header value, including the trailing space.
pub const EG1_AUTH_PREFIX: &str = "EG1-HMAC-SHA256 ";

/// Query parameter carrying the account switch key.
pub const ACCOUNT_SWITCH_KEY: &str = "accountSwitchKey";

/// Default edgerc path.
pub const EDGERC_DEFAULT_PATH: &str = "~/.edgerc";
/// Default edgerc section, also the section used by auto-discovery.
pub const EDGERC_DEFAULT_SECTION: &str = "default";

/// Default prefix of the credential environment variables.
pub const ENV_DEFAULT_PREFIX: &str = "AKAMAI";

// Environment variables, relative to the prefix: `AKAMAI_HOST` and so on.
pub const ENV_HOST: &str = "HOST";
pub const ENV_CLIENT_TOKEN: &str = "CLIENT_TOKEN";
pub const ENV_CLIENT_SECRET: &str = "CLIENT_SECRET";
pub const ENV_ACCESS_TOKEN: &str = "ACCESS_TOKEN";
pub const ENV_ACCOUNT_KEY: &str = "ACCOUNT_KEY";

/// Overrides the edgerc path when the file source has no explicit path.
pub const AKAMAI_EDGERC: &str = "AKAMAI_EDGERC";
/// Overrides the edgerc section when the file source has no explicit section.
pub const AKAMAI_EDGERC_SECTION: &str = "AKAMAI_EDGERC_SECTION";

// Keys inside an edgerc section or a JSON credential object.
pub const KEY_HOST: &str = "host";
pub const KEY_CLIENT_TOKEN: &str = "client_token";
pub const KEY_CLIENT_SECRET: &str = "client_secret";
pub const KEY_ACCESS_TOKEN: &str = "access_token";
pub const KEY_ACCOUNT_KEY: &str = "account_key";

/// Statuses treated as success by the signed transport.
pub const SUCCESS_STATUSES: [u16; 5] = [200, 201, 202, 204, 304];
