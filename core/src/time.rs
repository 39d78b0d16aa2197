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

//! Time related utils.

use crate::{Error, Result};
use chrono::{NaiveDateTime, Utc};

/// DateTime is the alias for chrono::DateTime<Utc>.
pub type DateTime = chrono::DateTime<Utc>;

/// Timestamp format used by the EdgeGrid auth header: "20060102T15:04:05+0000"
///
/// The offset is a fixed literal; timestamps are always UTC.
pub const EDGEGRID_TIMESTAMP: &str = "%Y%m%dT%H:%M:%S+0000";

/// Create datetime of now.
pub fn now() -> DateTime {
    Utc::now()
}

/// Format time into EdgeGrid timestamp: `20210101T00:00:00+0000`
pub fn format_edgegrid_timestamp(t: DateTime) -> String {
    t.format(EDGEGRID_TIMESTAMP).to_string()
}

/// Parse an EdgeGrid timestamp back into a datetime.
pub fn parse_edgegrid_timestamp(s: &str) -> Result<DateTime> {
    NaiveDateTime::parse_from_str(s, EDGEGRID_TIMESTAMP)
        .map(|t| t.and_utc())
        .map_err(|e| Error::unexpected(format!("invalid timestamp {s:?}")).with_source(e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_edgegrid_timestamp() {
        let t = Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(format_edgegrid_timestamp(t), "20210101T00:00:00+0000");

        let t = Utc.with_ymd_and_hms(2006, 1, 2, 15, 4, 5).unwrap();
        assert_eq!(format_edgegrid_timestamp(t), "20060102T15:04:05+0000");
    }

    #[test]
    fn test_timestamp_drops_fractional_seconds() {
        let t = Utc
            .with_ymd_and_hms(2024, 12, 31, 23, 59, 9)
            .unwrap()
            .checked_add_signed(chrono::TimeDelta::milliseconds(750))
            .unwrap();
        assert_eq!(format_edgegrid_timestamp(t), "20241231T23:59:09+0000");
    }

    #[test]
    fn test_parse_edgegrid_timestamp() {
        let t = parse_edgegrid_timestamp("20060102T15:04:05+0000").unwrap();
        assert_eq!(t, Utc.with_ymd_and_hms(2006, 1, 2, 15, 4, 5).unwrap());
        assert!(parse_edgegrid_timestamp("2006-01-02T15:04:05Z").is_err());
    }
}
