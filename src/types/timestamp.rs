// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fmt::Display;
use std::fmt::Formatter;

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use chrono::TimeDelta;
use chrono::Utc;
use serde::Serialize;

use crate::error::Fallible;
use crate::error::fail;

const SECONDS_PER_DAY: i64 = 86_400;

/// Formats accepted for timestamps without an offset, tried in order.
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

const DISPLAY_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// The time at which an attempt was made. Timestamps with an offset are
/// normalized to UTC; timestamps without one are taken as-is.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    pub fn parse(s: &str) -> Fallible<Self> {
        let s = s.trim();
        if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
            return Ok(Self(ts.with_timezone(&Utc).naive_utc()));
        }
        for format in NAIVE_FORMATS {
            if let Ok(ts) = NaiveDateTime::parse_from_str(s, format) {
                return Ok(Self(ts));
            }
        }
        let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")?;
        match date.and_hms_opt(0, 0, 0) {
            Some(ts) => Ok(Self(ts)),
            None => fail(format!("invalid timestamp: {s}")),
        }
    }

    /// The number of whole days from `anchor` to `self`, rounded towards
    /// negative infinity: an attempt one hour before the anchor is one day
    /// before it.
    pub fn whole_days_since(self, anchor: Timestamp) -> i64 {
        let delta: TimeDelta = self.0 - anchor.0;
        let mut seconds = delta.num_seconds();
        if delta.subsec_nanos() < 0 {
            seconds -= 1;
        }
        seconds.div_euclid(SECONDS_PER_DAY)
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0.format(DISPLAY_FORMAT))
    }
}

impl Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}
