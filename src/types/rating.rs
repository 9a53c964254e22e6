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

use serde::Serialize;

/// How well the student recalled the card.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RatingScale {
    Excellent,
    Acceptable,
    Poor,
    Hard,
}

impl RatingScale {
    pub fn as_str(self) -> &'static str {
        match self {
            RatingScale::Excellent => "E",
            RatingScale::Acceptable => "A",
            RatingScale::Poor => "P",
            RatingScale::Hard => "H",
        }
    }
}

/// A rating as it appears in the attempt log. Values outside the scale are
/// kept verbatim so they pass through enrichment untouched.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Rating {
    Scale(RatingScale),
    Unmapped(String),
}

impl Rating {
    pub fn parse(s: &str) -> Self {
        match s {
            "E" => Rating::Scale(RatingScale::Excellent),
            "A" => Rating::Scale(RatingScale::Acceptable),
            "P" => Rating::Scale(RatingScale::Poor),
            "H" => Rating::Scale(RatingScale::Hard),
            other => Rating::Unmapped(other.to_string()),
        }
    }

    pub fn scale(&self) -> Option<RatingScale> {
        match self {
            Rating::Scale(scale) => Some(*scale),
            Rating::Unmapped(_) => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Rating::Scale(scale) => scale.as_str(),
            Rating::Unmapped(raw) => raw,
        }
    }
}

impl Display for Rating {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for Rating {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}
