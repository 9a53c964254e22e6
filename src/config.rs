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

use std::fs::read_to_string;
use std::path::Path;

use serde::Deserialize;

use crate::error::Fallible;
use crate::error::fail;

/// Which attempts get prepared for enrichment. Every key is optional in the
/// config file.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Syllabi to keep.
    pub syllabi: Vec<String>,
    /// Card types to keep.
    pub card_types: Vec<String>,
    /// Attempts must take strictly longer than this many seconds.
    pub min_time_spent: f64,
    /// Attempts must take strictly less than this many seconds.
    pub max_time_spent: f64,
    pub exclude_exercise_bank: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            syllabi: vec!["Class-8".to_string(), "Class-9".to_string()],
            card_types: [
                "fib",
                "matching",
                "multi_choice",
                "question_answer",
                "image_label",
                "true_false",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            min_time_spent: 0.0,
            max_time_spent: 300.0,
            exclude_exercise_bank: true,
        }
    }
}

impl Config {
    /// Load the config at `path`, or the defaults if no path is given.
    pub fn load(path: Option<&Path>) -> Fallible<Self> {
        match path {
            None => Ok(Self::default()),
            Some(path) => {
                if !path.exists() {
                    return fail(format!("config file {} does not exist.", path.display()));
                }
                let content = read_to_string(path)?;
                Self::parse(&content)
            }
        }
    }

    pub fn parse(content: &str) -> Fallible<Self> {
        let config: Config = toml::from_str(content)?;
        if config.min_time_spent >= config.max_time_spent {
            return fail("min_time_spent must be less than max_time_spent.");
        }
        Ok(config)
    }
}
