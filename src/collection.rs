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

use std::path::Path;
use std::time::Instant;

use crate::config::Config;
use crate::enrich::enrich;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;
use crate::prepare::PrepareReport;
use crate::prepare::prepare;
use crate::source::RecordSource;
use crate::source::db::Database;
use crate::types::attempt::EnrichedAttemptRecord;

/// The enriched attempt log of a database.
pub struct Collection {
    pub report: PrepareReport,
    pub records: Vec<EnrichedAttemptRecord>,
}

impl Collection {
    pub fn new(database: &Path, config: Option<&Path>) -> Fallible<Self> {
        if !database.exists() {
            return fail("database does not exist.");
        }
        let database_path: &str = database
            .to_str()
            .ok_or_else(|| ErrorReport::new("invalid path"))?;
        let config: Config = Config::load(config)?;
        let db: Database = Database::new(database_path)?;
        Self::from_source(&db, &config)
    }

    pub fn from_source(source: &dyn RecordSource, config: &Config) -> Fallible<Self> {
        let (prepared, report) = {
            log::debug!("Preparing attempts...");
            let start = Instant::now();
            let result = prepare(source, config)?;
            let duration = start.elapsed().as_millis();
            log::debug!("Attempts prepared in {duration}ms.");
            result
        };

        let records = {
            log::debug!("Enriching attempts...");
            let start = Instant::now();
            let records = enrich(prepared);
            let duration = start.elapsed().as_millis();
            log::debug!("Attempts enriched in {duration}ms.");
            log::info!("{} attempts enriched.", records.len());
            records
        };

        Ok(Self { report, records })
    }
}
