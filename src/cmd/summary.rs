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

use std::collections::HashSet;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::collection::Collection;
use crate::error::Fallible;
use crate::prepare::PrepareReport;
use crate::types::attempt::EnrichedAttemptRecord;
use crate::types::card_id::CardId;

pub fn print_summary(database: &Path, config: Option<&Path>, out: &mut impl Write) -> Fallible<()> {
    let coll: Collection = Collection::new(database, config)?;
    let summary = Summary::new(coll.report, &coll.records);
    let json: String = serde_json::to_string_pretty(&summary)?;
    writeln!(out, "{json}")?;
    Ok(())
}

#[derive(Serialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    stages: PrepareReport,
    record_count: usize,
    card_count: usize,
    unmapped_rating_count: usize,
    unmapped_subject_count: usize,
    /// `None` when there are no records.
    mean_prior_mastery: Option<f64>,
}

impl Summary {
    fn new(stages: PrepareReport, records: &[EnrichedAttemptRecord]) -> Self {
        let cards: HashSet<CardId> = records.iter().map(|r| r.record.card_id).collect();
        let mean_prior_mastery = if records.is_empty() {
            None
        } else {
            let total: f64 = records.iter().map(|r| r.prior_mastery).sum();
            Some(total / records.len() as f64)
        };
        Self {
            stages,
            record_count: records.len(),
            card_count: cards.len(),
            unmapped_rating_count: records.iter().filter(|r| r.rating_num.is_none()).count(),
            unmapped_subject_count: records.iter().filter(|r| r.subject_num.is_none()).count(),
            mean_prior_mastery,
        }
    }
}
