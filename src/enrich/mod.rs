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

pub mod fields;
pub mod mastery;
pub mod sequence;

use std::collections::BTreeMap;

use crate::enrich::fields::is_correct;
use crate::enrich::fields::rating_num;
use crate::enrich::fields::subject_num;
use crate::enrich::mastery::MasteryIndex;
use crate::enrich::sequence::CardSequenceState;
use crate::types::attempt::AttemptRecord;
use crate::types::attempt::EnrichedAttemptRecord;

/// Enrich a prepared sequence of attempts, one output record per input
/// record, in input order.
///
/// Attempts on the same card must be contiguous. Nothing is reordered,
/// filtered, or deduplicated here.
pub fn enrich(records: Vec<AttemptRecord>) -> Vec<EnrichedAttemptRecord> {
    let index = MasteryIndex::new(&records);
    let mut state = CardSequenceState::new();
    // Distinct unmapped value to the number of attempts carrying it.
    let mut unmapped_ratings: BTreeMap<String, usize> = BTreeMap::new();
    let mut unmapped_subjects: BTreeMap<String, usize> = BTreeMap::new();
    let enriched: Vec<EnrichedAttemptRecord> = records
        .into_iter()
        .map(|record| {
            let prior_mastery = index.prior_mastery(record.card_id, record.timestamp);
            let step = state.advance(record.card_id, record.timestamp);
            let rating_num = rating_num(&record.rating);
            let is_correct = is_correct(&record.rating);
            let subject_num = subject_num(&record.subject_name);
            if rating_num.is_none() {
                *unmapped_ratings.entry(record.rating.to_string()).or_default() += 1;
            }
            if subject_num.is_none() {
                *unmapped_subjects
                    .entry(record.subject_name.clone())
                    .or_default() += 1;
            }
            EnrichedAttemptRecord {
                record,
                prior_mastery,
                rating_num,
                is_correct,
                attempt_num: step.attempt_num,
                gap_duration: step.gap_duration,
                total_duration: step.total_duration,
                subject_num,
            }
        })
        .collect();
    if !unmapped_ratings.is_empty() {
        let count: usize = unmapped_ratings.values().sum();
        log::warn!("{count} attempts have unmapped ratings and no encoding: {unmapped_ratings:?}");
    }
    if !unmapped_subjects.is_empty() {
        let count: usize = unmapped_subjects.values().sum();
        log::warn!("{count} attempts have unmapped subjects and no number: {unmapped_subjects:?}");
    }
    enriched
}
