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

use std::collections::HashMap;

use crate::types::attempt::AttemptRecord;
use crate::types::card_id::CardId;
use crate::types::rating::Rating;
use crate::types::rating::RatingScale;
use crate::types::timestamp::Timestamp;

/// Score contributed by a prior attempt. Anything not listed, `Hard` and
/// unmapped ratings included, scores zero.
const MASTERY_SCORES: [(RatingScale, u64); 3] = [
    (RatingScale::Excellent, 100),
    (RatingScale::Acceptable, 75),
    (RatingScale::Poor, 25),
];

pub fn mastery_score(rating: &Rating) -> u64 {
    rating
        .scale()
        .and_then(|scale| {
            MASTERY_SCORES
                .iter()
                .find(|(s, _)| *s == scale)
                .map(|(_, score)| *score)
        })
        .unwrap_or(0)
}

/// Estimates a card's historical mastery at a point in time: the mean score
/// of every attempt on that card with a strictly earlier timestamp, or zero
/// when there is none.
///
/// Each card's attempts are sorted by timestamp once, with running score
/// totals, so an estimate is a binary search instead of a scan over the
/// whole record set. Scores are integers, so the totals are exact and the
/// result is the same as summing the matching scores directly.
pub struct MasteryIndex {
    cards: HashMap<CardId, Vec<Entry>>,
}

struct Entry {
    timestamp: Timestamp,
    /// Sum of the scores of this entry and all entries before it.
    running_total: u64,
}

impl MasteryIndex {
    pub fn new(records: &[AttemptRecord]) -> Self {
        let mut scores: HashMap<CardId, Vec<(Timestamp, u64)>> = HashMap::new();
        for record in records {
            scores
                .entry(record.card_id)
                .or_default()
                .push((record.timestamp, mastery_score(&record.rating)));
        }
        let cards = scores
            .into_iter()
            .map(|(card_id, mut attempts)| {
                attempts.sort_by_key(|(timestamp, _)| *timestamp);
                let mut running_total = 0;
                let entries = attempts
                    .into_iter()
                    .map(|(timestamp, score)| {
                        running_total += score;
                        Entry {
                            timestamp,
                            running_total,
                        }
                    })
                    .collect();
                (card_id, entries)
            })
            .collect();
        Self { cards }
    }

    pub fn prior_mastery(&self, card_id: CardId, timestamp: Timestamp) -> f64 {
        let Some(entries) = self.cards.get(&card_id) else {
            return 0.0;
        };
        // Ties are not prior.
        let count = entries.partition_point(|e| e.timestamp < timestamp);
        if count == 0 {
            return 0.0;
        }
        entries[count - 1].running_total as f64 / count as f64
    }
}
