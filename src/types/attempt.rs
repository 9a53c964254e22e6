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

use serde::Serialize;

use crate::types::card_id::CardId;
use crate::types::rating::Rating;
use crate::types::timestamp::Timestamp;

/// A single prepared attempt: a student rating their recall of a card.
#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct AttemptRecord {
    pub syllabus_name: String,
    pub subject_name: String,
    pub chapter_id: i64,
    pub chapter_name: String,
    pub card_id: CardId,
    pub card_type: String,
    pub difficulty_level: Option<i64>,
    pub timestamp: Timestamp,
    /// Seconds spent on the card.
    pub time_spent: f64,
    pub rating: Rating,
}

/// An attempt annotated with mastery history, sequencing and encodings.
#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct EnrichedAttemptRecord {
    #[serde(flatten)]
    pub record: AttemptRecord,
    /// Mean score (0-100) of all earlier attempts on the same card.
    pub prior_mastery: f64,
    pub rating_num: Option<u8>,
    pub is_correct: Option<u8>,
    /// Position within the current run of this card, from 1.
    pub attempt_num: u32,
    /// Whole days since the first attempt of the current run.
    pub gap_duration: i64,
    /// Running sum of `gap_duration` over the current run.
    pub total_duration: i64,
    pub subject_num: Option<u8>,
}
