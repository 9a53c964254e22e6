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

pub mod db;

use crate::error::Fallible;
use crate::types::card_id::CardId;

/// A raw attempt row, as logged. `card_id` and `timestamp` may be missing.
#[derive(Clone, Debug, PartialEq)]
pub struct RatingRow {
    pub session_id: i64,
    pub card_id: Option<CardId>,
    pub timestamp: Option<String>,
    pub time_spent: f64,
    pub rating: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CardMetaRow {
    pub card_id: CardId,
    pub chapter_id: i64,
    pub card_type: String,
    pub difficulty_level: Option<i64>,
    /// Exercise-bank cards are flagged with exactly `1`.
    pub is_exercise_bank: i64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChapterRow {
    pub chapter_id: i64,
    pub chapter_name: String,
    pub subject_name: String,
    pub syllabus_name: String,
}

/// Somewhere attempt logs and their reference tables can be loaded from.
pub trait RecordSource {
    /// All attempt rows, in the order they were recorded.
    fn card_ratings(&self) -> Fallible<Vec<RatingRow>>;

    fn cards_meta(&self) -> Fallible<Vec<CardMetaRow>>;

    fn chapters(&self) -> Fallible<Vec<ChapterRow>>;
}
