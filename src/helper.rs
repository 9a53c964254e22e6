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

//! Fixtures shared by the tests.

use tempfile::TempDir;
use tempfile::tempdir;

use crate::error::Fallible;
use crate::source::CardMetaRow;
use crate::source::ChapterRow;
use crate::source::RatingRow;
use crate::source::RecordSource;
use crate::source::db::Database;
use crate::types::attempt::AttemptRecord;
use crate::types::card_id::CardId;
use crate::types::rating::Rating;
use crate::types::timestamp::Timestamp;

pub fn create_tmp_directory() -> Fallible<TempDir> {
    Ok(tempdir()?)
}

pub fn attempt(card_id: i64, timestamp: &str, rating: &str) -> AttemptRecord {
    attempt_in_subject(card_id, timestamp, rating, "Mathematics")
}

pub fn attempt_in_subject(
    card_id: i64,
    timestamp: &str,
    rating: &str,
    subject_name: &str,
) -> AttemptRecord {
    AttemptRecord {
        syllabus_name: "Class-9".to_string(),
        subject_name: subject_name.to_string(),
        chapter_id: 1,
        chapter_name: "Chapter".to_string(),
        card_id: CardId::new(card_id),
        card_type: "fib".to_string(),
        difficulty_level: Some(1),
        timestamp: Timestamp::parse(timestamp).unwrap(),
        time_spent: 30.0,
        rating: Rating::parse(rating),
    }
}

pub fn chapter(chapter_id: i64, name: &str, subject: &str, syllabus: &str) -> ChapterRow {
    ChapterRow {
        chapter_id,
        chapter_name: name.to_string(),
        subject_name: subject.to_string(),
        syllabus_name: syllabus.to_string(),
    }
}

pub fn card_meta(card_id: i64, chapter_id: i64, card_type: &str) -> CardMetaRow {
    CardMetaRow {
        card_id: CardId::new(card_id),
        chapter_id,
        card_type: card_type.to_string(),
        difficulty_level: Some(2),
        is_exercise_bank: 0,
    }
}

pub fn rating_row(
    session_id: i64,
    card_id: Option<i64>,
    timestamp: &str,
    time_spent: f64,
    rating: &str,
) -> RatingRow {
    RatingRow {
        session_id,
        card_id: card_id.map(CardId::new),
        timestamp: Some(timestamp.to_string()),
        time_spent,
        rating: rating.to_string(),
    }
}

pub struct MemorySource {
    pub chapters: Vec<ChapterRow>,
    pub cards: Vec<CardMetaRow>,
    pub ratings: Vec<RatingRow>,
}

impl RecordSource for MemorySource {
    fn card_ratings(&self) -> Fallible<Vec<RatingRow>> {
        Ok(self.ratings.clone())
    }

    fn cards_meta(&self) -> Fallible<Vec<CardMetaRow>> {
        Ok(self.cards.clone())
    }

    fn chapters(&self) -> Fallible<Vec<ChapterRow>> {
        Ok(self.chapters.clone())
    }
}

/// Create a database in `dir` holding a small attempt log: two cards with
/// several attempts each, plus a duplicate, an unmapped rating, and rows the
/// preparer filters out.
pub fn seed_database(dir: &TempDir) -> Fallible<std::path::PathBuf> {
    let path = dir.path().join("ratings.db");
    let db = Database::new(path.to_str().unwrap_or_default())?;
    db.insert_chapter(&chapter(1, "Motion", "Physics", "Class-9"))?;
    db.insert_chapter(&chapter(2, "Numbers", "Mathematics", "Class-6"))?;
    db.insert_card_meta(&card_meta(100, 1, "fib"))?;
    db.insert_card_meta(&card_meta(101, 1, "multi_choice"))?;
    db.insert_card_meta(&card_meta(200, 2, "fib"))?;
    let rows = [
        rating_row(1, Some(101), "2024-05-01 09:00:00", 20.0, "H"),
        rating_row(1, Some(100), "2024-05-01 09:01:00", 20.0, "E"),
        rating_row(1, Some(100), "2024-05-01 09:02:00", 20.0, "H"),
        rating_row(2, Some(100), "2024-05-04 10:00:00", 40.0, "P"),
        rating_row(2, Some(101), "2024-05-04 10:01:00", 40.0, "X"),
        rating_row(3, Some(100), "2024-05-06 08:00:00", 15.0, "A"),
        rating_row(3, Some(200), "2024-05-06 08:01:00", 15.0, "E"),
        rating_row(4, Some(101), "2024-05-07 08:00:00", 500.0, "E"),
    ];
    for row in &rows {
        db.insert_rating(row)?;
    }
    Ok(path)
}
