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

use rusqlite::Connection;
use rusqlite::Row;
use rusqlite::Transaction;

use crate::error::Fallible;
use crate::source::CardMetaRow;
use crate::source::ChapterRow;
use crate::source::RatingRow;
use crate::source::RecordSource;

/// A SQLite store holding the attempt log and its reference tables.
pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn new(database_path: &str) -> Fallible<Self> {
        let mut conn = Connection::open(database_path)?;
        {
            let tx = conn.transaction()?;
            if !probe_schema_exists(&tx)? {
                log::debug!("Creating schema in {database_path}.");
                tx.execute_batch(include_str!("schema.sql"))?;
                tx.commit()?;
            }
        }
        Ok(Self { conn })
    }

    fn query<T>(&self, sql: &str, f: impl Fn(&Row) -> rusqlite::Result<T>) -> Fallible<Vec<T>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query([])?;
        let mut result = Vec::new();
        while let Some(row) = rows.next()? {
            result.push(f(row)?);
        }
        Ok(result)
    }
}

impl RecordSource for Database {
    fn card_ratings(&self) -> Fallible<Vec<RatingRow>> {
        let sql = "select session_id, card_id, timestamp, time_spent, rating from card_ratings order by rating_id;";
        self.query(sql, |row| {
            Ok(RatingRow {
                session_id: row.get(0)?,
                card_id: row.get(1)?,
                timestamp: row.get(2)?,
                time_spent: row.get(3)?,
                rating: row.get(4)?,
            })
        })
    }

    fn cards_meta(&self) -> Fallible<Vec<CardMetaRow>> {
        let sql = "select card_id, chapter_id, card_type, difficulty_level, is_exercise_bank from cards_meta order by rowid;";
        self.query(sql, |row| {
            Ok(CardMetaRow {
                card_id: row.get(0)?,
                chapter_id: row.get(1)?,
                card_type: row.get(2)?,
                difficulty_level: row.get(3)?,
                is_exercise_bank: row.get(4)?,
            })
        })
    }

    fn chapters(&self) -> Fallible<Vec<ChapterRow>> {
        let sql = "select chapter_id, chapter_name, subject_name, syllabus_name from chapters order by chapter_id;";
        self.query(sql, |row| {
            Ok(ChapterRow {
                chapter_id: row.get(0)?,
                chapter_name: row.get(1)?,
                subject_name: row.get(2)?,
                syllabus_name: row.get(3)?,
            })
        })
    }
}

#[cfg(test)]
impl Database {
    pub fn insert_chapter(&self, chapter: &ChapterRow) -> Fallible<()> {
        let sql = "insert into chapters (chapter_id, chapter_name, subject_name, syllabus_name) values (?, ?, ?, ?);";
        self.conn.execute(
            sql,
            (
                chapter.chapter_id,
                &chapter.chapter_name,
                &chapter.subject_name,
                &chapter.syllabus_name,
            ),
        )?;
        Ok(())
    }

    pub fn insert_card_meta(&self, card: &CardMetaRow) -> Fallible<()> {
        let sql = "insert into cards_meta (card_id, chapter_id, card_type, difficulty_level, is_exercise_bank) values (?, ?, ?, ?, ?);";
        self.conn.execute(
            sql,
            (
                card.card_id,
                card.chapter_id,
                &card.card_type,
                card.difficulty_level,
                card.is_exercise_bank,
            ),
        )?;
        Ok(())
    }

    pub fn insert_rating(&self, rating: &RatingRow) -> Fallible<()> {
        let sql = "insert into card_ratings (session_id, card_id, timestamp, time_spent, rating) values (?, ?, ?, ?, ?);";
        self.conn.execute(
            sql,
            (
                rating.session_id,
                rating.card_id,
                &rating.timestamp,
                rating.time_spent,
                &rating.rating,
            ),
        )?;
        Ok(())
    }
}

fn probe_schema_exists(tx: &Transaction) -> Fallible<bool> {
    let sql = "select count(*) from sqlite_master where type='table' AND name=?;";
    let count: i64 = tx.query_row(sql, ["card_ratings"], |row| row.get(0))?;
    Ok(count > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helper::create_tmp_directory;
    use crate::types::card_id::CardId;

    fn open() -> Fallible<(tempfile::TempDir, Database)> {
        let dir = create_tmp_directory()?;
        let path = dir.path().join("ratings.db");
        let db = Database::new(path.to_str().unwrap_or_default())?;
        Ok((dir, db))
    }

    #[test]
    fn test_empty_store() -> Fallible<()> {
        let (_dir, db) = open()?;
        assert!(db.card_ratings()?.is_empty());
        assert!(db.cards_meta()?.is_empty());
        assert!(db.chapters()?.is_empty());
        Ok(())
    }

    #[test]
    fn test_reopen_keeps_rows() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        let path = dir.path().join("ratings.db");
        let path = path.to_str().unwrap_or_default();
        let chapter = ChapterRow {
            chapter_id: 1,
            chapter_name: "Cells".to_string(),
            subject_name: "Biology".to_string(),
            syllabus_name: "Class-9".to_string(),
        };
        {
            let db = Database::new(path)?;
            db.insert_chapter(&chapter)?;
        }
        let db = Database::new(path)?;
        assert_eq!(db.chapters()?, vec![chapter]);
        Ok(())
    }

    #[test]
    fn test_ratings_in_insertion_order_with_nulls() -> Fallible<()> {
        let (_dir, db) = open()?;
        let rows = vec![
            RatingRow {
                session_id: 2,
                card_id: Some(CardId::new(10)),
                timestamp: Some("2024-01-02 10:00:00".to_string()),
                time_spent: 12.5,
                rating: "E".to_string(),
            },
            RatingRow {
                session_id: 1,
                card_id: None,
                timestamp: None,
                time_spent: 3.0,
                rating: "X".to_string(),
            },
        ];
        for row in &rows {
            db.insert_rating(row)?;
        }
        assert_eq!(db.card_ratings()?, rows);
        Ok(())
    }

    #[test]
    fn test_cards_meta() -> Fallible<()> {
        let (_dir, db) = open()?;
        let card = CardMetaRow {
            card_id: CardId::new(10),
            chapter_id: 1,
            card_type: "fib".to_string(),
            difficulty_level: None,
            is_exercise_bank: 2,
        };
        db.insert_card_meta(&card)?;
        assert_eq!(db.cards_meta()?, vec![card]);
        Ok(())
    }
}
