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
use std::collections::HashSet;
use std::time::Instant;

use serde::Serialize;

use crate::config::Config;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;
use crate::source::CardMetaRow;
use crate::source::ChapterRow;
use crate::source::RatingRow;
use crate::source::RecordSource;
use crate::types::attempt::AttemptRecord;
use crate::types::card_id::CardId;
use crate::types::rating::Rating;
use crate::types::timestamp::Timestamp;

const EXERCISE_BANK: i64 = 1;

/// Row counts after each preparation stage.
#[derive(Serialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PrepareReport {
    pub loaded: usize,
    pub deduplicated: usize,
    pub joined: usize,
    pub without_exercise_bank: usize,
    pub in_syllabi: usize,
    pub in_card_types: usize,
    pub within_time_bounds: usize,
}

impl PrepareReport {
    fn log(&self) {
        log::info!("{} attempts loaded.", self.loaded);
        log::info!("{} attempts left after deduplication.", self.deduplicated);
        log::info!("{} attempts joined with card metadata.", self.joined);
        log::info!(
            "{} attempts left after dropping exercise-bank cards.",
            self.without_exercise_bank
        );
        log::info!("{} attempts left after the syllabus filter.", self.in_syllabi);
        log::info!("{} attempts left after the card type filter.", self.in_card_types);
        log::info!(
            "{} attempts left after the time spent filter.",
            self.within_time_bounds
        );
    }
}

/// A card joined with its chapter.
struct CardInfo<'a> {
    card: &'a CardMetaRow,
    chapter: &'a ChapterRow,
}

/// An attempt joined with its card, before the timestamp is parsed.
struct Joined<'a> {
    rating: &'a RatingRow,
    card_id: CardId,
    info: &'a CardInfo<'a>,
}

/// Turn raw attempt rows into the ordered attempt sequence the enricher
/// expects: deduplicated, joined with card and chapter metadata, filtered,
/// and sorted so attempts on the same card are contiguous.
pub fn prepare(
    source: &dyn RecordSource,
    config: &Config,
) -> Fallible<(Vec<AttemptRecord>, PrepareReport)> {
    let (ratings, cards, chapters) = {
        log::debug!("Loading attempts and reference tables...");
        let start = Instant::now();
        let ratings = source.card_ratings()?;
        let cards = source.cards_meta()?;
        let chapters = source.chapters()?;
        let duration = start.elapsed().as_millis();
        log::debug!(
            "Loaded {} attempts, {} cards, {} chapters in {duration}ms.",
            ratings.len(),
            cards.len(),
            chapters.len()
        );
        (ratings, cards, chapters)
    };
    let mut report = PrepareReport {
        loaded: ratings.len(),
        ..PrepareReport::default()
    };

    // Only the first attempt at a card within a session counts.
    let mut seen: HashSet<(i64, Option<CardId>)> = HashSet::new();
    let ratings: Vec<&RatingRow> = ratings
        .iter()
        .filter(|r| seen.insert((r.session_id, r.card_id)))
        .collect();
    report.deduplicated = ratings.len();

    let infos = join_chapters(&cards, &chapters);
    let mut infos_by_card: HashMap<CardId, Vec<&CardInfo>> = HashMap::new();
    for info in &infos {
        infos_by_card.entry(info.card.card_id).or_default().push(info);
    }
    let mut joined: Vec<Joined> = Vec::new();
    for (position, rating) in ratings.iter().copied().enumerate() {
        let Some(card_id) = rating.card_id else {
            return fail(format!(
                "malformed input: attempt {position} in session {} has no card_id.",
                rating.session_id
            ));
        };
        if let Some(matches) = infos_by_card.get(&card_id) {
            for info in matches.iter().copied() {
                joined.push(Joined {
                    rating,
                    card_id,
                    info,
                });
            }
        }
    }
    report.joined = joined.len();

    if config.exclude_exercise_bank {
        joined.retain(|j| j.info.card.is_exercise_bank != EXERCISE_BANK);
    }
    report.without_exercise_bank = joined.len();

    joined.retain(|j| config.syllabi.contains(&j.info.chapter.syllabus_name));
    report.in_syllabi = joined.len();

    joined.retain(|j| config.card_types.contains(&j.info.card.card_type));
    report.in_card_types = joined.len();

    joined.retain(|j| {
        j.rating.time_spent > config.min_time_spent && j.rating.time_spent < config.max_time_spent
    });
    report.within_time_bounds = joined.len();
    report.log();

    // Stable, so attempts on a card keep their logged order.
    joined.sort_by(|a, b| {
        (
            &a.info.chapter.syllabus_name,
            &a.info.chapter.subject_name,
            a.info.chapter.chapter_id,
            a.card_id,
        )
            .cmp(&(
                &b.info.chapter.syllabus_name,
                &b.info.chapter.subject_name,
                b.info.chapter.chapter_id,
                b.card_id,
            ))
    });

    let records = joined
        .into_iter()
        .enumerate()
        .map(|(position, j)| to_record(position, j))
        .collect::<Fallible<Vec<AttemptRecord>>>()?;
    Ok((records, report))
}

fn join_chapters<'a>(cards: &'a [CardMetaRow], chapters: &'a [ChapterRow]) -> Vec<CardInfo<'a>> {
    let mut chapters_by_id: HashMap<i64, Vec<&ChapterRow>> = HashMap::new();
    for chapter in chapters {
        chapters_by_id
            .entry(chapter.chapter_id)
            .or_default()
            .push(chapter);
    }
    let mut infos = Vec::new();
    for card in cards {
        if let Some(matches) = chapters_by_id.get(&card.chapter_id) {
            for chapter in matches.iter().copied() {
                infos.push(CardInfo { card, chapter });
            }
        }
    }
    infos
}

fn to_record(position: usize, j: Joined) -> Fallible<AttemptRecord> {
    let timestamp = match &j.rating.timestamp {
        Some(ts) => Timestamp::parse(ts).map_err(|e| {
            ErrorReport::new(format!(
                "malformed input: attempt {position} on card {}: {}",
                j.card_id,
                e.message()
            ))
        })?,
        None => {
            return fail(format!(
                "malformed input: attempt {position} on card {} has no timestamp.",
                j.card_id
            ));
        }
    };
    let chapter = j.info.chapter;
    let card = j.info.card;
    Ok(AttemptRecord {
        syllabus_name: chapter.syllabus_name.clone(),
        subject_name: chapter.subject_name.clone(),
        chapter_id: chapter.chapter_id,
        chapter_name: chapter.chapter_name.clone(),
        card_id: j.card_id,
        card_type: card.card_type.clone(),
        difficulty_level: card.difficulty_level,
        timestamp,
        time_spent: j.rating.time_spent,
        rating: Rating::parse(&j.rating.rating),
    })
}
