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

use crate::types::rating::Rating;
use crate::types::rating::RatingScale;

const RATING_NUMBERS: [(RatingScale, u8); 4] = [
    (RatingScale::Excellent, 1),
    (RatingScale::Acceptable, 2),
    (RatingScale::Poor, 3),
    (RatingScale::Hard, 4),
];

const CORRECTNESS: [(RatingScale, u8); 4] = [
    (RatingScale::Excellent, 1),
    (RatingScale::Acceptable, 1),
    (RatingScale::Poor, 0),
    (RatingScale::Hard, 0),
];

const SUBJECT_NUMBERS: [(&str, u8); 12] = [
    ("Biology", 1),
    ("Chemistry", 2),
    ("Civics", 3),
    ("English", 4),
    ("English Grammar", 5),
    ("Geography", 6),
    ("Hindi", 7),
    ("History", 8),
    ("Mathematics", 9),
    ("Physics", 10),
    ("Rapid Reader", 11),
    ("Computers", 12),
];

fn lookup<K: PartialEq + Copy>(table: &[(K, u8)], key: K) -> Option<u8> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

/// Ordinal encoding of a rating. `None` for unmapped ratings.
pub fn rating_num(rating: &Rating) -> Option<u8> {
    rating.scale().and_then(|scale| lookup(&RATING_NUMBERS, scale))
}

/// Whether the attempt counts as a correct recall. `None` for unmapped
/// ratings.
pub fn is_correct(rating: &Rating) -> Option<u8> {
    rating.scale().and_then(|scale| lookup(&CORRECTNESS, scale))
}

pub fn subject_num(subject_name: &str) -> Option<u8> {
    lookup(&SUBJECT_NUMBERS, subject_name)
}
