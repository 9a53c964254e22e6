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

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use serde::Serialize;

use crate::types::attempt::EnrichedAttemptRecord;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    SyllabusName,
    SubjectName,
    CardType,
    Rating,
    RatingNum,
    IsCorrect,
}

const CATEGORICAL_COLUMNS: [Column; 6] = [
    Column::SyllabusName,
    Column::SubjectName,
    Column::CardType,
    Column::Rating,
    Column::RatingNum,
    Column::IsCorrect,
];

#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize)]
#[serde(untagged)]
pub enum CategoryValue {
    Number(i64),
    Text(String),
}

impl Column {
    fn value(self, record: &EnrichedAttemptRecord) -> Option<CategoryValue> {
        match self {
            Column::SyllabusName => Some(CategoryValue::Text(record.record.syllabus_name.clone())),
            Column::SubjectName => Some(CategoryValue::Text(record.record.subject_name.clone())),
            Column::CardType => Some(CategoryValue::Text(record.record.card_type.clone())),
            Column::Rating => Some(CategoryValue::Text(record.record.rating.to_string())),
            Column::RatingNum => record.rating_num.map(|n| CategoryValue::Number(n.into())),
            Column::IsCorrect => record.is_correct.map(|n| CategoryValue::Number(n.into())),
        }
    }
}

#[derive(Serialize, Debug)]
pub struct EncodedRecord {
    #[serde(flatten)]
    pub record: EnrichedAttemptRecord,
    /// Index of each categorical value in its column's category list;
    /// `None` where the value is absent.
    pub codes: BTreeMap<Column, Option<usize>>,
}

/// Enriched records with their categorical columns encoded.
#[derive(Serialize, Debug)]
pub struct CategoricalTable {
    /// Sorted distinct values of each categorical column.
    pub categories: BTreeMap<Column, Vec<CategoryValue>>,
    pub records: Vec<EncodedRecord>,
}

pub fn encode(records: Vec<EnrichedAttemptRecord>) -> CategoricalTable {
    let mut categories: BTreeMap<Column, Vec<CategoryValue>> = BTreeMap::new();
    for column in CATEGORICAL_COLUMNS {
        let distinct: BTreeSet<CategoryValue> =
            records.iter().filter_map(|r| column.value(r)).collect();
        categories.insert(column, distinct.into_iter().collect());
    }
    let records = records
        .into_iter()
        .map(|record| {
            let codes = categories
                .iter()
                .map(|(column, values)| {
                    let code = column
                        .value(&record)
                        .and_then(|v| values.binary_search(&v).ok());
                    (*column, code)
                })
                .collect();
            EncodedRecord { record, codes }
        })
        .collect();
    CategoricalTable {
        categories,
        records,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrich::enrich;
    use crate::error::Fallible;
    use crate::helper::attempt;
    use crate::helper::attempt_in_subject;

    #[test]
    fn test_categories_are_sorted_and_distinct() {
        let table = encode(enrich(vec![
            attempt_in_subject(1, "2024-01-01", "P", "Physics"),
            attempt_in_subject(1, "2024-01-02", "E", "Physics"),
            attempt_in_subject(2, "2024-01-01", "E", "Biology"),
        ]));
        assert_eq!(
            table.categories[&Column::SubjectName],
            vec![
                CategoryValue::Text("Biology".to_string()),
                CategoryValue::Text("Physics".to_string()),
            ]
        );
        assert_eq!(
            table.categories[&Column::Rating],
            vec![
                CategoryValue::Text("E".to_string()),
                CategoryValue::Text("P".to_string()),
            ]
        );
        assert_eq!(
            table.categories[&Column::RatingNum],
            vec![CategoryValue::Number(1), CategoryValue::Number(3)]
        );
        let subject_codes: Vec<Option<usize>> = table
            .records
            .iter()
            .map(|r| r.codes[&Column::SubjectName])
            .collect();
        assert_eq!(subject_codes, vec![Some(1), Some(1), Some(0)]);
        let correct_codes: Vec<Option<usize>> = table
            .records
            .iter()
            .map(|r| r.codes[&Column::IsCorrect])
            .collect();
        assert_eq!(correct_codes, vec![Some(0), Some(1), Some(1)]);
    }

    #[test]
    fn test_absent_values_have_no_code() {
        let table = encode(enrich(vec![
            attempt(1, "2024-01-01", "X"),
            attempt(1, "2024-01-02", "A"),
        ]));
        assert_eq!(
            table.categories[&Column::Rating],
            vec![
                CategoryValue::Text("A".to_string()),
                CategoryValue::Text("X".to_string()),
            ]
        );
        assert_eq!(table.categories[&Column::RatingNum], vec![CategoryValue::Number(2)]);
        assert_eq!(table.records[0].codes[&Column::RatingNum], None);
        assert_eq!(table.records[0].codes[&Column::Rating], Some(1));
        assert_eq!(table.records[1].codes[&Column::RatingNum], Some(0));
    }

    #[test]
    fn test_serialized_shape() -> Fallible<()> {
        let table = encode(enrich(vec![attempt(1, "2024-01-01", "E")]));
        let json = serde_json::to_value(&table)?;
        assert_eq!(json["categories"]["rating_num"], serde_json::json!([1]));
        assert_eq!(json["records"][0]["card_id"], serde_json::json!(1));
        assert_eq!(json["records"][0]["codes"]["is_correct"], serde_json::json!(0));
        assert_eq!(json["records"][0]["prior_mastery"], serde_json::json!(0.0));
        Ok(())
    }
}
