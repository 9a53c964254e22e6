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

use std::fmt::Display;
use std::fmt::Formatter;
use std::io::Write;
use std::path::Path;
use std::time::Instant;

use clap::ValueEnum;

use crate::collection::Collection;
use crate::encode::CategoricalTable;
use crate::encode::encode;
use crate::error::Fallible;

#[derive(ValueEnum, Clone, Copy)]
pub enum OutputFormat {
    /// The categorical table, as a single JSON document.
    Json,
    /// One enriched record per line.
    Jsonl,
}

impl Display for OutputFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Jsonl => write!(f, "jsonl"),
        }
    }
}

pub fn enrich_database(
    database: &Path,
    config: Option<&Path>,
    format: OutputFormat,
    out: &mut impl Write,
) -> Fallible<()> {
    let coll: Collection = Collection::new(database, config)?;
    match format {
        OutputFormat::Json => {
            let table: CategoricalTable = {
                let start = Instant::now();
                let table = encode(coll.records);
                log::debug!("Columns encoded in {}ms.", start.elapsed().as_millis());
                table
            };
            let json: String = serde_json::to_string_pretty(&table)?;
            writeln!(out, "{json}")?;
        }
        OutputFormat::Jsonl => {
            for record in &coll.records {
                let line: String = serde_json::to_string(record)?;
                writeln!(out, "{line}")?;
            }
        }
    }
    Ok(())
}
