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

use std::io::stdout;
use std::path::PathBuf;

use clap::Parser;

use crate::cmd::enrich::OutputFormat;
use crate::cmd::enrich::enrich_database;
use crate::cmd::summary::print_summary;
use crate::error::Fallible;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Enrich the attempt log and print it.
    Enrich {
        /// Path to the attempt database.
        database: PathBuf,
        /// Optional path to a TOML file with preparation filters.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Output format.
        #[arg(long, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    /// Print row counts and aggregate statistics for the enriched log.
    Summary {
        /// Path to the attempt database.
        database: PathBuf,
        /// Optional path to a TOML file with preparation filters.
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

pub fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    let mut out = stdout().lock();
    match cli {
        Command::Enrich {
            database,
            config,
            format,
        } => enrich_database(&database, config.as_deref(), format, &mut out),
        Command::Summary { database, config } => {
            print_summary(&database, config.as_deref(), &mut out)
        }
    }
}
