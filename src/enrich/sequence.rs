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

use crate::types::card_id::CardId;
use crate::types::timestamp::Timestamp;

/// Cursor over runs of consecutive attempts on the same card. A run starts
/// whenever the card changes from the previous attempt, so a card that
/// reappears later in the input starts a fresh run.
pub struct CardSequenceState {
    /// The current run's card and the timestamp of its first attempt. `None`
    /// before the first attempt.
    run: Option<(CardId, Timestamp)>,
    attempt_counter: u32,
    accumulated_duration: i64,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SequenceStep {
    pub attempt_num: u32,
    /// Days since the first attempt of the run, not since the previous one.
    pub gap_duration: i64,
    pub total_duration: i64,
}

impl CardSequenceState {
    pub fn new() -> Self {
        Self {
            run: None,
            attempt_counter: 0,
            accumulated_duration: 0,
        }
    }

    /// Advance the cursor by one attempt. Must be called in input order.
    pub fn advance(&mut self, card_id: CardId, timestamp: Timestamp) -> SequenceStep {
        let anchor = match self.run {
            Some((current, anchor)) if current == card_id => anchor,
            _ => {
                self.run = Some((card_id, timestamp));
                self.attempt_counter = 0;
                self.accumulated_duration = 0;
                timestamp
            }
        };
        self.attempt_counter += 1;
        let gap = timestamp.whole_days_since(anchor);
        self.accumulated_duration += gap;
        SequenceStep {
            attempt_num: self.attempt_counter,
            gap_duration: gap,
            total_duration: self.accumulated_duration,
        }
    }
}
