//! Cross-round ranking
//!
//! Tallies round wins per participant code and detects the match champion.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::error::EngineResult;

/// Cumulative win record for one participant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingEntry {
    pub code: String,
    pub name: String,
    pub wins: u32,
}

/// Win leaderboard, kept sorted by wins (desc) then name (asc)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Rankings {
    entries: Vec<RankingEntry>,
}

/// Name order used for tie-breaks: case-insensitive, then exact
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

fn ranking_order(a: &RankingEntry, b: &RankingEntry) -> Ordering {
    b.wins
        .cmp(&a.wins)
        .then_with(|| compare_names(&a.name, &b.name))
}

impl Rankings {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Record one round win, returning the updated entry.
    ///
    /// Codes are unique: a repeat winner increments its existing entry.
    pub fn record_win(&mut self, code: &str, name: &str) -> RankingEntry {
        let entry = match self.entries.iter_mut().find(|e| e.code == code) {
            Some(entry) => {
                entry.wins += 1;
                entry.clone()
            }
            None => {
                let entry = RankingEntry {
                    code: code.to_string(),
                    name: name.to_string(),
                    wins: 1,
                };
                self.entries.push(entry.clone());
                entry
            }
        };

        self.entries.sort_by(ranking_order);
        entry
    }

    /// First entry (in ranking order) whose wins reached the threshold
    pub fn champion(&self, points_to_win: u32) -> Option<&RankingEntry> {
        self.entries.iter().find(|e| e.wins >= points_to_win)
    }

    /// Entries in ranking order
    pub fn entries(&self) -> &[RankingEntry] {
        &self.entries
    }

    pub fn leader(&self) -> Option<&RankingEntry> {
        self.entries.first()
    }

    /// 1-indexed position of a code in the ranking
    pub fn position(&self, code: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.code == code).map(|i| i + 1)
    }

    pub fn wins_for(&self, code: &str) -> u32 {
        self.entries
            .iter()
            .find(|e| e.code == code)
            .map(|e| e.wins)
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn to_json(&self) -> EngineResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Load a ranking, merging duplicate codes and restoring order
    pub fn from_json(json: &str) -> EngineResult<Self> {
        let raw: Rankings = serde_json::from_str(json)?;
        let mut rankings = Rankings::new();
        for entry in raw.entries {
            match rankings.entries.iter_mut().find(|e| e.code == entry.code) {
                Some(existing) => existing.wins += entry.wins,
                None => rankings.entries.push(entry),
            }
        }
        rankings.entries.sort_by(ranking_order);
        log::info!("Loaded ranking with {} entries", rankings.entries.len());
        Ok(rankings)
    }
}
