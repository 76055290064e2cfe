//! Participant roster
//!
//! The host supplies the selectable participants; the engine picks a random
//! subset for each round.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// Opaque participant descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub code: String,
    pub name: String,
    /// Optional grouping used for filtered rounds (e.g. a continent)
    #[serde(default)]
    pub group: Option<String>,
}

impl Participant {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            group: None,
        }
    }

    pub fn in_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }
}

/// All selectable participants
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    participants: Vec<Participant>,
}

impl Roster {
    pub fn new(participants: Vec<Participant>) -> Self {
        Self { participants }
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// Distinct groups in first-seen order
    pub fn groups(&self) -> Vec<&str> {
        let mut groups: Vec<&str> = Vec::new();
        for group in self.participants.iter().filter_map(|p| p.group.as_deref()) {
            if !groups.contains(&group) {
                groups.push(group);
            }
        }
        groups
    }

    /// Shuffled selection of up to `cap` participants, optionally restricted
    /// to one group
    pub fn select<R: Rng + ?Sized>(
        &self,
        group: Option<&str>,
        cap: usize,
        rng: &mut R,
    ) -> Vec<Participant> {
        let mut pool: Vec<Participant> = self
            .participants
            .iter()
            .filter(|p| group.is_none() || p.group.as_deref() == group)
            .cloned()
            .collect();
        pool.shuffle(rng);
        pool.truncate(cap);
        pool
    }
}
