use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use quarto::{Difficulty, LeafEvaluation, SearchOptions};
use serde::Deserialize;

/// One contestant, as described by its JSON config file.
///
/// ```json
/// {"nick": "HAL 9000", "type": "ai", "difficulty": "high"}
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct PlayerConfig {
    pub nick: String,
    #[serde(flatten)]
    pub kind: PlayerKind,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PlayerKind {
    Ai {
        difficulty: Difficulty,
        #[serde(default)]
        leaf_evaluation: LeafEvaluation,
        /// Fixed search depth, see [`SearchOptions::depth_override`].
        #[serde(default)]
        depth: Option<u8>,
        /// Seed for this contestant's RNG. Drawn from the judge's RNG if absent.
        #[serde(default)]
        seed: Option<u64>,
    },
    Human,
}

impl PlayerKind {
    pub fn search_options(&self) -> Option<SearchOptions> {
        match *self {
            PlayerKind::Ai {
                leaf_evaluation,
                depth,
                ..
            } => Some(SearchOptions {
                leaf_evaluation,
                depth_override: depth,
            }),
            PlayerKind::Human => None,
        }
    }
}

impl PlayerConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Could not open player config {}", path.display()))?;
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Could not parse player config {}", path.display()))
    }
}
