use crate::error::{Error, Result};
use include_dir::{include_dir, Dir};
use rand::{seq::SliceRandom, RngCore};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

static PASSAGE_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/passage/data");

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Advanced,
    ];

    fn collection_name(&self) -> String {
        format!("{self}.json")
    }
}

/// A reading text. Never modified after loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passage {
    pub title: String,
    pub text: String,
    pub difficulty: Difficulty,
}

/// Passages grouped by difficulty tier, in collection order.
#[derive(Debug, Clone, Default)]
pub struct PassageLibrary {
    tiers: BTreeMap<Difficulty, Vec<Passage>>,
}

impl PassageLibrary {
    /// Load the three collections compiled into the binary.
    pub fn bundled() -> Result<Self> {
        let mut library = Self::default();
        for difficulty in Difficulty::ALL {
            let name = difficulty.collection_name();
            let file = PASSAGE_DIR
                .get_file(&name)
                .ok_or_else(|| Error::MissingCollection(name.clone()))?;
            let json = file
                .contents_utf8()
                .ok_or_else(|| Error::InvalidEncoding { name: name.clone() })?;
            library.insert_json(difficulty, &name, json)?;
        }
        Ok(library)
    }

    /// Add a collection given as a JSON array of passage records.
    pub fn from_json(difficulty: Difficulty, json: &str) -> Result<Self> {
        let mut library = Self::default();
        library.insert_json(difficulty, &difficulty.collection_name(), json)?;
        Ok(library)
    }

    fn insert_json(&mut self, difficulty: Difficulty, name: &str, json: &str) -> Result<()> {
        let passages: Vec<Passage> =
            serde_json::from_str(json).map_err(|source| Error::Collection {
                name: name.to_string(),
                source,
            })?;
        for passage in &passages {
            if passage.difficulty != difficulty {
                warn!(
                    collection = name,
                    title = %passage.title,
                    tagged = %passage.difficulty,
                    "passage is tagged with a different difficulty than its collection"
                );
            }
        }
        debug!(collection = name, count = passages.len(), "loaded passages");
        self.tiers.entry(difficulty).or_default().extend(passages);
        Ok(())
    }

    pub fn passages(&self, difficulty: Difficulty) -> &[Passage] {
        self.tiers
            .get(&difficulty)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn get(&self, difficulty: Difficulty, index: usize) -> Result<&Passage> {
        let passages = self.passages(difficulty);
        if passages.is_empty() {
            return Err(Error::NoPassage(difficulty));
        }
        passages.get(index).ok_or(Error::PassageIndex {
            difficulty,
            index,
            available: passages.len(),
        })
    }

    pub fn random(&self, difficulty: Difficulty, rng: &mut dyn RngCore) -> Result<&Passage> {
        self.passages(difficulty)
            .choose(rng)
            .ok_or(Error::NoPassage(difficulty))
    }

    pub fn len(&self) -> usize {
        self.tiers.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
