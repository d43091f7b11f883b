//! In-memory lexicon, loadable from JSON.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use ahash::AHashMap;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{GlossaError, Result};
use crate::lexicon::{Lexicon, Sense};

/// A sense together with the ids of its related senses, as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SenseRecord {
    pub id: String,
    #[serde(default)]
    pub definition: String,
    pub lemmas: Vec<String>,
    #[serde(default)]
    pub broader: Vec<String>,
    #[serde(default)]
    pub narrower: Vec<String>,
}

/// On-disk layout of a lexicon file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LexiconDocument {
    pub senses: Vec<SenseRecord>,
}

/// Lexicon held entirely in memory.
///
/// Lemma lookup is case-insensitive and treats spaces as `_`, so `"Hot Dog"`
/// finds the lemma `hot_dog`.
#[derive(Debug, Clone, Default)]
pub struct MemoryLexicon {
    records: Vec<SenseRecord>,
    by_id: AHashMap<String, usize>,
    by_lemma: AHashMap<String, Vec<usize>>,
}

fn lemma_key(word: &str) -> String {
    word.trim().to_lowercase().replace(' ', "_")
}

impl MemoryLexicon {
    /// Create an empty lexicon.
    pub fn new() -> Self {
        MemoryLexicon::default()
    }

    /// Add a sense. Relations may point at senses added later.
    pub fn add_sense(&mut self, record: SenseRecord) -> Result<()> {
        if record.id.is_empty() {
            return Err(GlossaError::lexicon("sense id must not be empty"));
        }
        if self.by_id.contains_key(&record.id) {
            return Err(GlossaError::lexicon(format!(
                "duplicate sense id '{}'",
                record.id
            )));
        }

        let index = self.records.len();
        for lemma in &record.lemmas {
            let indices = self.by_lemma.entry(lemma_key(lemma)).or_default();
            if !indices.contains(&index) {
                indices.push(index);
            }
        }
        self.by_id.insert(record.id.clone(), index);
        self.records.push(record);
        Ok(())
    }

    /// Record that `narrower_id` is a kind of `broader_id`, in both directions.
    pub fn link(&mut self, broader_id: &str, narrower_id: &str) -> Result<()> {
        let broader = *self
            .by_id
            .get(broader_id)
            .ok_or_else(|| GlossaError::lexicon(format!("unknown sense '{broader_id}'")))?;
        let narrower = *self
            .by_id
            .get(narrower_id)
            .ok_or_else(|| GlossaError::lexicon(format!("unknown sense '{narrower_id}'")))?;

        let down = &mut self.records[broader].narrower;
        if !down.iter().any(|id| id == narrower_id) {
            down.push(narrower_id.to_string());
        }
        let up = &mut self.records[narrower].broader;
        if !up.iter().any(|id| id == broader_id) {
            up.push(broader_id.to_string());
        }
        Ok(())
    }

    /// Build a lexicon from a parsed document.
    pub fn from_document(document: LexiconDocument) -> Result<Self> {
        let mut lexicon = MemoryLexicon::new();
        for record in document.senses {
            lexicon.add_sense(record)?;
        }
        Ok(lexicon)
    }

    /// Parse a lexicon from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let document: LexiconDocument = serde_json::from_str(json)?;
        MemoryLexicon::from_document(document)
    }

    /// Load a lexicon from a JSON file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let document: LexiconDocument = serde_json::from_reader(BufReader::new(file))?;
        MemoryLexicon::from_document(document)
    }

    /// Save the lexicon to a JSON file.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), &self.to_document())?;
        Ok(())
    }

    /// Copy the lexicon into its on-disk layout.
    pub fn to_document(&self) -> LexiconDocument {
        LexiconDocument {
            senses: self.records.clone(),
        }
    }

    /// Get the number of senses.
    pub fn sense_count(&self) -> usize {
        self.records.len()
    }

    /// Get the number of distinct lemmas.
    pub fn lemma_count(&self) -> usize {
        self.by_lemma.len()
    }

    fn sense_at(&self, index: usize) -> Sense {
        let record = &self.records[index];
        Sense {
            id: record.id.clone(),
            definition: record.definition.clone(),
            lemmas: record.lemmas.clone(),
        }
    }

    fn resolve(&self, ids: &[String]) -> Vec<Sense> {
        ids.iter()
            .filter_map(|id| match self.by_id.get(id) {
                Some(&index) => Some(self.sense_at(index)),
                None => {
                    debug!("dangling sense relation to '{id}'");
                    None
                }
            })
            .collect()
    }

    fn record_of(&self, sense: &Sense) -> Result<&SenseRecord> {
        self.by_id
            .get(&sense.id)
            .map(|&index| &self.records[index])
            .ok_or_else(|| GlossaError::lexicon(format!("unknown sense '{}'", sense.id)))
    }
}

impl Lexicon for MemoryLexicon {
    fn senses_of(&self, word: &str) -> Result<Vec<Sense>> {
        Ok(self
            .by_lemma
            .get(&lemma_key(word))
            .map(|indices| indices.iter().map(|&i| self.sense_at(i)).collect())
            .unwrap_or_default())
    }

    fn broader(&self, sense: &Sense) -> Result<Vec<Sense>> {
        Ok(self.resolve(&self.record_of(sense)?.broader))
    }

    fn narrower(&self, sense: &Sense) -> Result<Vec<Sense>> {
        Ok(self.resolve(&self.record_of(sense)?.narrower))
    }

    fn all_senses(&self) -> Result<Box<dyn Iterator<Item = Sense> + '_>> {
        Ok(Box::new((0..self.records.len()).map(|i| self.sense_at(i))))
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
