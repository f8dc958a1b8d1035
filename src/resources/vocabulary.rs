use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use failure::ResultExt;
use log::info;
use serde::Deserialize;

use crate::components::TrainableComponent;
use crate::errors::*;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VocabularyConfig {
    #[serde(default)]
    pub special_tokens: Vec<String>,
    #[serde(default)]
    pub unk_token: Option<String>,
    #[serde(default = "default_min_freq")]
    pub min_freq: usize,
}

fn default_min_freq() -> usize {
    1
}

impl Default for VocabularyConfig {
    fn default() -> Self {
        Self {
            special_tokens: vec![],
            unk_token: None,
            min_freq: default_min_freq(),
        }
    }
}

/// Maps tokens to indexes. Special tokens come first, then counted tokens
/// by descending frequency, ties being broken by first appearance.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    config: VocabularyConfig,
    counts: Vec<(String, usize)>,
    count_indexes: HashMap<String, usize>,
    tokens: Vec<String>,
    indexes: HashMap<String, usize>,
}

impl Vocabulary {
    pub fn new(config: VocabularyConfig) -> Self {
        let mut vocabulary = Self {
            config,
            counts: vec![],
            count_indexes: HashMap::new(),
            tokens: vec![],
            indexes: HashMap::new(),
        };
        vocabulary.build_indexes();
        vocabulary
    }

    /// Forgets previous counts and builds the vocabulary from `tokens`.
    pub fn fit<I, S>(&mut self, tokens: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.counts.clear();
        self.count_indexes.clear();
        self.update(tokens);
    }

    /// Adds the tokens to the current counts.
    pub fn update<I, S>(&mut self, tokens: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for token in tokens {
            self.add_count(token.as_ref(), 1);
        }
        self.build_indexes();
    }

    fn add_count(&mut self, token: &str, count: usize) {
        match self.count_indexes.get(token) {
            Some(index) => self.counts[*index].1 += count,
            None => {
                self.count_indexes
                    .insert(token.to_string(), self.counts.len());
                self.counts.push((token.to_string(), count));
            }
        }
    }

    fn build_indexes(&mut self) {
        self.tokens.clear();
        self.indexes.clear();
        let special_tokens = self
            .config
            .special_tokens
            .iter()
            .chain(self.config.unk_token.iter())
            .cloned()
            .collect::<Vec<_>>();
        for token in special_tokens {
            self.push_token(token);
        }
        let mut sorted_counts: Vec<&(String, usize)> = self
            .counts
            .iter()
            .filter(|(_, count)| *count >= self.config.min_freq)
            .collect();
        // stable sort: ties keep their order of first appearance
        sorted_counts.sort_by(|(_, lhs), (_, rhs)| rhs.cmp(lhs));
        let frequent_tokens: Vec<String> =
            sorted_counts.into_iter().map(|(t, _)| t.clone()).collect();
        for token in frequent_tokens {
            self.push_token(token);
        }
    }

    fn push_token(&mut self, token: String) {
        if !self.indexes.contains_key(&token) {
            self.indexes.insert(token.clone(), self.tokens.len());
            self.tokens.push(token);
        }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn count(&self, token: &str) -> usize {
        self.count_indexes
            .get(token)
            .map(|index| self.counts[*index].1)
            .unwrap_or(0)
    }

    /// Falls back on the unknown token when there is one.
    pub fn lookup(&self, token: &str) -> Result<usize> {
        self.indexes
            .get(token)
            .or_else(|| {
                self.config
                    .unk_token
                    .as_ref()
                    .and_then(|unk| self.indexes.get(unk))
            })
            .cloned()
            .ok_or_else(|| IntentSlotError::UnknownToken(token.to_string()).into())
    }

    pub fn lookup_all<S: AsRef<str>>(&self, tokens: &[S]) -> Result<Vec<usize>> {
        tokens.iter().map(|t| self.lookup(t.as_ref())).collect()
    }

    pub fn token(&self, index: usize) -> Option<&str> {
        self.tokens.get(index).map(|t| &**t)
    }

    /// Reads `token<TAB>count` lines and adds them to the current counts.
    pub fn read_counts<R: Read>(&mut self, reader: R) -> Result<()> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .quoting(false)
            .has_headers(false)
            .from_reader(reader);
        for record in csv_reader.records() {
            let elements = record?;
            if elements.len() != 2 {
                return Err(invalid_input(format!(
                    "Expected a token and its count but found {:?}",
                    elements
                )));
            }
            let count = elements[1]
                .parse::<usize>()
                .with_context(|_| format!("Invalid count for token '{}'", &elements[0]))?;
            self.add_count(&elements[0], count);
        }
        self.build_indexes();
        Ok(())
    }

    /// Fails on tokens containing a tab or a line break, which could not be
    /// read back.
    pub fn write_counts<W: Write>(&self, writer: W) -> Result<()> {
        if let Some((token, _)) = self
            .counts
            .iter()
            .find(|(token, _)| token.contains(|c: char| c == '\t' || c == '\n' || c == '\r'))
        {
            return Err(invalid_input(format!(
                "Cannot write token {:?} containing a tab or a line break",
                token
            )));
        }
        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .quote_style(csv::QuoteStyle::Never)
            .has_headers(false)
            .from_writer(writer);
        for (token, count) in &self.counts {
            let count = count.to_string();
            csv_writer.write_record(&[token.as_str(), count.as_str()])?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    pub fn from_path<P: AsRef<Path>>(path: P, config: VocabularyConfig) -> Result<Self> {
        let mut vocabulary = Self::new(config);
        vocabulary.load(path.as_ref())?;
        Ok(vocabulary)
    }
}

impl TrainableComponent for Vocabulary {
    type Input = Vec<String>;
    type Output = Vec<usize>;

    fn train_on_batch(&mut self, batch: &[Vec<String>]) -> Result<()> {
        self.update(batch.iter().flatten());
        Ok(())
    }

    fn infer(&self, batch: &[Vec<String>]) -> Result<Vec<Vec<usize>>> {
        batch.iter().map(|tokens| self.lookup_all(tokens)).collect()
    }

    fn save(&self, path: &Path) -> Result<()> {
        info!("Saving vocabulary ({:?}) ...", path);
        let file = File::create(path)
            .with_context(|_| format!("Cannot create vocabulary file {:?}", path))?;
        self.write_counts(file)?;
        info!("Vocabulary saved");
        Ok(())
    }

    fn load(&mut self, path: &Path) -> Result<()> {
        info!("Loading vocabulary ({:?}) ...", path);
        let file = File::open(path)
            .with_context(|_| IntentSlotError::ConfigLoad(format!("{:?}", path)))?;
        self.counts.clear();
        self.count_indexes.clear();
        self.read_counts(file)
            .with_context(|_| format!("Cannot read vocabulary file {:?}", path))?;
        info!("Vocabulary loaded ({} tokens)", self.len());
        Ok(())
    }
}
