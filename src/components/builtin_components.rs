use std::path::PathBuf;

use serde::Deserialize;
use serde_json::Value;

use crate::candidates::{pairs_to_json, CandidateOrdering, SlotCandidates, SlotValueFilter};
use crate::components::Component;
use crate::errors::*;
use crate::models::ComponentConfig;
use crate::preprocessing::str_lower;
use crate::resources::{Vocabulary, VocabularyConfig};
use crate::tagging::{tag_json_records, TaggingScheme};

fn batch_items<'a>(batch: &'a Value, component_name: &str) -> Result<&'a Vec<Value>> {
    batch.as_array().ok_or_else(|| {
        invalid_input(format!(
            "Component '{}' expects batches as lists but found {}",
            component_name, batch
        ))
    })
}

fn single_batch<'a>(batches: &'a [Value], component_name: &str) -> Result<&'a Value> {
    match batches {
        [batch] => Ok(batch),
        _ => Err(invalid_input(format!(
            "Component '{}' expects a single input but found {}",
            component_name,
            batches.len()
        ))),
    }
}

#[derive(Debug, Default, Deserialize)]
struct TaggerParams {
    #[serde(default)]
    tagging_scheme: TaggingScheme,
}

/// Turns intent records into three batches: tokens, intents and tags.
pub struct TaggerComponent {
    tagging_scheme: TaggingScheme,
}

impl TaggerComponent {
    pub fn new(tagging_scheme: TaggingScheme) -> Self {
        Self { tagging_scheme }
    }

    pub fn from_config(config: &ComponentConfig) -> Result<Self> {
        let params: TaggerParams = config.params()?;
        Ok(Self::new(params.tagging_scheme))
    }
}

impl Component for TaggerComponent {
    fn call(&self, batches: &[Value]) -> Result<Vec<Value>> {
        let batch = single_batch(batches, "snips_intent_slot_tagger")?;
        let records = batch_items(batch, "snips_intent_slot_tagger")?;
        let sentences = tag_json_records(records, self.tagging_scheme)?;
        let mut tokens = Vec::with_capacity(sentences.len());
        let mut intents = Vec::with_capacity(sentences.len());
        let mut tags = Vec::with_capacity(sentences.len());
        for sentence in sentences {
            tokens.push(Value::from(sentence.tokens));
            intents.push(Value::from(sentence.intent));
            tags.push(Value::from(sentence.tags));
        }
        Ok(vec![
            Value::Array(tokens),
            Value::Array(intents),
            Value::Array(tags),
        ])
    }
}

pub struct StrLowerComponent;

impl Component for StrLowerComponent {
    fn call(&self, batches: &[Value]) -> Result<Vec<Value>> {
        Ok(batches.iter().map(str_lower).collect())
    }
}

#[derive(Debug, Deserialize)]
struct VocabularyParams {
    #[serde(default)]
    load_path: Option<PathBuf>,
    #[serde(flatten)]
    config: VocabularyConfig,
}

/// Replaces tokens, at any nesting depth, by their vocabulary index.
pub struct VocabularyComponent {
    vocabulary: Vocabulary,
}

impl VocabularyComponent {
    pub fn new(vocabulary: Vocabulary) -> Self {
        Self { vocabulary }
    }

    pub fn from_config(config: &ComponentConfig) -> Result<Self> {
        let params: VocabularyParams = config.params()?;
        let vocabulary = match params.load_path {
            Some(path) => Vocabulary::from_path(path, params.config)?,
            None => Vocabulary::new(params.config),
        };
        Ok(Self::new(vocabulary))
    }

    fn to_indexes(&self, value: &Value) -> Result<Value> {
        match value {
            Value::String(token) => Ok(Value::from(self.vocabulary.lookup(token)?)),
            Value::Array(values) => Ok(Value::Array(
                values
                    .iter()
                    .map(|v| self.to_indexes(v))
                    .collect::<Result<Vec<_>>>()?,
            )),
            other => Err(invalid_input(format!(
                "Vocabulary expects tokens but found {}",
                other
            ))),
        }
    }
}

impl Component for VocabularyComponent {
    fn call(&self, batches: &[Value]) -> Result<Vec<Value>> {
        batches.iter().map(|batch| self.to_indexes(batch)).collect()
    }
}

#[derive(Debug, Default, Deserialize)]
struct SlotValueFilterParams {
    #[serde(default)]
    max_num_values: Option<usize>,
    #[serde(default)]
    ordering: CandidateOrdering,
}

pub struct SlotValueFilterComponent {
    filter: SlotValueFilter,
}

impl SlotValueFilterComponent {
    pub fn new(filter: SlotValueFilter) -> Self {
        Self { filter }
    }

    pub fn from_config(config: &ComponentConfig) -> Result<Self> {
        let params: SlotValueFilterParams = config.params()?;
        Ok(Self::new(
            SlotValueFilter::new(params.max_num_values).with_ordering(params.ordering),
        ))
    }
}

impl Component for SlotValueFilterComponent {
    fn call(&self, batches: &[Value]) -> Result<Vec<Value>> {
        let variables = batches
            .iter()
            .map(|batch| {
                batch_items(batch, "slot_value_filter")?
                    .iter()
                    .map(SlotCandidates::from_json)
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;
        let filtered = self
            .filter
            .filter_batch(&variables)?
            .into_iter()
            .map(pairs_to_json)
            .collect();
        Ok(vec![Value::Array(filtered)])
    }
}
