use std::io::Read;

use failure::ResultExt;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::*;
use crate::utils::{EntityName, IntentName};

/// A fragment of an utterance, optionally annotated with the entity it
/// holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<EntityName>,
}

impl Chunk {
    pub fn text<S: Into<String>>(text: S) -> Self {
        Self {
            text: text.into(),
            entity: None,
        }
    }

    pub fn entity<S: Into<String>, E: Into<EntityName>>(text: S, entity: E) -> Self {
        Self {
            text: text.into(),
            entity: Some(entity.into()),
        }
    }

    /// Empty entity names are considered as no entity.
    pub fn entity_label(&self) -> Option<&str> {
        self.entity.as_ref().map(|e| &**e).filter(|e| !e.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentRecord {
    pub intent: IntentName,
    pub data: Vec<Chunk>,
}

impl IntentRecord {
    pub fn from_json(value: &Value) -> Result<Self> {
        serde_json::from_value(value.clone())
            .map_err(|e| invalid_input(format!("Malformed intent record {}: {}", value, e)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    Train,
    Valid,
    Test,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatasetSplits {
    pub train: Vec<IntentRecord>,
    pub valid: Vec<IntentRecord>,
    pub test: Vec<IntentRecord>,
}

impl DatasetSplits {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let value: Value = serde_json::from_reader(reader)
            .with_context(|_| "Cannot deserialize dataset json data")?;
        let object = value
            .as_object()
            .ok_or_else(|| invalid_input("Dataset must be a json object of splits"))?;
        let mut splits = DatasetSplits::default();
        for (split_name, records) in object {
            let parsed_records = records
                .as_array()
                .ok_or_else(|| invalid_input(format!("Split '{}' is not a list", split_name)))?
                .iter()
                .map(IntentRecord::from_json)
                .collect::<Result<Vec<_>>>()?;
            match &**split_name {
                "train" => splits.train = parsed_records,
                "valid" => splits.valid = parsed_records,
                "test" => splits.test = parsed_records,
                _ => return Err(invalid_input(format!("Unknown split '{}'", split_name))),
            }
        }
        Ok(splits)
    }

    pub fn split(&self, data_type: DataType) -> &[IntentRecord] {
        match data_type {
            DataType::Train => &self.train,
            DataType::Valid => &self.valid,
            DataType::Test => &self.test,
        }
    }
}
