use std::fs::File;
use std::path::Path;

use failure::ResultExt;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::errors::*;
use crate::utils::VariableName;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ComponentConfig {
    pub class_name: String,
    #[serde(rename = "in", default)]
    pub inputs: Vec<VariableName>,
    #[serde(rename = "out", default)]
    pub outputs: Vec<VariableName>,
    #[serde(flatten)]
    pub params: Map<String, Value>,
}

impl ComponentConfig {
    pub fn new<S: Into<String>>(class_name: S) -> Self {
        Self {
            class_name: class_name.into(),
            inputs: vec![],
            outputs: vec![],
            params: Map::new(),
        }
    }

    pub fn param<S: Into<String>>(mut self, name: S, value: Value) -> Self {
        self.params.insert(name.into(), value);
        self
    }

    /// Deserializes the component specific parameters.
    pub fn params<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_value(Value::Object(self.params.clone())).map_err(|e| {
            invalid_input(format!(
                "Invalid parameters for component '{}': {}",
                self.class_name, e
            ))
        })
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PipelineConfig {
    #[serde(rename = "in")]
    pub inputs: Vec<VariableName>,
    #[serde(rename = "out")]
    pub outputs: Vec<VariableName>,
    pub pipe: Vec<ComponentConfig>,
}

impl PipelineConfig {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config_path = path.as_ref();
        let config_file = File::open(config_path)
            .with_context(|_| IntentSlotError::ConfigLoad(format!("{:?}", config_path)))?;
        let config = serde_json::from_reader(config_file).with_context(|_| {
            format!("Cannot deserialize pipeline config file '{:?}'", config_path)
        })?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    use super::*;
    use crate::testutils::test_data_path;

    #[derive(Debug, Deserialize, PartialEq)]
    struct FilterParams {
        max_num_values: Option<usize>,
    }

    #[test]
    fn should_deserialize_component_config() {
        // Given
        let data = r#"{
            "class_name": "slot_value_filter",
            "in": ["candidates"],
            "out": ["filtered"],
            "max_num_values": 2
        }"#;

        // When
        let config: ComponentConfig = serde_json::from_str(data).unwrap();

        // Then
        assert_eq!("slot_value_filter", config.class_name);
        assert_eq!(vec!["candidates".to_string()], config.inputs);
        assert_eq!(vec!["filtered".to_string()], config.outputs);
        assert_eq!(Some(&json!(2)), config.params.get("max_num_values"));
        assert_eq!(
            FilterParams {
                max_num_values: Some(2)
            },
            config.params().unwrap()
        );
    }

    #[test]
    fn should_reject_invalid_params() {
        // Given
        let config = ComponentConfig::new("slot_value_filter").param("max_num_values", json!("two"));

        // When
        let params = config.params::<FilterParams>();

        // Then
        assert!(params.is_err());
    }

    #[test]
    fn should_load_pipeline_config_from_path() {
        // When
        let config = PipelineConfig::from_path(test_data_path().join("pipeline.json")).unwrap();

        // Then
        assert_eq!(vec!["records".to_string(), "candidates".to_string()], config.inputs);
        assert_eq!(3, config.pipe.len());
        assert_eq!("snips_intent_slot_tagger", config.pipe[0].class_name);
    }

    #[test]
    fn should_fail_to_load_missing_config() {
        assert!(PipelineConfig::from_path(test_data_path().join("missing.json")).is_err());
    }
}
