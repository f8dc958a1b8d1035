use std::collections::{HashMap, HashSet};
use std::path::Path;

use log::{debug, info};
use serde_json::Value;

use crate::components::{builtin_registry, Component, ComponentRegistry};
use crate::errors::*;
use crate::models::PipelineConfig;
use crate::utils::VariableName;

struct Stage {
    name: String,
    inputs: Vec<VariableName>,
    outputs: Vec<VariableName>,
    component: Box<dyn Component>,
}

/// Chains components through named variables: each stage reads some
/// variables and writes its outputs as new variables.
pub struct Pipeline {
    inputs: Vec<VariableName>,
    outputs: Vec<VariableName>,
    stages: Vec<Stage>,
}

impl Pipeline {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = PipelineConfig::from_path(path)?;
        Self::from_config(&config, builtin_registry())
    }

    /// Fails when a stage reads a variable which is neither a pipeline input
    /// nor produced by a previous stage.
    pub fn from_config(config: &PipelineConfig, registry: &ComponentRegistry) -> Result<Self> {
        info!("Building pipeline with {} components ...", config.pipe.len());
        let mut available: HashSet<&str> = config.inputs.iter().map(|v| &**v).collect();
        let mut stages = Vec::with_capacity(config.pipe.len());
        for component_config in &config.pipe {
            if let Some(missing) = component_config
                .inputs
                .iter()
                .find(|input| !available.contains(&***input))
            {
                return Err(invalid_input(format!(
                    "Component '{}' reads unknown variable '{}'",
                    component_config.class_name, missing
                )));
            }
            let component = registry.build(component_config)?;
            available.extend(component_config.outputs.iter().map(|v| &**v));
            stages.push(Stage {
                name: component_config.class_name.clone(),
                inputs: component_config.inputs.clone(),
                outputs: component_config.outputs.clone(),
                component,
            });
        }
        if let Some(missing) = config
            .outputs
            .iter()
            .find(|output| !available.contains(&***output))
        {
            return Err(invalid_input(format!(
                "Pipeline output '{}' is never produced",
                missing
            )));
        }
        info!("Pipeline built");
        Ok(Self {
            inputs: config.inputs.clone(),
            outputs: config.outputs.clone(),
            stages,
        })
    }

    pub fn call(&self, inputs: Vec<Value>) -> Result<Vec<Value>> {
        if inputs.len() != self.inputs.len() {
            return Err(invalid_input(format!(
                "Pipeline expects {} inputs but received {}",
                self.inputs.len(),
                inputs.len()
            )));
        }
        let mut memory: HashMap<&str, Value> = self
            .inputs
            .iter()
            .map(|name| &**name)
            .zip(inputs)
            .collect();
        for stage in &self.stages {
            debug!("Running component '{}'", stage.name);
            let arguments = stage
                .inputs
                .iter()
                .map(|name| memory[&**name].clone())
                .collect::<Vec<_>>();
            let results = stage.component.call(&arguments)?;
            if results.len() != stage.outputs.len() {
                return Err(invalid_input(format!(
                    "Component '{}' returned {} outputs but {} are declared",
                    stage.name,
                    results.len(),
                    stage.outputs.len()
                )));
            }
            memory.extend(stage.outputs.iter().map(|name| &**name).zip(results));
        }
        Ok(self
            .outputs
            .iter()
            .map(|name| memory[&**name].clone())
            .collect())
    }
}
