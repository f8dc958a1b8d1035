use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::components::{
    Component, SlotValueFilterComponent, StrLowerComponent, TaggerComponent,
    VocabularyComponent,
};
use crate::errors::*;
use crate::models::ComponentConfig;

pub type ComponentConstructor = fn(&ComponentConfig) -> Result<Box<dyn Component>>;

/// Lookup table from component names, as found in pipeline configurations,
/// to their constructors.
#[derive(Clone, Default)]
pub struct ComponentRegistry {
    constructors: HashMap<String, ComponentConstructor>,
}

lazy_static! {
    static ref BUILTIN_REGISTRY: ComponentRegistry = ComponentRegistry::builtin();
}

pub fn builtin_registry() -> &'static ComponentRegistry {
    &BUILTIN_REGISTRY
}

impl ComponentRegistry {
    pub fn builtin() -> Self {
        Self::default()
            .with_component("snips_intent_slot_tagger", |config| {
                Ok(Box::new(TaggerComponent::from_config(config)?) as _)
            })
            .with_component("slot_value_filter", |config| {
                Ok(Box::new(SlotValueFilterComponent::from_config(config)?) as _)
            })
            .with_component("str_lower", |_| Ok(Box::new(StrLowerComponent) as _))
            .with_component("simple_vocab", |config| {
                Ok(Box::new(VocabularyComponent::from_config(config)?) as _)
            })
    }

    pub fn with_component<S: Into<String>>(
        mut self,
        name: S,
        constructor: ComponentConstructor,
    ) -> Self {
        self.constructors.insert(name.into(), constructor);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(name)
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.constructors.keys().map(|name| &**name).collect();
        names.sort();
        names
    }

    pub fn build(&self, config: &ComponentConfig) -> Result<Box<dyn Component>> {
        let constructor = self
            .constructors
            .get(&config.class_name)
            .ok_or_else(|| IntentSlotError::UnknownComponent(config.class_name.clone()))?;
        constructor(config)
    }
}
