mod builtin_components;
mod pipeline;
mod registry;

use std::path::Path;

use serde_json::Value;

pub use self::builtin_components::{
    SlotValueFilterComponent, StrLowerComponent, TaggerComponent, VocabularyComponent,
};
pub use self::pipeline::Pipeline;
pub use self::registry::{builtin_registry, ComponentConstructor, ComponentRegistry};
use crate::errors::*;

/// A processing step working on json batches: each argument holds one value
/// per sample, and so does each returned output.
pub trait Component: Send + Sync {
    fn call(&self, batches: &[Value]) -> Result<Vec<Value>>;
}

pub trait TrainableComponent: Send + Sync {
    type Input;
    type Output;

    fn train_on_batch(&mut self, batch: &[Self::Input]) -> Result<()>;

    fn infer(&self, batch: &[Self::Input]) -> Result<Vec<Self::Output>>;

    fn save(&self, path: &Path) -> Result<()>;

    fn load(&mut self, path: &Path) -> Result<()>;
}
