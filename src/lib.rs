mod candidates;
mod components;
mod dataset;
pub mod errors;
mod models;
mod preprocessing;
mod resources;
mod tagging;
#[cfg(test)]
mod testutils;
mod utils;

pub use crate::candidates::*;
pub use crate::components::*;
pub use crate::dataset::*;
pub use crate::errors::{IntentSlotError, Result};
pub use crate::models::*;
pub use crate::preprocessing::{lowercase_tokens, str_lower, tokenize, tokenize_light, Token};
pub use crate::resources::{Vocabulary, VocabularyConfig};
pub use crate::tagging::*;
pub use crate::utils::{EntityName, IntentName, SlotName, VariableName};
