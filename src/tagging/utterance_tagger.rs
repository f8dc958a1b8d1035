use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::*;
use crate::models::{Chunk, IntentRecord};
use crate::preprocessing::tokenize_light;
use crate::tagging::tagging_utils::{positive_tagging, TaggingScheme, OUTSIDE};
use crate::utils::IntentName;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaggedUtterance {
    pub tokens: Vec<String>,
    pub tags: Vec<String>,
}

/// A tagged utterance along with its intent, ready for vocabulary fitting
/// and batching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaggedSentence {
    pub tokens: Vec<String>,
    pub intent: IntentName,
    pub tags: Vec<String>,
}

impl TaggedSentence {
    pub fn into_tuple(self) -> (Vec<String>, (IntentName, Vec<String>)) {
        (self.tokens, (self.intent, self.tags))
    }

    /// `[tokens, [intent, tags]]`
    pub fn to_json(&self) -> Value {
        Value::Array(vec![
            Value::from(self.tokens.clone()),
            Value::Array(vec![
                Value::from(self.intent.clone()),
                Value::from(self.tags.clone()),
            ]),
        ])
    }
}

pub fn tag_utterance(chunks: &[Chunk], tagging_scheme: TaggingScheme) -> TaggedUtterance {
    let mut tagged_utterance = TaggedUtterance::default();
    for chunk in chunks {
        let chunk_tokens = tokenize_light(&chunk.text);
        let chunk_tags = match chunk.entity_label() {
            Some(slot_name) => positive_tagging(tagging_scheme, slot_name, chunk_tokens.len()),
            None => vec![OUTSIDE.to_string(); chunk_tokens.len()],
        };
        tagged_utterance.tags.extend(chunk_tags);
        tagged_utterance.tokens.extend(chunk_tokens);
    }
    tagged_utterance
}

pub fn tag_record(record: &IntentRecord, tagging_scheme: TaggingScheme) -> TaggedSentence {
    let TaggedUtterance { tokens, tags } = tag_utterance(&record.data, tagging_scheme);
    TaggedSentence {
        tokens,
        intent: record.intent.clone(),
        tags,
    }
}

/// Tags raw json records, failing on the first record which does not have
/// the `{"intent": .., "data": [{"text": .., "entity": ..}, ..]}` shape.
pub fn tag_json_records(
    records: &[Value],
    tagging_scheme: TaggingScheme,
) -> Result<Vec<TaggedSentence>> {
    records
        .iter()
        .map(|value| Ok(tag_record(&IntentRecord::from_json(value)?, tagging_scheme)))
        .collect()
}
