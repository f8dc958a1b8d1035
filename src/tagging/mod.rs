mod tagging_utils;
mod utterance_tagger;

pub use self::tagging_utils::{
    positive_tagging, TaggingScheme, BEGINNING_PREFIX, INSIDE_PREFIX, LAST_PREFIX, OUTSIDE,
    UNIT_PREFIX,
};
pub use self::utterance_tagger::{
    tag_json_records, tag_record, tag_utterance, TaggedSentence, TaggedUtterance,
};
