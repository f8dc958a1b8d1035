mod slot_value_filter;

pub use self::slot_value_filter::{
    pairs_to_json, CandidateOrdering, SlotCandidates, SlotValueFilter,
};
