mod intent_slot_iterator;

pub use self::intent_slot_iterator::{Batch, IntentSlotIterator, IteratorConfig};
