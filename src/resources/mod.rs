pub mod vocabulary;

pub use self::vocabulary::{Vocabulary, VocabularyConfig};
