use log::info;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Deserialize;

use crate::models::{DataType, DatasetSplits, IntentRecord};
use crate::tagging::{tag_record, TaggedSentence, TaggingScheme};
use crate::utils::IntentName;

/// Tokens of each sentence, along with the intent and the tags of each
/// sentence.
pub type Batch = (Vec<Vec<String>>, Vec<(IntentName, Vec<String>)>);

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IteratorConfig {
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_shuffle")]
    pub shuffle: bool,
    #[serde(default)]
    pub tagging_scheme: TaggingScheme,
}

fn default_shuffle() -> bool {
    true
}

impl Default for IteratorConfig {
    fn default() -> Self {
        Self {
            seed: None,
            shuffle: default_shuffle(),
            tagging_scheme: TaggingScheme::default(),
        }
    }
}

pub struct IntentSlotIterator {
    train: Vec<TaggedSentence>,
    valid: Vec<TaggedSentence>,
    test: Vec<TaggedSentence>,
    shuffle: bool,
    rng: StdRng,
}

impl IntentSlotIterator {
    pub fn new(splits: &DatasetSplits, config: IteratorConfig) -> Self {
        let scheme = config.tagging_scheme;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let iterator = Self {
            train: Self::preprocess(&splits.train, scheme),
            valid: Self::preprocess(&splits.valid, scheme),
            test: Self::preprocess(&splits.test, scheme),
            shuffle: config.shuffle,
            rng,
        };
        info!(
            "Tagged {} train, {} valid and {} test sentences",
            iterator.train.len(),
            iterator.valid.len(),
            iterator.test.len()
        );
        iterator
    }

    pub fn preprocess(records: &[IntentRecord], scheme: TaggingScheme) -> Vec<TaggedSentence> {
        records
            .iter()
            .map(|record| tag_record(record, scheme))
            .collect()
    }

    pub fn sentences(&self, data_type: DataType) -> &[TaggedSentence] {
        match data_type {
            DataType::Train => &self.train,
            DataType::Valid => &self.valid,
            DataType::Test => &self.test,
        }
    }

    /// All the sentences of a split, in dataset order.
    pub fn get_instances(&self, data_type: DataType) -> Batch {
        to_batch(self.sentences(data_type).iter())
    }

    /// Splits the sentences into batches of `batch_size` sentences, the last
    /// one being possibly smaller. A batch size of 0 puts the whole split in
    /// a single batch. `shuffle` overrides the iterator configuration.
    pub fn gen_batches(
        &mut self,
        batch_size: usize,
        data_type: DataType,
        shuffle: Option<bool>,
    ) -> std::vec::IntoIter<Batch> {
        let nb_sentences = self.sentences(data_type).len();
        let mut order: Vec<usize> = (0..nb_sentences).collect();
        if shuffle.unwrap_or(self.shuffle) {
            order.shuffle(&mut self.rng);
        }
        let batch_size = if batch_size == 0 {
            nb_sentences.max(1)
        } else {
            batch_size
        };
        let sentences = self.sentences(data_type);
        order
            .chunks(batch_size)
            .map(|indexes| to_batch(indexes.iter().map(|i| &sentences[*i])))
            .collect::<Vec<_>>()
            .into_iter()
    }
}

fn to_batch<'a, I>(sentences: I) -> Batch
where
    I: Iterator<Item = &'a TaggedSentence>,
{
    sentences
        .map(|sentence| {
            (
                sentence.tokens.clone(),
                (sentence.intent.clone(), sentence.tags.clone()),
            )
        })
        .unzip()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutils::sample_dataset;

    fn seeded_config(shuffle: bool) -> IteratorConfig {
        IteratorConfig {
            seed: Some(42),
            shuffle,
            ..IteratorConfig::default()
        }
    }

    #[test]
    fn should_deserialize_config_with_defaults() {
        // When
        let config: IteratorConfig = serde_json::from_str(r#"{"seed": 3}"#).unwrap();

        // Then
        assert_eq!(Some(3), config.seed);
        assert!(config.shuffle);
        assert_eq!(TaggingScheme::BIO, config.tagging_scheme);
    }

    #[test]
    fn should_tag_every_split() {
        // Given
        let splits = sample_dataset();

        // When
        let iterator = IntentSlotIterator::new(&splits, seeded_config(false));

        // Then
        assert_eq!(4, iterator.sentences(DataType::Train).len());
        assert_eq!(1, iterator.sentences(DataType::Valid).len());
        assert!(iterator.sentences(DataType::Test).is_empty());
    }

    #[test]
    fn should_get_instances_in_dataset_order() {
        // Given
        let iterator = IntentSlotIterator::new(&sample_dataset(), seeded_config(true));

        // When
        let (tokens, targets) = iterator.get_instances(DataType::Train);

        // Then
        assert_eq!(vec!["play", "the", "song", "hello"], tokens[0]);
        assert_eq!(
            (
                "PlayMusic".to_string(),
                vec![
                    "O".to_string(),
                    "O".to_string(),
                    "O".to_string(),
                    "B-song_name".to_string()
                ]
            ),
            targets[0]
        );
        assert_eq!(4, targets.len());
    }

    #[test]
    fn should_generate_batches_of_requested_size() {
        // Given
        let mut iterator = IntentSlotIterator::new(&sample_dataset(), seeded_config(false));

        // When
        let batches: Vec<Batch> = iterator.gen_batches(3, DataType::Train, None).collect();

        // Then
        let sizes: Vec<usize> = batches.iter().map(|(tokens, _)| tokens.len()).collect();
        assert_eq!(vec![3, 1], sizes);
        assert_eq!(iterator.get_instances(DataType::Train).0[..3], batches[0].0[..]);
    }

    #[test]
    fn should_release_the_iterator_once_batches_are_generated() {
        // Given
        let mut iterator = IntentSlotIterator::new(&sample_dataset(), seeded_config(true));

        // When
        let batches = iterator.gen_batches(2, DataType::Train, None);
        let (tokens, _) = iterator.get_instances(DataType::Train);

        // Then
        let nb_batched_sentences: usize = batches.map(|(sentences, _)| sentences.len()).sum();
        assert_eq!(tokens.len(), nb_batched_sentences);
    }

    #[test]
    fn should_put_whole_split_in_one_batch_when_size_is_zero() {
        // Given
        let mut iterator = IntentSlotIterator::new(&sample_dataset(), seeded_config(false));

        // When
        let batches: Vec<Batch> = iterator.gen_batches(0, DataType::Train, None).collect();

        // Then
        assert_eq!(1, batches.len());
        assert_eq!(4, batches[0].0.len());
    }

    #[test]
    fn should_generate_no_batch_for_empty_split() {
        // Given
        let mut iterator = IntentSlotIterator::new(&sample_dataset(), seeded_config(true));

        // When
        let nb_batches = iterator.gen_batches(0, DataType::Test, None).count();

        // Then
        assert_eq!(0, nb_batches);
    }

    #[test]
    fn should_shuffle_reproducibly_with_a_seed() {
        // Given
        let mut first_iterator = IntentSlotIterator::new(&sample_dataset(), seeded_config(true));
        let mut second_iterator = IntentSlotIterator::new(&sample_dataset(), seeded_config(true));

        // When
        let first: Vec<Batch> = first_iterator.gen_batches(1, DataType::Train, None).collect();
        let second: Vec<Batch> = second_iterator
            .gen_batches(1, DataType::Train, None)
            .collect();

        // Then
        assert_eq!(first, second);
        let mut seen_tokens: Vec<Vec<String>> =
            first.into_iter().flat_map(|(tokens, _)| tokens).collect();
        let mut expected_tokens = first_iterator.get_instances(DataType::Train).0;
        seen_tokens.sort();
        expected_tokens.sort();
        assert_eq!(expected_tokens, seen_tokens);
    }
}
