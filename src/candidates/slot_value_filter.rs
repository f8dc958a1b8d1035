use std::collections::HashMap;

use itertools::Itertools;
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::*;
use crate::utils::SlotName;

/// Candidate values proposed for some slots, either as a ranked list of
/// `(slot, value)` pairs or as a single value per slot.
#[derive(Debug, Clone, PartialEq)]
pub enum SlotCandidates<V> {
    Pairs(Vec<(SlotName, V)>),
    Mapping(HashMap<SlotName, V>),
}

impl<V: Clone> SlotCandidates<V> {
    /// Mappings have no meaningful order, their pairs come by ascending slot
    /// name.
    pub fn pairs(&self) -> Vec<(SlotName, V)> {
        match self {
            SlotCandidates::Pairs(pairs) => pairs.clone(),
            SlotCandidates::Mapping(mapping) => mapping
                .iter()
                .sorted_by(|(lhs, _), (rhs, _)| lhs.cmp(rhs))
                .into_iter()
                .map(|(slot, value)| (slot.clone(), value.clone()))
                .collect(),
        }
    }
}

impl<V> From<Vec<(SlotName, V)>> for SlotCandidates<V> {
    fn from(pairs: Vec<(SlotName, V)>) -> Self {
        SlotCandidates::Pairs(pairs)
    }
}

impl<V> From<HashMap<SlotName, V>> for SlotCandidates<V> {
    fn from(mapping: HashMap<SlotName, V>) -> Self {
        SlotCandidates::Mapping(mapping)
    }
}

impl SlotCandidates<Value> {
    /// Accepts either a json object or a list of `[slot, value]` pairs.
    pub fn from_json(value: &Value) -> Result<Self> {
        match value {
            Value::Object(object) => Ok(SlotCandidates::Mapping(
                object
                    .iter()
                    .map(|(slot, value)| (slot.clone(), value.clone()))
                    .collect(),
            )),
            Value::Array(elements) => Ok(SlotCandidates::Pairs(
                elements
                    .iter()
                    .map(json_pair)
                    .collect::<Result<Vec<_>>>()?,
            )),
            other => Err(invalid_input(format!(
                "Expected slot candidates as an object or a list of pairs but found {}",
                other
            ))),
        }
    }
}

fn json_pair(element: &Value) -> Result<(SlotName, Value)> {
    match element.as_array().map(|pair| &**pair) {
        Some([Value::String(slot), value]) => Ok((slot.clone(), value.clone())),
        _ => Err(invalid_input(format!(
            "Expected a [slot, value] pair but found {}",
            element
        ))),
    }
}

pub fn pairs_to_json(pairs: Vec<(SlotName, Value)>) -> Value {
    Value::Array(
        pairs
            .into_iter()
            .map(|(slot, value)| Value::Array(vec![Value::String(slot), value]))
            .collect(),
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateOrdering {
    /// Slots come out sorted by name, whatever their order in the input.
    SlotNameAscending,
    /// Slots come out in the order of their first appearance in the input.
    IntakeOrder,
}

impl Default for CandidateOrdering {
    fn default() -> Self {
        CandidateOrdering::SlotNameAscending
    }
}

/// Combines lists of `(slot, value)` pairs sorted by descending score and
/// keeps the top candidates of each slot.
///
/// Within a slot, only consecutive duplicate values are collapsed: a value
/// which shows up again after a different one is kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlotValueFilter {
    max_num_values: Option<usize>,
    ordering: CandidateOrdering,
}

impl SlotValueFilter {
    pub fn new(max_num_values: Option<usize>) -> Self {
        Self {
            max_num_values,
            ordering: CandidateOrdering::default(),
        }
    }

    pub fn with_ordering(mut self, ordering: CandidateOrdering) -> Self {
        self.ordering = ordering;
        self
    }

    pub fn max_num_values(&self) -> Option<usize> {
        self.max_num_values
    }

    pub fn ordering(&self) -> CandidateOrdering {
        self.ordering
    }

    pub fn filter<V: PartialEq + Clone>(
        &self,
        batches: &[SlotCandidates<V>],
    ) -> Vec<(SlotName, V)> {
        let pairs: Vec<(SlotName, V)> = batches.iter().flat_map(|batch| batch.pairs()).collect();
        let nb_pairs = pairs.len();
        let grouped_values = match self.ordering {
            CandidateOrdering::SlotNameAscending => group_by_sorted_slot(pairs),
            CandidateOrdering::IntakeOrder => group_by_first_appearance(pairs),
        };
        let limit = self.max_num_values.unwrap_or(::std::usize::MAX);
        let filtered: Vec<(SlotName, V)> = grouped_values
            .into_iter()
            .flat_map(|(slot, values)| {
                values
                    .into_iter()
                    .dedup()
                    .take(limit)
                    .map(move |value| (slot.clone(), value))
            })
            .collect();
        debug!(
            "Kept {} slot candidates out of {}",
            filtered.len(),
            nb_pairs
        );
        filtered
    }

    /// Filters several samples at once. Each variable holds one candidates
    /// batch per sample, and the candidates of a sample are filtered
    /// together.
    pub fn filter_batch<V: PartialEq + Clone>(
        &self,
        variables: &[Vec<SlotCandidates<V>>],
    ) -> Result<Vec<Vec<(SlotName, V)>>> {
        let nb_samples = match variables.first() {
            Some(variable) => variable.len(),
            None => return Ok(vec![]),
        };
        if let Some(variable) = variables.iter().find(|v| v.len() != nb_samples) {
            return Err(invalid_input(format!(
                "All variables must have the same batch size, found {} and {}",
                nb_samples,
                variable.len()
            )));
        }
        Ok((0..nb_samples)
            .map(|sample_index| {
                let sample: Vec<SlotCandidates<V>> = variables
                    .iter()
                    .map(|variable| variable[sample_index].clone())
                    .collect();
                self.filter(&sample)
            })
            .collect())
    }
}

fn group_by_sorted_slot<V>(mut pairs: Vec<(SlotName, V)>) -> Vec<(SlotName, Vec<V>)> {
    // stable sort: values of a slot keep their relative order
    pairs.sort_by(|(lhs, _), (rhs, _)| lhs.cmp(rhs));
    let mut grouped = vec![];
    for (slot, group) in &pairs.into_iter().group_by(|(slot, _)| slot.clone()) {
        grouped.push((slot, group.map(|(_, value)| value).collect()));
    }
    grouped
}

fn group_by_first_appearance<V>(pairs: Vec<(SlotName, V)>) -> Vec<(SlotName, Vec<V>)> {
    let mut slot_indexes: HashMap<SlotName, usize> = HashMap::new();
    let mut grouped: Vec<(SlotName, Vec<V>)> = vec![];
    for (slot, value) in pairs {
        let index = *slot_indexes.entry(slot.clone()).or_insert_with(|| {
            grouped.push((slot, vec![]));
            grouped.len() - 1
        });
        grouped[index].1.push(value);
    }
    grouped
}
