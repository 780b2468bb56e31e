//! Search result summaries.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

use crate::error::Result;

/// Most frequent item of a sequence.
///
/// When several items share the highest count, the one seen first wins.
/// Returns `None` for an empty sequence.
pub fn most_frequent<I, T>(items: I) -> Option<T>
where
    I: IntoIterator<Item = T>,
    T: Eq + Hash + Clone,
{
    let mut counts: HashMap<T, usize> = HashMap::new();
    let mut order: Vec<T> = Vec::new();
    for item in items {
        let count = counts.entry(item.clone()).or_insert(0);
        if *count == 0 {
            order.push(item);
        }
        *count += 1;
    }

    let mut best: Option<(T, usize)> = None;
    for item in order {
        let count = counts[&item];
        if best.as_ref().map_or(true, |(_, max)| count > *max) {
            best = Some((item, count));
        }
    }
    best.map(|(item, _)| item)
}

/// Model → institution overrides applied after the catalog lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstitutionOverrides(BTreeMap<String, String>);

/// Models run by more than one institution, pinned to the lead one
const BUILTIN_OVERRIDES: &[(&str, &str)] = &[("UKESM1-0-LL", "MOHC")];

impl InstitutionOverrides {
    /// An empty table
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    /// Add or replace the institution for a model
    pub fn insert(&mut self, model: impl Into<String>, institution: impl Into<String>) {
        self.0.insert(model.into(), institution.into());
    }

    /// Merge another table over this one
    pub fn extend(&mut self, other: &InstitutionOverrides) {
        for (model, institution) in &other.0 {
            self.insert(model.clone(), institution.clone());
        }
    }

    /// Override for a model, if any
    pub fn get(&self, model: &str) -> Option<&str> {
        self.0.get(model).map(String::as_str)
    }

    /// Replace institutions of overridden models in a center map
    pub fn apply(&self, centers: &mut BTreeMap<String, String>) {
        for (model, institution) in centers.iter_mut() {
            if let Some(pinned) = self.get(model) {
                *institution = pinned.to_string();
            }
        }
    }
}

impl Default for InstitutionOverrides {
    fn default() -> Self {
        let mut overrides = Self::empty();
        for (model, institution) in BUILTIN_OVERRIDES {
            overrides.insert(*model, *institution);
        }
        overrides
    }
}

/// Summary of the catalog records matching a search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSummary {
    /// Activity id of the first matching record
    pub activity_id: String,
    /// Most frequent table id
    pub table_id: String,
    /// Distinct models, sorted
    pub model_list: Vec<String>,
    /// Institution per model
    pub model_centers: BTreeMap<String, String>,
    /// Kept ensemble members per model, ordered by realization
    pub ensemble_members: BTreeMap<String, Vec<String>>,
    /// Most frequent unit
    pub unit: String,
}

/// Search outcome where every field is absent on failure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub activity_id: Option<String>,
    pub table_id: Option<String>,
    pub model_list: Option<Vec<String>>,
    pub model_centers: Option<BTreeMap<String, String>>,
    pub ensemble_members: Option<BTreeMap<String, Vec<String>>>,
    pub unit: Option<String>,
}

/// Field tuple of a [`SearchResult`], in declaration order
pub type SearchTuple = (
    Option<String>,
    Option<String>,
    Option<Vec<String>>,
    Option<BTreeMap<String, String>>,
    Option<BTreeMap<String, Vec<String>>>,
    Option<String>,
);

impl SearchResult {
    /// The all-absent result
    pub fn absent() -> Self {
        Self::default()
    }

    /// Whether every field is absent
    pub fn is_absent(&self) -> bool {
        *self == Self::absent()
    }

    /// Convert into a tuple of fields
    pub fn into_tuple(self) -> SearchTuple {
        (
            self.activity_id,
            self.table_id,
            self.model_list,
            self.model_centers,
            self.ensemble_members,
            self.unit,
        )
    }
}

impl From<SearchSummary> for SearchResult {
    fn from(summary: SearchSummary) -> Self {
        Self {
            activity_id: Some(summary.activity_id),
            table_id: Some(summary.table_id),
            model_list: Some(summary.model_list),
            model_centers: Some(summary.model_centers),
            ensemble_members: Some(summary.ensemble_members),
            unit: Some(summary.unit),
        }
    }
}

impl From<Result<SearchSummary>> for SearchResult {
    fn from(result: Result<SearchSummary>) -> Self {
        result.map(Into::into).unwrap_or_default()
    }
}
