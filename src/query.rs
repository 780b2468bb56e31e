//! Catalog query construction.
//!
//! A [`SearchQuery`] is the set of facet constraints sent to a
//! [`Catalog`](crate::catalog::Catalog). Facets are matched by exact string
//! equality on the catalog columns of the same name.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default output frequency for searches
pub const DEFAULT_FREQUENCY: &str = "mon";

/// Scenario prefix identifying ScenarioMIP experiments
const SCENARIO_MIP_PREFIX: &str = "ssp";

/// CMIP6 activity a scenario belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Activity {
    /// Future scenario experiments (`ssp126`, `ssp585`, ...)
    ScenarioMip,
    /// Everything else (`historical`, `piControl`, ...)
    Cmip,
}

impl Activity {
    /// Derive the activity from an experiment id
    pub fn for_scenario(scenario: &str) -> Self {
        if scenario.starts_with(SCENARIO_MIP_PREFIX) {
            Activity::ScenarioMip
        } else {
            Activity::Cmip
        }
    }

    /// The `activity_id` value used in the catalog
    pub fn as_str(&self) -> &'static str {
        match self {
            Activity::ScenarioMip => "ScenarioMIP",
            Activity::Cmip => "CMIP",
        }
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Facet constraints for a catalog search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Experiment id, e.g. `ssp585` or `historical`
    pub experiment_id: String,
    /// Variable id, e.g. `tas`
    pub variable_id: String,
    /// Output frequency
    pub frequency: String,
    /// Activity derived from the experiment id
    pub activity: Activity,
    /// Restrict to one model
    pub source_id: Option<String>,
    /// Restrict to one ensemble member
    pub member_id: Option<String>,
}

impl SearchQuery {
    /// Build a monthly query for a scenario and variable
    pub fn new(scenario: impl Into<String>, variable: impl Into<String>) -> Self {
        let experiment_id = scenario.into();
        let activity = Activity::for_scenario(&experiment_id);
        Self {
            experiment_id,
            variable_id: variable.into(),
            frequency: DEFAULT_FREQUENCY.to_string(),
            activity,
            source_id: None,
            member_id: None,
        }
    }

    /// Restrict the search to a model when one is given
    pub fn with_model(mut self, model: Option<impl Into<String>>) -> Self {
        self.source_id = model.map(Into::into);
        self
    }

    /// Restrict the search to an ensemble member when one is given
    pub fn with_member(mut self, member: Option<impl Into<String>>) -> Self {
        self.member_id = member.map(Into::into);
        self
    }

    /// Override the output frequency
    pub fn with_frequency(mut self, frequency: impl Into<String>) -> Self {
        self.frequency = frequency.into();
        self
    }

    /// Column/value pairs in query order
    pub fn facets(&self) -> Vec<(&'static str, &str)> {
        let mut facets = vec![
            ("experiment_id", self.experiment_id.as_str()),
            ("variable_id", self.variable_id.as_str()),
            ("frequency", self.frequency.as_str()),
            ("activity_id", self.activity.as_str()),
        ];
        if let Some(model) = &self.source_id {
            facets.push(("source_id", model.as_str()));
        }
        if let Some(member) = &self.member_id {
            facets.push(("member_id", member.as_str()));
        }
        facets
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (column, value)) in self.facets().iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", column, value)?;
        }
        f.write_str("}")
    }
}
