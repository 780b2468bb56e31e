//! CMIP6 catalog search summaries.
//!
//! [`CatalogSearch::try_run`] reports why a search failed: nothing matched, a
//! column was missing, or the diagnostic dataset could not be read.
//! [`CatalogSearch::run`] and [`search`] fold every failure into the
//! all-absent [`SearchResult`], logging the query when a logger is present.

use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::catalog::{Catalog, CatalogFrame, URI_COLUMN};
use crate::dataset::DatasetOpener;
use crate::error::{Cmip6Error, Result};
use crate::logging::{log_timed_operation, SearchLogger};
use crate::members::{sort_and_filter_members, DEFAULT_MAX_INITIALIZATION};
use crate::query::{SearchQuery, DEFAULT_FREQUENCY};
use crate::summary::{most_frequent, InstitutionOverrides, SearchResult, SearchSummary};

#[cfg(feature = "netcdf")]
static DEFAULT_OPENER: crate::dataset::NetcdfOpener = crate::dataset::NetcdfOpener;

/// Search `catalog` for monthly `variable` output of `scenario`.
///
/// Returns the all-absent result when nothing usable is found.
pub fn search<C: Catalog + ?Sized>(
    catalog: &C,
    scenario: &str,
    variable: &str,
    member: Option<&str>,
    model: Option<&str>,
    logger: Option<&dyn SearchLogger>,
) -> SearchResult {
    let search = CatalogSearch::new(catalog).with_logger(logger);
    let query = search.query(scenario, variable, member, model);
    search.run(&query)
}

/// A configured catalog search
pub struct CatalogSearch<'a, C: Catalog + ?Sized> {
    catalog: &'a C,
    logger: Option<&'a dyn SearchLogger>,
    opener: Option<&'a dyn DatasetOpener>,
    overrides: InstitutionOverrides,
    max_initialization: u64,
    frequency: String,
}

impl<'a, C: Catalog + ?Sized> CatalogSearch<'a, C> {
    /// Search with the built-in institution overrides and no logger
    pub fn new(catalog: &'a C) -> Self {
        #[cfg(feature = "netcdf")]
        let opener: Option<&'a dyn DatasetOpener> = Some(&DEFAULT_OPENER);
        #[cfg(not(feature = "netcdf"))]
        let opener: Option<&'a dyn DatasetOpener> = None;

        Self {
            catalog,
            logger: None,
            opener,
            overrides: InstitutionOverrides::default(),
            max_initialization: DEFAULT_MAX_INITIALIZATION,
            frequency: DEFAULT_FREQUENCY.to_string(),
        }
    }

    /// Report diagnostics to `logger`
    pub fn with_logger(mut self, logger: Option<&'a dyn SearchLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Read diagnostic datasets through `opener`
    pub fn with_opener(mut self, opener: Option<&'a dyn DatasetOpener>) -> Self {
        self.opener = opener;
        self
    }

    /// Replace the institution override table
    pub fn with_overrides(mut self, overrides: InstitutionOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Keep members whose initialization index is below `max`
    pub fn with_max_initialization(mut self, max: u64) -> Self {
        self.max_initialization = max;
        self
    }

    /// Output frequency used by [`CatalogSearch::query`]
    pub fn with_frequency(mut self, frequency: impl Into<String>) -> Self {
        self.frequency = frequency.into();
        self
    }

    /// Build the query for a scenario and variable
    pub fn query(
        &self,
        scenario: &str,
        variable: &str,
        member: Option<&str>,
        model: Option<&str>,
    ) -> SearchQuery {
        SearchQuery::new(scenario, variable)
            .with_frequency(self.frequency.as_str())
            .with_model(model)
            .with_member(member)
    }

    /// Run the search, folding failures into the all-absent result
    pub fn run(&self, query: &SearchQuery) -> SearchResult {
        match log_timed_operation("catalog_search", || self.try_run(query)) {
            Ok(summary) => summary.into(),
            Err(e) => {
                debug!(error = %e, query = %query, "Catalog search failed");
                if let Some(logger) = self.logger {
                    logger.warning("Search not successful");
                    logger.warning(&query.to_string());
                    logger.warning(&e.to_string());
                }
                SearchResult::absent()
            }
        }
    }

    /// Run the search and summarize the matches
    pub fn try_run(&self, query: &SearchQuery) -> Result<SearchSummary> {
        let frame = self.catalog.search(query)?;
        if frame.is_empty() {
            return Err(Cmip6Error::EmptyResult {
                query: query.to_string(),
            });
        }

        let table_id = most_frequent(frame.values("table_id")?).ok_or_else(|| {
            Cmip6Error::MissingColumn {
                column: "table_id".to_string(),
            }
        })?;
        let activity_id = frame.first("activity_id")?;
        let model_list: Vec<String> = frame
            .distinct("source_id")?
            .into_iter()
            .map(str::to_string)
            .collect();

        if let Some(logger) = self.logger {
            self.log_diagnostics(logger, &frame, &query.variable_id, table_id)?;
        }

        let mut model_centers = BTreeMap::new();
        let mut ensemble_members = BTreeMap::new();
        for model in &model_list {
            let rows = frame.rows_where("source_id", model)?;

            // any institution will do; take the first one listed
            let institution = rows
                .values("institution_id")?
                .into_iter()
                .next()
                .ok_or_else(|| Cmip6Error::MissingColumn {
                    column: "institution_id".to_string(),
                })?;
            model_centers.insert(model.clone(), institution.to_string());

            let members = sort_and_filter_members(
                rows.values("member_id")?,
                self.max_initialization,
            )?;
            ensemble_members.insert(model.clone(), members);
        }
        self.overrides.apply(&mut model_centers);

        let unit = most_frequent(frame.values("units")?).ok_or_else(|| {
            Cmip6Error::MissingColumn {
                column: "units".to_string(),
            }
        })?;

        if model_list.is_empty() {
            warn!(query = %query, "Matched records carry no source_id");
        }

        Ok(SearchSummary {
            activity_id: activity_id.to_string(),
            table_id: table_id.to_string(),
            model_list,
            model_centers,
            ensemble_members,
            unit: unit.to_string(),
        })
    }

    fn log_diagnostics(
        &self,
        logger: &dyn SearchLogger,
        frame: &CatalogFrame,
        variable: &str,
        table_id: &str,
    ) -> Result<()> {
        logger.warning(&format!("VARIABLE:  {}", variable));

        let tables = frame.distinct("table_id")?;
        if tables.len() > 1 {
            logger.warning(&format!("More than one table_id: {:?}", tables));
        }
        logger.info(&format!("table_id:  {}", table_id));
        logger.info(&format!("long_name: {}", frame.first("long_name")?));
        logger.info(&format!("units:     {:?}", frame.distinct("units")?));

        let uri = frame.first(URI_COLUMN)?;
        logger.debug(&format!("uri:       {}", uri));

        match self.opener {
            Some(opener) => {
                let dataset = opener.open(uri)?;
                let mean = dataset.first_step_mean(variable);
                dataset.close();
                logger.info(&format!("mean for t=0: {}", mean?));
            }
            None => logger.debug("no dataset opener configured, skipping mean for t=0"),
        }
        Ok(())
    }
}
