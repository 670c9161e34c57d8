//! Search form state: inputs, base results, and the derived view.
//!
//! Every mutation of the base records or a filter field re-derives
//! [`FlightView`] before returning, so readers never observe a view that
//! lags behind the current inputs.

use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{error, info};

use crate::models::{FlightRecord, SearchCriteria};
use crate::services::filter::{AirlineFilter, FilterCriteria, FlightView, airline_options};
use crate::services::flight_service::{FlightSearchService, SearchError};
use crate::services::mapper::map_offers;

pub const SEARCH_FAILED_ALERT: &str = "Error fetching flights";

pub struct SearchState {
    service: Arc<dyn FlightSearchService>,
    criteria: SearchCriteria,
    filters: FilterCriteria,
    records: Vec<FlightRecord>,
    view: FlightView,
    loading: bool,
    alert: Option<String>,
}

impl SearchState {
    #[must_use]
    pub fn new(service: Arc<dyn FlightSearchService>, filters: FilterCriteria) -> Self {
        Self {
            service,
            criteria: SearchCriteria::default(),
            filters,
            records: Vec::new(),
            view: FlightView::default(),
            loading: false,
            alert: None,
        }
    }

    #[must_use]
    pub fn with_criteria(mut self, criteria: SearchCriteria) -> Self {
        self.criteria = criteria;
        self
    }

    #[must_use]
    pub const fn criteria(&self) -> &SearchCriteria {
        &self.criteria
    }

    #[must_use]
    pub const fn filters(&self) -> &FilterCriteria {
        &self.filters
    }

    /// Full result set of the last successful search.
    #[must_use]
    pub fn records(&self) -> &[FlightRecord] {
        &self.records
    }

    #[must_use]
    pub const fn view(&self) -> &FlightView {
        &self.view
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn take_alert(&mut self) -> Option<String> {
        self.alert.take()
    }

    #[must_use]
    pub fn airline_options(&self) -> Vec<String> {
        airline_options(&self.records)
    }

    pub fn set_origin(&mut self, origin: &str) {
        self.criteria.set_origin(origin);
    }

    pub fn set_destination(&mut self, destination: &str) {
        self.criteria.set_destination(destination);
    }

    pub fn set_departure_date(&mut self, date: NaiveDate) {
        self.criteria.departure_date = date;
    }

    pub fn set_max_price(&mut self, max_price: f64) {
        self.filters.max_price = max_price;
        self.refresh();
    }

    pub fn set_max_stops(&mut self, max_stops: u32) {
        self.filters.max_stops = max_stops;
        self.refresh();
    }

    pub fn set_airline(&mut self, airline: AirlineFilter) {
        self.filters.airline = airline;
        self.refresh();
    }

    pub fn set_filters(&mut self, filters: FilterCriteria) {
        self.filters = filters;
        self.refresh();
    }

    /// Runs the current criteria against the service.
    ///
    /// On success the base records are replaced and the view re-derived. On
    /// failure the error is logged, the generic alert is raised, and the
    /// previous records stay in place. Returns the number of offers mapped.
    pub async fn search(&mut self) -> Result<usize, SearchError> {
        self.loading = true;
        self.alert = None;

        let result = self.service.search(&self.criteria).await;

        self.loading = false;

        match result {
            Ok(offers) => {
                self.records = map_offers(&offers);
                self.refresh();
                info!(
                    total = self.records.len(),
                    shown = self.view.flights.len(),
                    "Search complete"
                );
                Ok(self.records.len())
            }
            Err(e) => {
                error!(error = %e, auth = e.is_auth(), "Flight search failed");
                self.alert = Some(SEARCH_FAILED_ALERT.to_string());
                Err(e)
            }
        }
    }

    fn refresh(&mut self) {
        self.view = FlightView::derive(&self.records, &self.filters);
    }
}
