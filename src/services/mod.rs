pub mod filter;
pub use filter::{AirlineFilter, FilterCriteria, FlightView, TrendPoint};

pub mod flight_service;
pub use flight_service::{AuthError, FlightSearchService, SearchError};

pub mod mapper;
pub use mapper::map_offers;
