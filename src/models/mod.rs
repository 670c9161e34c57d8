pub mod flight;
pub mod offer;

pub use flight::{FlightRecord, NOT_AVAILABLE, SearchCriteria};
pub use offer::{FlightOffersResponse, RawOffer};
