pub mod mechanic;
pub mod request;
pub mod result;

pub use mechanic::{Mechanic, OpeningHours};
pub use request::{normalize_phone, FieldError, Location, ServiceRequest, StoredRequest, Vehicle};
pub use result::{MatchStats, ScoredMechanic};
