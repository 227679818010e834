pub mod events;
pub mod flight;
pub mod reconstruct;
pub mod series;

pub use events::find_event_index;
pub use flight::{FlightProfile, VelocityProfile};
pub use reconstruct::{adjust_altitude, reconcile, reconstruct};
pub use series::TimeSeries;
