pub mod destination;

pub use destination::{CreateDestination, Destination, DestinationFilter, UpdateDestination};
