pub mod fixed_departure;

pub use fixed_departure::{
    CreateFixedDeparture, DepartureStatus, FixedDeparture, FixedDepartureFilter,
    FixedDepartureWithPackage, UpdateFixedDeparture,
};
