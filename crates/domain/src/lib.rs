pub mod entities;
pub mod outcome;
pub mod ports;
pub mod store;
pub mod value_objects;

pub use entities::*;
pub use outcome::*;
pub use ports::*;
pub use rideguard_errors::{RelayError, RelayResult};
pub use store::IncidentStore;
pub use value_objects::*;
