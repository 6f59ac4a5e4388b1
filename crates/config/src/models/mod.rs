pub mod api_observability;
pub mod app_config;
pub mod emergency;
pub mod providers;

pub use api_observability::*;
pub use app_config::*;
pub use emergency::*;
pub use providers::*;
