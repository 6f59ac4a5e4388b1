pub mod emergency;
pub mod health;
