pub mod call_provider;

pub use call_provider::CallProvider;
