//! # RideGuard Testing Utils
//!
//! 各 crate 共享的测试工具：事故记录构建器、内存版呼叫服务商，
//! 以及临时事故数据文件。
//!
//! ```toml
//! [dev-dependencies]
//! rideguard-testing-utils = { path = "../testing-utils" }
//! ```

pub mod builders;
pub mod helpers;
pub mod mocks;

pub use builders::*;
pub use helpers::*;
pub use mocks::*;
