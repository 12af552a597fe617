//! Process duplication and descriptor inheritance across `fork(2)`.

pub mod demo;
pub mod error;
pub mod handle;
pub mod process;
pub mod role;
pub mod utils;

pub use error::DemoError;
pub use role::Role;
