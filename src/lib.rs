pub mod client;
pub mod config;
pub mod dataset;
pub mod env;
pub mod error;
pub mod exact;
mod http;
pub mod import;
pub mod output;
pub mod query;

pub use client::SashimiClient;
pub use error::{Error, Result};
pub use exact::ExactClient;
