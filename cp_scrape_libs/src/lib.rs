pub mod document;
pub mod fetch;
pub mod keys;
pub mod model;

pub use fetch::{Result, ScrapeError};
