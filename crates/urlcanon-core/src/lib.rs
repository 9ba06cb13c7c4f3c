pub mod config;
pub mod logging;

pub mod batch;
pub mod url_model;

pub use url_model::{canonicalize, canonicalize_url, parse, serialize, ParseError, ParsedUrl};
