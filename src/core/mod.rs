//! Application surfaces over the analysis services

pub mod http;

pub use http::*;
