//! Transport implementations for fetching release listings

pub mod http;

pub use http::HttpTransport;
