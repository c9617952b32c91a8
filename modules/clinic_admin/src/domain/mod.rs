pub mod connectivity;
pub mod error;
pub mod ports;
pub mod query;
pub mod seed;
pub mod service;
pub mod stats;
pub mod store;
pub mod validation;
