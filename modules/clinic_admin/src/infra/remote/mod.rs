pub mod http_transport;
pub mod mapper;
pub mod wire;

pub use http_transport::HttpTransport;
