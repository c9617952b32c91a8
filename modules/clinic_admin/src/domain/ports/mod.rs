pub mod transport;

pub use transport::{Method, RemoteError, Transport};
