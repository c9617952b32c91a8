pub mod remote;
pub mod session;
