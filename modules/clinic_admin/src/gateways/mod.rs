pub mod local;

pub use local::ClinicLocalClient;
