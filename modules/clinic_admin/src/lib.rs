// === PUBLIC CONTRACT ===
pub mod contract;

pub use contract::{client, error, model};

// === MODULE DEFINITION ===
pub mod config;
pub mod module;
pub use config::ClinicAdminConfig;
pub use module::ClinicAdmin;

// === INTERNAL MODULES ===
// Exposed for tests and the CLI binary. Prefer the `contract` traits.
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod gateways;
#[doc(hidden)]
pub mod infra;
