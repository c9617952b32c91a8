//! Per-entity façades: try the remote service, fall back to the owned store.
//!
//! Reads never fail. Mutations fail only with `NotFound` on the fallback path
//! or `Validation` before anything is sent.

mod dashboard;
mod examinations;
mod staff;
mod users;

pub use dashboard::DashboardService;
pub use examinations::ExaminationsService;
pub use staff::StaffService;
pub use users::UsersService;

use uuid::Uuid;

/// Identifier for a record synthesized on the fallback path.
fn new_record_id() -> String {
    Uuid::new_v4().simple().to_string()
}
