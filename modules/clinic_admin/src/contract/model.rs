use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};

/// Closed set of account roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    Staff,
    Patient,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Staff => "staff",
            Role::Patient => "patient",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl fmt::Display for UnknownRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown role '{}'", self.0)
    }
}

impl std::error::Error for UnknownRole {}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "staff" => Ok(Role::Staff),
            "patient" => Ok(Role::Patient),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// Canonical user account (no serde, wire shapes live in infra)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub telephone: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Data for creating a new user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub role: Role,
    pub telephone: Option<String>,
    pub address: Option<String>,
}

/// Partial update data for a user
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
    pub telephone: Option<String>,
    pub address: Option<String>,
}

/// Read-only snapshot of the examined patient, taken when the record was fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientSnapshot {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Examination {
    pub id: String,
    pub tanggal: NaiveDate,
    pub skor: f64,
    pub usia: u32,
    pub jenis_kelamin: String,
    pub alamat: String,
    pub lama_sakit: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub pasien: Option<PatientSnapshot>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewExamination {
    pub tanggal: NaiveDate,
    pub skor: f64,
    pub usia: u32,
    pub jenis_kelamin: String,
    pub alamat: String,
    pub lama_sakit: String,
    pub pasien: Option<PatientSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExaminationPatch {
    pub tanggal: Option<NaiveDate>,
    pub skor: Option<f64>,
    pub usia: Option<u32>,
    pub jenis_kelamin: Option<String>,
    pub alamat: Option<String>,
    pub lama_sakit: Option<String>,
    pub pasien: Option<PatientSnapshot>,
}

/// Link between a staff user and a patient user. `(staff_id, patient_id)` is the natural key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffPatientAssignment {
    pub id: String,
    pub staff_id: String,
    pub patient_id: String,
    pub staff_name: Option<String>,
    pub patient_name: Option<String>,
    pub assigned_at: DateTime<Utc>,
}

/// Derived dashboard counters. Recomputed on demand, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardStats {
    pub total_users: u64,
    pub total_examinations: u64,
    pub active_staff: u64,
    pub today_examinations: u64,
    pub admin_count: u64,
    pub staff_count: u64,
    pub patient_count: u64,
}

/// One bucket of the daily examination series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendPoint {
    pub label: String,
    pub examinations: u64,
}

/// One bucket of the weekly activity series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyPoint {
    pub label: String,
    pub examinations: u64,
    pub users: u64,
}

/// Listing filter for users
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserQuery {
    pub role: Option<Role>,
    pub search: Option<String>,
}

impl UserQuery {
    pub fn role(role: Role) -> Self {
        Self {
            role: Some(role),
            search: None,
        }
    }
}

/// Listing filter for examinations
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExaminationQuery {
    pub search: Option<String>,
}

/// One page of an in-memory listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub per_page: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

/// Identity of the signed-in operator, persisted between runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    pub id: String,
    pub email: String,
    pub role: String,
    pub name: String,
}
