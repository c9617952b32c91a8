//! Wire shapes of the remote clinic service.
//!
//! Field names and role vocabulary follow the service, not the canonical model.
//! Unknown fields are ignored on the way in.

use serde::{Deserialize, Serialize};

/// Identifier sent either as a JSON number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum WireId {
    Num(i64),
    Str(String),
}

impl WireId {
    pub fn into_string(self) -> String {
        match self {
            WireId::Num(n) => n.to_string(),
            WireId::Str(s) => s,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireUser {
    pub id: WireId,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    pub role: String,
    #[serde(default)]
    pub telephone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Outgoing body for user create.
#[derive(Debug, Clone, Serialize)]
pub struct WireUserBody<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub role: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telephone: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<&'a str>,
}

/// Outgoing body for user update; absent fields are left untouched by the service.
#[derive(Debug, Clone, Default, Serialize)]
pub struct WireUserPatchBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telephone: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WirePatient {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireExamination {
    pub id: WireId,
    pub tanggal: String,
    pub skor: f64,
    pub usia: u32,
    #[serde(rename = "jenis_kelamin")]
    pub jenis_kelamin: String,
    pub alamat: String,
    #[serde(rename = "lama_sakit")]
    pub lama_sakit: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub pasien: Option<WirePatient>,
}

/// Outgoing body for examination create and update.
#[derive(Debug, Clone, Default, Serialize)]
pub struct WireExaminationBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tanggal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skor: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usia: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jenis_kelamin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alamat: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lama_sakit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pasien: Option<WirePatient>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireAssignment {
    pub id: WireId,
    #[serde(default)]
    pub staff_id: Option<WireId>,
    #[serde(default)]
    pub patient_id: Option<WireId>,
    #[serde(default)]
    pub staff_name: Option<String>,
    #[serde(default)]
    pub patient_name: Option<String>,
    pub assigned_at: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WireAssignmentBody<'a> {
    pub staff_id: &'a str,
    pub patient_id: &'a str,
}

/// Patient record as listed under `/staff/{id}/pasien`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireStaffPatient {
    pub id: WireId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireStats {
    pub total_users: u64,
    pub total_examinations: u64,
    pub active_staff: u64,
    pub today_examinations: u64,
    pub admin_count: u64,
    pub staff_count: u64,
    pub patient_count: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireTrendPoint {
    pub name: String,
    pub examinations: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireWeeklyPoint {
    pub name: String,
    pub examinations: u64,
    #[serde(default)]
    pub users: u64,
}
