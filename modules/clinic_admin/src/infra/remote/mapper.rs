//! Conversions between wire records and canonical entities.
//!
//! Everything here is pure. Inbound conversions are fallible so that a
//! malformed payload is rejected at this boundary as `RemoteError::Parse`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::contract::model::{
    DashboardStats, Examination, ExaminationPatch, NewExamination, NewUser, PatientSnapshot, Role,
    StaffPatientAssignment, TrendPoint, User, UserPatch, WeeklyPoint,
};
use crate::domain::ports::RemoteError;
use crate::infra::remote::wire::{
    WireAssignment, WireAssignmentBody, WireExamination, WireExaminationBody, WirePatient,
    WireStaffPatient, WireStats, WireTrendPoint, WireUser, WireUserBody, WireUserPatchBody,
    WireWeeklyPoint,
};

const WIRE_PATIENT_ROLE: &str = "pasien";
const PATIENT_ROLE: &str = "patient";

/// Translate a wire role into the canonical vocabulary. Total: anything other
/// than `"pasien"` passes through unchanged.
pub fn normalize_role(wire: &str) -> &str {
    if wire == WIRE_PATIENT_ROLE {
        PATIENT_ROLE
    } else {
        wire
    }
}

/// Inverse of [`normalize_role`] for outgoing bodies.
pub fn denormalize_role(role: &str) -> &str {
    if role == PATIENT_ROLE {
        WIRE_PATIENT_ROLE
    } else {
        role
    }
}

fn parse_role(wire: &str) -> Result<Role, RemoteError> {
    normalize_role(wire)
        .parse()
        .map_err(|e| RemoteError::parse(format!("role: {}", e)))
}

fn parse_timestamp(field: &str, raw: Option<&str>) -> Result<DateTime<Utc>, RemoteError> {
    let raw = raw.ok_or_else(|| RemoteError::parse(format!("{}: missing", field)))?;
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| RemoteError::parse(format!("{}: '{}': {}", field, raw, e)))
}

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp (date part taken).
fn parse_date(field: &str, raw: &str) -> Result<NaiveDate, RemoteError> {
    let head = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(head, "%Y-%m-%d")
        .map_err(|e| RemoteError::parse(format!("{}: '{}': {}", field, raw, e)))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn to_body<T: Serialize>(body: &T) -> Result<Value, RemoteError> {
    serde_json::to_value(body).map_err(|e| RemoteError::parse(e.to_string()))
}

pub fn decode<T: DeserializeOwned>(value: Value) -> Result<T, RemoteError> {
    serde_json::from_value(value).map_err(|e| RemoteError::parse(e.to_string()))
}

fn decode_each<W, T>(
    value: Value,
    convert: impl Fn(W) -> Result<T, RemoteError>,
) -> Result<Vec<T>, RemoteError>
where
    W: DeserializeOwned,
{
    decode::<Vec<W>>(value)?.into_iter().map(convert).collect()
}

// -------- users --------

pub fn user_from_wire(w: WireUser) -> Result<User, RemoteError> {
    Ok(User {
        id: w.id.into_string(),
        name: w.name,
        email: w.email.unwrap_or_default(),
        role: parse_role(&w.role)?,
        telephone: non_empty(w.telephone),
        address: non_empty(w.address),
        created_at: parse_timestamp("createdAt", w.created_at.as_deref())?,
    })
}

pub fn decode_user(value: Value) -> Result<User, RemoteError> {
    user_from_wire(decode(value)?)
}

pub fn decode_users(value: Value) -> Result<Vec<User>, RemoteError> {
    decode_each(value, user_from_wire)
}

pub fn user_body(new_user: &NewUser) -> Result<Value, RemoteError> {
    to_body(&WireUserBody {
        name: &new_user.name,
        email: &new_user.email,
        role: denormalize_role(new_user.role.as_str()),
        telephone: new_user.telephone.as_deref(),
        address: new_user.address.as_deref(),
    })
}

pub fn user_patch_body(patch: &UserPatch) -> Result<Value, RemoteError> {
    to_body(&WireUserPatchBody {
        name: patch.name.as_deref(),
        email: patch.email.as_deref(),
        role: patch.role.map(|r| denormalize_role(r.as_str())),
        telephone: patch.telephone.as_deref(),
        address: patch.address.as_deref(),
    })
}

// -------- examinations --------

fn patient_from_wire(w: WirePatient) -> PatientSnapshot {
    PatientSnapshot {
        id: w.id,
        name: w.name,
        email: w.email,
    }
}

fn patient_to_wire(p: &PatientSnapshot) -> WirePatient {
    WirePatient {
        id: p.id,
        name: p.name.clone(),
        email: p.email.clone(),
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn examination_from_wire(w: WireExamination) -> Result<Examination, RemoteError> {
    let created_at = parse_timestamp("createdAt", w.created_at.as_deref())?;
    let updated_at = match w.updated_at.as_deref() {
        Some(raw) => parse_timestamp("updatedAt", Some(raw))?,
        None => created_at,
    };
    Ok(Examination {
        id: w.id.into_string(),
        tanggal: parse_date("tanggal", &w.tanggal)?,
        skor: w.skor,
        usia: w.usia,
        jenis_kelamin: w.jenis_kelamin,
        alamat: w.alamat,
        lama_sakit: w.lama_sakit,
        created_at,
        updated_at,
        pasien: w.pasien.map(patient_from_wire),
    })
}

pub fn decode_examination(value: Value) -> Result<Examination, RemoteError> {
    examination_from_wire(decode(value)?)
}

pub fn decode_examinations(value: Value) -> Result<Vec<Examination>, RemoteError> {
    decode_each(value, examination_from_wire)
}

pub fn examination_body(exam: &NewExamination) -> Result<Value, RemoteError> {
    to_body(&WireExaminationBody {
        tanggal: Some(format_date(exam.tanggal)),
        skor: Some(exam.skor),
        usia: Some(exam.usia),
        jenis_kelamin: Some(exam.jenis_kelamin.clone()),
        alamat: Some(exam.alamat.clone()),
        lama_sakit: Some(exam.lama_sakit.clone()),
        pasien: exam.pasien.as_ref().map(patient_to_wire),
    })
}

pub fn examination_patch_body(patch: &ExaminationPatch) -> Result<Value, RemoteError> {
    to_body(&WireExaminationBody {
        tanggal: patch.tanggal.map(format_date),
        skor: patch.skor,
        usia: patch.usia,
        jenis_kelamin: patch.jenis_kelamin.clone(),
        alamat: patch.alamat.clone(),
        lama_sakit: patch.lama_sakit.clone(),
        pasien: patch.pasien.as_ref().map(patient_to_wire),
    })
}

// -------- assignments --------

pub fn assignment_from_wire(w: WireAssignment) -> Result<StaffPatientAssignment, RemoteError> {
    Ok(StaffPatientAssignment {
        id: w.id.into_string(),
        staff_id: w.staff_id.map(|id| id.into_string()).unwrap_or_default(),
        patient_id: w.patient_id.map(|id| id.into_string()).unwrap_or_default(),
        staff_name: non_empty(w.staff_name),
        patient_name: non_empty(w.patient_name),
        assigned_at: parse_timestamp("assignedAt", Some(&w.assigned_at))?,
    })
}

pub fn decode_assignment(value: Value) -> Result<StaffPatientAssignment, RemoteError> {
    assignment_from_wire(decode(value)?)
}

pub fn decode_assignments(value: Value) -> Result<Vec<StaffPatientAssignment>, RemoteError> {
    decode_each(value, assignment_from_wire)
}

/// A patient listed under a staff member becomes an assignment keyed by the patient id.
pub fn staff_patient_to_assignment(
    w: WireStaffPatient,
    staff_id: &str,
    now: DateTime<Utc>,
) -> Result<StaffPatientAssignment, RemoteError> {
    let assigned_at = match w.created_at.as_deref() {
        Some(raw) => parse_timestamp("createdAt", Some(raw))?,
        None => now,
    };
    let patient_id = w.id.into_string();
    Ok(StaffPatientAssignment {
        id: patient_id.clone(),
        staff_id: staff_id.to_string(),
        patient_id,
        staff_name: None,
        patient_name: non_empty(w.name),
        assigned_at,
    })
}

pub fn decode_staff_patients(
    value: Value,
    staff_id: &str,
    now: DateTime<Utc>,
) -> Result<Vec<StaffPatientAssignment>, RemoteError> {
    decode_each(value, |w| staff_patient_to_assignment(w, staff_id, now))
}

pub fn assignment_body(staff_id: &str, patient_id: &str) -> Result<Value, RemoteError> {
    to_body(&WireAssignmentBody {
        staff_id,
        patient_id,
    })
}

// -------- dashboard --------

pub fn decode_stats(value: Value) -> Result<DashboardStats, RemoteError> {
    let w: WireStats = decode(value)?;
    Ok(DashboardStats {
        total_users: w.total_users,
        total_examinations: w.total_examinations,
        active_staff: w.active_staff,
        today_examinations: w.today_examinations,
        admin_count: w.admin_count,
        staff_count: w.staff_count,
        patient_count: w.patient_count,
    })
}

pub fn decode_trends(value: Value) -> Result<Vec<TrendPoint>, RemoteError> {
    decode_each(value, |w: WireTrendPoint| {
        Ok(TrendPoint {
            label: w.name,
            examinations: w.examinations,
        })
    })
}

pub fn decode_weekly(value: Value) -> Result<Vec<WeeklyPoint>, RemoteError> {
    decode_each(value, |w: WireWeeklyPoint| {
        Ok(WeeklyPoint {
            label: w.name,
            examinations: w.examinations,
            users: w.users,
        })
    })
}
