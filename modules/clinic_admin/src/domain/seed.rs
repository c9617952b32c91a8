use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::contract::model::{Examination, PatientSnapshot, Role, StaffPatientAssignment, User};

/// Initial contents of a fallback store.
#[derive(Debug, Clone, Default)]
pub struct SeedData {
    pub users: Vec<User>,
    pub examinations: Vec<Examination>,
    pub assignments: Vec<StaffPatientAssignment>,
}

fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0)
        .single()
        .unwrap_or_default()
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn user(
    id: &str,
    name: &str,
    email: &str,
    role: Role,
    telephone: &str,
    address: &str,
    created_at: DateTime<Utc>,
) -> User {
    User {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        role,
        telephone: Some(telephone.to_string()),
        address: Some(address.to_string()),
        created_at,
    }
}

impl SeedData {
    /// Demo records: one admin, two staff, two patients, three examinations
    /// and two assignments.
    pub fn demo() -> Self {
        #[rustfmt::skip]
        let users = vec![
            user("1", "Dr. John Smith", "john@clinic.example", Role::Admin, "+1-555-0101", "123 Medical Ave", at(2024, 1, 15, 8)),
            user("2", "Nurse Sarah Wilson", "sarah@clinic.example", Role::Staff, "+1-555-0102", "456 Care St", at(2024, 1, 16, 9)),
            user("3", "Alice Johnson", "alice@patient.example", Role::Patient, "+1-555-0103", "789 Patient Rd", at(2024, 1, 17, 10)),
            user("4", "Bob Brown", "bob@patient.example", Role::Patient, "+1-555-0104", "321 Health Blvd", at(2024, 1, 18, 11)),
            user("5", "Dr. Emily Davis", "emily@clinic.example", Role::Staff, "+1-555-0105", "654 Medical Center", at(2024, 1, 19, 12)),
        ];

        let alice = PatientSnapshot {
            id: 3,
            name: "Alice Johnson".to_string(),
            email: Some("alice@patient.example".to_string()),
        };
        let bob = PatientSnapshot {
            id: 4,
            name: "Bob Brown".to_string(),
            email: Some("bob@patient.example".to_string()),
        };

        let examinations = vec![
            Examination {
                id: "1".to_string(),
                tanggal: day(2024, 1, 20),
                skor: 85.0,
                usia: 35,
                jenis_kelamin: "Perempuan".to_string(),
                alamat: "789 Patient Rd".to_string(),
                lama_sakit: "Regular checkup - all vitals normal".to_string(),
                created_at: at(2024, 1, 20, 14),
                updated_at: at(2024, 1, 20, 14),
                pasien: Some(alice.clone()),
            },
            Examination {
                id: "2".to_string(),
                tanggal: day(2024, 1, 21),
                skor: 78.0,
                usia: 42,
                jenis_kelamin: "Laki-laki".to_string(),
                alamat: "321 Health Blvd".to_string(),
                lama_sakit: "Follow-up examination for blood pressure".to_string(),
                created_at: at(2024, 1, 21, 15),
                updated_at: at(2024, 1, 21, 15),
                pasien: Some(bob),
            },
            Examination {
                id: "3".to_string(),
                tanggal: day(2024, 1, 22),
                skor: 92.0,
                usia: 35,
                jenis_kelamin: "Perempuan".to_string(),
                alamat: "789 Patient Rd".to_string(),
                lama_sakit: "Scheduled for routine examination".to_string(),
                created_at: at(2024, 1, 22, 16),
                updated_at: at(2024, 1, 22, 16),
                pasien: Some(alice),
            },
        ];

        let assignments = vec![
            StaffPatientAssignment {
                id: "1".to_string(),
                staff_id: "2".to_string(),
                patient_id: "3".to_string(),
                staff_name: Some("Nurse Sarah Wilson".to_string()),
                patient_name: Some("Alice Johnson".to_string()),
                assigned_at: at(2024, 1, 15, 8),
            },
            StaffPatientAssignment {
                id: "2".to_string(),
                staff_id: "5".to_string(),
                patient_id: "4".to_string(),
                staff_name: Some("Dr. Emily Davis".to_string()),
                patient_name: Some("Bob Brown".to_string()),
                assigned_at: at(2024, 1, 16, 9),
            },
        ];

        Self {
            users,
            examinations,
            assignments,
        }
    }
}
