#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;

use clinic_admin::domain::connectivity::ReconnectPolicy;
use clinic_admin::domain::ports::{Method, RemoteError, Transport};
use clinic_admin::domain::seed::SeedData;
use clinic_admin::domain::store::FallbackStore;
use clinic_admin::model::{Examination, PatientSnapshot, Role, User};
use clinic_admin::ClinicAdmin;

/// Transport whose every call fails like a refused connection.
#[derive(Default)]
pub struct UnreachableTransport {
    calls: AtomicUsize,
}

impl UnreachableTransport {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for UnreachableTransport {
    async fn request(
        &self,
        _method: Method,
        _segments: &[&str],
        _body: Option<Value>,
    ) -> Result<Value, RemoteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(RemoteError::Network("connection refused".to_string()))
    }
}

/// Layer over an unreachable service and a zero-latency store.
pub fn offline_admin(seed: SeedData) -> (ClinicAdmin, Arc<UnreachableTransport>) {
    let transport = Arc::new(UnreachableTransport::default());
    let store = Arc::new(FallbackStore::with_seed(seed, Duration::ZERO));
    let admin = ClinicAdmin::with_parts(transport.clone(), store, ReconnectPolicy::Never);
    (admin, transport)
}

pub fn user(id: &str, name: &str, role: Role) -> User {
    User {
        id: id.to_string(),
        name: name.to_string(),
        email: format!("{}@clinic.example", name.to_lowercase().replace(' ', ".")),
        role,
        telephone: None,
        address: None,
        created_at: Utc::now(),
    }
}

pub fn examination(id: &str, tanggal: NaiveDate, patient: Option<&User>) -> Examination {
    let created_at: DateTime<Utc> = Utc::now();
    Examination {
        id: id.to_string(),
        tanggal,
        skor: 12.5,
        usia: 40,
        jenis_kelamin: "L".to_string(),
        alamat: "Jl. Merdeka 1".to_string(),
        lama_sakit: "3 hari".to_string(),
        created_at,
        updated_at: created_at,
        pasien: patient.map(|p| PatientSnapshot {
            id: p.id.parse().unwrap(),
            name: p.name.clone(),
            email: Some(p.email.clone()),
        }),
    }
}
