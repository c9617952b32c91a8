use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument};

use super::new_record_id;
use crate::contract::model::{Examination, Role, StaffPatientAssignment};
use crate::domain::connectivity::{Connectivity, ReconnectPolicy, RemoteLink};
use crate::domain::error::DomainError;
use crate::domain::ports::{Method, Transport};
use crate::domain::store::FallbackStore;
use crate::infra::remote::mapper;

const STAFF: &str = "staff";
const ASSIGNMENTS: &str = "staff-assignments";

/// Staff to patient assignment façade
pub struct StaffService {
    link: RemoteLink,
    store: Arc<FallbackStore>,
}

impl StaffService {
    pub fn new(
        transport: Arc<dyn Transport>,
        store: Arc<FallbackStore>,
        policy: ReconnectPolicy,
    ) -> Self {
        Self {
            link: RemoteLink::new(transport, policy, ASSIGNMENTS),
            store,
        }
    }

    pub fn connectivity(&self) -> &Connectivity {
        self.link.connectivity()
    }

    #[instrument(name = "clinic_admin.service.list_assignments", skip(self))]
    pub async fn list_assignments(&self) -> Result<Vec<StaffPatientAssignment>, DomainError> {
        debug!("Listing assignments");

        if let Some(list) = self
            .link
            .attempt(Method::Get, &[ASSIGNMENTS], None, mapper::decode_assignments)
            .await
        {
            return Ok(list);
        }

        self.store.simulate_latency().await;
        Ok(self.store.assignments().snapshot())
    }

    #[instrument(name = "clinic_admin.service.staff_patients", skip(self), fields(staff_id = %staff_id))]
    pub async fn staff_patients(
        &self,
        staff_id: &str,
    ) -> Result<Vec<StaffPatientAssignment>, DomainError> {
        debug!("Listing patients of staff member");

        let now = Utc::now();
        if let Some(list) = self
            .link
            .attempt(Method::Get, &[STAFF, staff_id, "pasien"], None, |v| {
                mapper::decode_staff_patients(v, staff_id, now)
            })
            .await
        {
            return Ok(list);
        }

        self.store.simulate_latency().await;
        Ok(self.fallback_assignments_of(staff_id))
    }

    #[instrument(
        name = "clinic_admin.service.staff_examinations",
        skip(self),
        fields(staff_id = %staff_id)
    )]
    pub async fn staff_examinations(&self, staff_id: &str) -> Result<Vec<Examination>, DomainError> {
        debug!("Listing examinations of staff member's patients");

        if let Some(list) = self
            .link
            .attempt(
                Method::Get,
                &[STAFF, staff_id, "pemeriksaan"],
                None,
                mapper::decode_examinations,
            )
            .await
        {
            return Ok(list);
        }

        self.store.simulate_latency().await;
        let patient_ids: HashSet<String> = self
            .fallback_assignments_of(staff_id)
            .into_iter()
            .map(|a| a.patient_id)
            .collect();

        let exams = self
            .store
            .examinations()
            .snapshot()
            .into_iter()
            .filter(|e| {
                e.pasien
                    .as_ref()
                    .is_some_and(|p| patient_ids.contains(&p.id.to_string()))
            })
            .collect();
        Ok(exams)
    }

    /// Duplicate `(staff_id, patient_id)` pairs are left for the remote service to reject.
    #[instrument(
        name = "clinic_admin.service.assign_patient",
        skip(self),
        fields(staff_id = %staff_id, patient_id = %patient_id)
    )]
    pub async fn assign_patient(
        &self,
        staff_id: &str,
        patient_id: &str,
    ) -> Result<StaffPatientAssignment, DomainError> {
        info!("Assigning patient to staff member");

        let body = mapper::assignment_body(staff_id, patient_id)?;
        if let Some(assignment) = self
            .link
            .attempt(
                Method::Post,
                &[ASSIGNMENTS],
                Some(body),
                mapper::decode_assignment,
            )
            .await
        {
            info!("Successfully assigned patient, assignment id={}", assignment.id);
            return Ok(assignment);
        }

        self.store.simulate_latency().await;
        let users = self.store.users();
        let staff = users
            .find(|u| u.id == staff_id && u.role == Role::Staff)
            .ok_or_else(|| DomainError::not_found("Staff", staff_id))?;
        let patient = users
            .find(|u| u.id == patient_id && u.role == Role::Patient)
            .ok_or_else(|| DomainError::not_found("Patient", patient_id))?;

        let assignment = StaffPatientAssignment {
            id: new_record_id(),
            staff_id: staff.id,
            patient_id: patient.id,
            staff_name: Some(staff.name),
            patient_name: Some(patient.name),
            assigned_at: Utc::now(),
        };
        self.store.assignments().append(assignment.clone());

        info!("Assigned patient in fallback store, assignment id={}", assignment.id);
        Ok(assignment)
    }

    #[instrument(
        name = "clinic_admin.service.unassign_patient",
        skip(self),
        fields(staff_id = %staff_id, patient_id = %patient_id)
    )]
    pub async fn unassign_patient(&self, staff_id: &str, patient_id: &str) -> Result<(), DomainError> {
        info!("Removing patient from staff member");

        if self
            .link
            .attempt(
                Method::Delete,
                &[ASSIGNMENTS, staff_id, patient_id],
                None,
                |_| Ok(()),
            )
            .await
            .is_some()
        {
            info!("Successfully removed assignment");
            return Ok(());
        }

        self.store.simulate_latency().await;
        self.store
            .assignments()
            .remove_first(|a| a.staff_id == staff_id && a.patient_id == patient_id)
            .ok_or_else(|| DomainError::assignment_not_found(staff_id, patient_id))?;

        info!("Removed assignment from fallback store");
        Ok(())
    }

    fn fallback_assignments_of(&self, staff_id: &str) -> Vec<StaffPatientAssignment> {
        self.store
            .assignments()
            .snapshot()
            .into_iter()
            .filter(|a| a.staff_id == staff_id)
            .collect()
    }
}
