use async_trait::async_trait;
use std::sync::Arc;

use crate::contract::{
    client::{DashboardApi, ExaminationsApi, StaffApi, UsersApi},
    error::ClinicError,
    model::{
        DashboardStats, Examination, ExaminationPatch, ExaminationQuery, NewExamination, NewUser,
        StaffPatientAssignment, TrendPoint, User, UserPatch, UserQuery, WeeklyPoint,
    },
};
use crate::domain::service::{DashboardService, ExaminationsService, StaffService, UsersService};

/// Local implementation of the contract traits that delegates to the domain services
#[derive(Clone)]
pub struct ClinicLocalClient {
    users: Arc<UsersService>,
    examinations: Arc<ExaminationsService>,
    staff: Arc<StaffService>,
    dashboard: Arc<DashboardService>,
}

impl ClinicLocalClient {
    pub fn new(
        users: Arc<UsersService>,
        examinations: Arc<ExaminationsService>,
        staff: Arc<StaffService>,
        dashboard: Arc<DashboardService>,
    ) -> Self {
        Self {
            users,
            examinations,
            staff,
            dashboard,
        }
    }
}

#[async_trait]
impl UsersApi for ClinicLocalClient {
    async fn list_users(&self, query: UserQuery) -> Result<Vec<User>, ClinicError> {
        self.users.list_users(&query).await.map_err(Into::into)
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User, ClinicError> {
        self.users.create_user(new_user).await.map_err(Into::into)
    }

    async fn update_user(&self, id: &str, patch: UserPatch) -> Result<User, ClinicError> {
        self.users.update_user(id, patch).await.map_err(Into::into)
    }

    async fn delete_user(&self, id: &str) -> Result<(), ClinicError> {
        self.users.delete_user(id).await.map_err(Into::into)
    }
}

#[async_trait]
impl ExaminationsApi for ClinicLocalClient {
    async fn list_examinations(
        &self,
        query: ExaminationQuery,
    ) -> Result<Vec<Examination>, ClinicError> {
        self.examinations
            .list_examinations(&query)
            .await
            .map_err(Into::into)
    }

    async fn create_examination(
        &self,
        new_examination: NewExamination,
    ) -> Result<Examination, ClinicError> {
        self.examinations
            .create_examination(new_examination)
            .await
            .map_err(Into::into)
    }

    async fn update_examination(
        &self,
        id: &str,
        patch: ExaminationPatch,
    ) -> Result<Examination, ClinicError> {
        self.examinations
            .update_examination(id, patch)
            .await
            .map_err(Into::into)
    }

    async fn delete_examination(&self, id: &str) -> Result<(), ClinicError> {
        self.examinations
            .delete_examination(id)
            .await
            .map_err(Into::into)
    }
}

#[async_trait]
impl StaffApi for ClinicLocalClient {
    async fn list_assignments(&self) -> Result<Vec<StaffPatientAssignment>, ClinicError> {
        self.staff.list_assignments().await.map_err(Into::into)
    }

    async fn staff_patients(
        &self,
        staff_id: &str,
    ) -> Result<Vec<StaffPatientAssignment>, ClinicError> {
        self.staff.staff_patients(staff_id).await.map_err(Into::into)
    }

    async fn staff_examinations(&self, staff_id: &str) -> Result<Vec<Examination>, ClinicError> {
        self.staff
            .staff_examinations(staff_id)
            .await
            .map_err(Into::into)
    }

    async fn assign_patient(
        &self,
        staff_id: &str,
        patient_id: &str,
    ) -> Result<StaffPatientAssignment, ClinicError> {
        self.staff
            .assign_patient(staff_id, patient_id)
            .await
            .map_err(Into::into)
    }

    async fn unassign_patient(&self, staff_id: &str, patient_id: &str) -> Result<(), ClinicError> {
        self.staff
            .unassign_patient(staff_id, patient_id)
            .await
            .map_err(Into::into)
    }
}

#[async_trait]
impl DashboardApi for ClinicLocalClient {
    async fn stats(&self) -> Result<DashboardStats, ClinicError> {
        self.dashboard.stats().await.map_err(Into::into)
    }

    async fn stats_from_lists(&self) -> Result<DashboardStats, ClinicError> {
        self.dashboard.stats_from_lists().await.map_err(Into::into)
    }

    async fn examination_trends(&self) -> Result<Vec<TrendPoint>, ClinicError> {
        self.dashboard.examination_trends().await.map_err(Into::into)
    }

    async fn monthly_stats(&self) -> Result<Vec<WeeklyPoint>, ClinicError> {
        self.dashboard.monthly_stats().await.map_err(Into::into)
    }
}
