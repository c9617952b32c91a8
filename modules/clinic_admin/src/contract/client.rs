use async_trait::async_trait;

use crate::contract::{
    error::ClinicError,
    model::{
        DashboardStats, Examination, ExaminationPatch, ExaminationQuery, NewExamination, NewUser,
        StaffPatientAssignment, TrendPoint, User, UserPatch, UserQuery, WeeklyPoint,
    },
};

/// User accounts (admin, staff, patient)
#[async_trait]
pub trait UsersApi: Send + Sync {
    /// List users, optionally narrowed by role and a name/email search term
    async fn list_users(&self, query: UserQuery) -> Result<Vec<User>, ClinicError>;

    async fn create_user(&self, new_user: NewUser) -> Result<User, ClinicError>;

    /// Overwrite only the fields present in `patch`
    async fn update_user(&self, id: &str, patch: UserPatch) -> Result<User, ClinicError>;

    async fn delete_user(&self, id: &str) -> Result<(), ClinicError>;
}

/// Patient examinations
#[async_trait]
pub trait ExaminationsApi: Send + Sync {
    async fn list_examinations(
        &self,
        query: ExaminationQuery,
    ) -> Result<Vec<Examination>, ClinicError>;

    async fn create_examination(
        &self,
        new_examination: NewExamination,
    ) -> Result<Examination, ClinicError>;

    async fn update_examination(
        &self,
        id: &str,
        patch: ExaminationPatch,
    ) -> Result<Examination, ClinicError>;

    async fn delete_examination(&self, id: &str) -> Result<(), ClinicError>;
}

/// Staff to patient assignments
#[async_trait]
pub trait StaffApi: Send + Sync {
    async fn list_assignments(&self) -> Result<Vec<StaffPatientAssignment>, ClinicError>;

    /// Assignments held by one staff member
    async fn staff_patients(
        &self,
        staff_id: &str,
    ) -> Result<Vec<StaffPatientAssignment>, ClinicError>;

    /// Examinations of the patients assigned to one staff member
    async fn staff_examinations(&self, staff_id: &str) -> Result<Vec<Examination>, ClinicError>;

    async fn assign_patient(
        &self,
        staff_id: &str,
        patient_id: &str,
    ) -> Result<StaffPatientAssignment, ClinicError>;

    /// Remove the assignment keyed by `(staff_id, patient_id)`
    async fn unassign_patient(&self, staff_id: &str, patient_id: &str) -> Result<(), ClinicError>;
}

/// Dashboard aggregates
#[async_trait]
pub trait DashboardApi: Send + Sync {
    async fn stats(&self) -> Result<DashboardStats, ClinicError>;

    /// Stats computed from the current user and examination listings
    async fn stats_from_lists(&self) -> Result<DashboardStats, ClinicError>;

    async fn examination_trends(&self) -> Result<Vec<TrendPoint>, ClinicError>;

    async fn monthly_stats(&self) -> Result<Vec<WeeklyPoint>, ClinicError>;
}
