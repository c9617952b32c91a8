use std::sync::Arc;

use tracing::{debug, instrument};

use super::{ExaminationsService, UsersService};
use crate::contract::model::{DashboardStats, ExaminationQuery, TrendPoint, UserQuery, WeeklyPoint};
use crate::domain::connectivity::{Connectivity, ReconnectPolicy, RemoteLink};
use crate::domain::error::DomainError;
use crate::domain::ports::{Method, Transport};
use crate::domain::stats::{
    compute_dashboard_stats, daily_examination_trend, local_today, weekly_activity,
    ACTIVITY_WEEKS, TREND_DAYS,
};
use crate::domain::store::FallbackStore;
use crate::infra::remote::mapper;

const DASHBOARD: &str = "dashboard";

/// Dashboard aggregates façade
pub struct DashboardService {
    link: RemoteLink,
    store: Arc<FallbackStore>,
    users: Arc<UsersService>,
    examinations: Arc<ExaminationsService>,
}

impl DashboardService {
    pub fn new(
        transport: Arc<dyn Transport>,
        store: Arc<FallbackStore>,
        policy: ReconnectPolicy,
        users: Arc<UsersService>,
        examinations: Arc<ExaminationsService>,
    ) -> Self {
        Self {
            link: RemoteLink::new(transport, policy, DASHBOARD),
            store,
            users,
            examinations,
        }
    }

    pub fn connectivity(&self) -> &Connectivity {
        self.link.connectivity()
    }

    #[instrument(name = "clinic_admin.service.stats", skip(self))]
    pub async fn stats(&self) -> Result<DashboardStats, DomainError> {
        if let Some(stats) = self
            .link
            .attempt(Method::Get, &[DASHBOARD, "stats"], None, mapper::decode_stats)
            .await
        {
            return Ok(stats);
        }

        self.store.simulate_latency().await;
        let stats = compute_dashboard_stats(
            &self.store.users().snapshot(),
            &self.store.examinations().snapshot(),
            local_today(),
        );
        debug!(?stats, "Computed stats from fallback store");
        Ok(stats)
    }

    /// Counts over whatever the user and examination façades currently return.
    #[instrument(name = "clinic_admin.service.stats_from_lists", skip(self))]
    pub async fn stats_from_lists(&self) -> Result<DashboardStats, DomainError> {
        let (users_q, exams_q) = (UserQuery::default(), ExaminationQuery::default());
        let (users, exams) = tokio::try_join!(
            self.users.list_users(&users_q),
            self.examinations.list_examinations(&exams_q),
        )?;
        Ok(compute_dashboard_stats(&users, &exams, local_today()))
    }

    #[instrument(name = "clinic_admin.service.examination_trends", skip(self))]
    pub async fn examination_trends(&self) -> Result<Vec<TrendPoint>, DomainError> {
        if let Some(series) = self
            .link
            .attempt(
                Method::Get,
                &[DASHBOARD, "examination-trends"],
                None,
                mapper::decode_trends,
            )
            .await
        {
            return Ok(series);
        }

        self.store.simulate_latency().await;
        Ok(daily_examination_trend(
            &self.store.examinations().snapshot(),
            local_today(),
            TREND_DAYS,
        ))
    }

    #[instrument(name = "clinic_admin.service.monthly_stats", skip(self))]
    pub async fn monthly_stats(&self) -> Result<Vec<WeeklyPoint>, DomainError> {
        if let Some(series) = self
            .link
            .attempt(
                Method::Get,
                &[DASHBOARD, "monthly-stats"],
                None,
                mapper::decode_weekly,
            )
            .await
        {
            return Ok(series);
        }

        self.store.simulate_latency().await;
        Ok(weekly_activity(
            &self.store.examinations().snapshot(),
            &self.store.users().snapshot(),
            local_today(),
            ACTIVITY_WEEKS,
        ))
    }
}
