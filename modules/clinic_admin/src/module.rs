use std::sync::Arc;

use tracing::{debug, info};

use crate::config::ClinicAdminConfig;
use crate::contract::client::{DashboardApi, ExaminationsApi, StaffApi, UsersApi};
use crate::domain::connectivity::ReconnectPolicy;
use crate::domain::ports::Transport;
use crate::domain::service::{DashboardService, ExaminationsService, StaffService, UsersService};
use crate::domain::store::FallbackStore;
use crate::gateways::local::ClinicLocalClient;
use crate::infra::remote::HttpTransport;

/// Data-access layer for the clinic admin dashboard.
///
/// Owns one fallback store shared by all façades. Each façade keeps its own
/// connectivity state, so a failing `users` endpoint does not push the
/// examinations façade onto the fallback store.
#[derive(Clone)]
pub struct ClinicAdmin {
    store: Arc<FallbackStore>,
    users: Arc<UsersService>,
    examinations: Arc<ExaminationsService>,
    staff: Arc<StaffService>,
    dashboard: Arc<DashboardService>,
    client: Arc<ClinicLocalClient>,
}

impl ClinicAdmin {
    /// Build the layer from configuration with an HTTP transport.
    pub fn from_config(cfg: &ClinicAdminConfig) -> anyhow::Result<Self> {
        info!("Initializing clinic_admin module");
        debug!(
            "Loaded clinic_admin config: base_url={}, fallback_delay_ms={}, reconnect_after_secs={:?}",
            cfg.base_url, cfg.fallback_delay_ms, cfg.reconnect_after_secs
        );

        let transport = HttpTransport::from_base_url(&cfg.base_url)?;
        let store = if cfg.seed_fallback {
            FallbackStore::seeded(cfg.fallback_delay())
        } else {
            FallbackStore::empty(cfg.fallback_delay())
        };

        Ok(Self::with_parts(
            Arc::new(transport),
            Arc::new(store),
            cfg.reconnect_policy(),
        ))
    }

    /// Wire the façades over an arbitrary transport and store.
    pub fn with_parts(
        transport: Arc<dyn Transport>,
        store: Arc<FallbackStore>,
        policy: ReconnectPolicy,
    ) -> Self {
        let users = Arc::new(UsersService::new(
            transport.clone(),
            store.clone(),
            policy,
        ));
        let examinations = Arc::new(ExaminationsService::new(
            transport.clone(),
            store.clone(),
            policy,
        ));
        let staff = Arc::new(StaffService::new(transport.clone(), store.clone(), policy));
        let dashboard = Arc::new(DashboardService::new(
            transport,
            store.clone(),
            policy,
            users.clone(),
            examinations.clone(),
        ));

        let client = Arc::new(ClinicLocalClient::new(
            users.clone(),
            examinations.clone(),
            staff.clone(),
            dashboard.clone(),
        ));

        Self {
            store,
            users,
            examinations,
            staff,
            dashboard,
            client,
        }
    }

    pub fn users_api(&self) -> Arc<dyn UsersApi> {
        self.client.clone()
    }

    pub fn examinations_api(&self) -> Arc<dyn ExaminationsApi> {
        self.client.clone()
    }

    pub fn staff_api(&self) -> Arc<dyn StaffApi> {
        self.client.clone()
    }

    pub fn dashboard_api(&self) -> Arc<dyn DashboardApi> {
        self.client.clone()
    }

    pub fn store(&self) -> &Arc<FallbackStore> {
        &self.store
    }

    pub fn users(&self) -> &Arc<UsersService> {
        &self.users
    }

    pub fn examinations(&self) -> &Arc<ExaminationsService> {
        &self.examinations
    }

    pub fn staff(&self) -> &Arc<StaffService> {
        &self.staff
    }

    pub fn dashboard(&self) -> &Arc<DashboardService> {
        &self.dashboard
    }

    /// True when any façade is currently serving the fallback store.
    pub fn is_degraded(&self) -> bool {
        self.users.connectivity().is_degraded()
            || self.examinations.connectivity().is_degraded()
            || self.staff.connectivity().is_degraded()
            || self.dashboard.connectivity().is_degraded()
    }
}
