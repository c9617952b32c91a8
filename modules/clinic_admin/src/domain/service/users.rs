use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument};

use super::new_record_id;
use crate::contract::model::{NewUser, User, UserPatch, UserQuery};
use crate::domain::connectivity::{Connectivity, ReconnectPolicy, RemoteLink};
use crate::domain::error::DomainError;
use crate::domain::ports::{Method, Transport};
use crate::domain::query::filter_users;
use crate::domain::store::FallbackStore;
use crate::domain::validation::{validate_new_user, validate_user_patch};
use crate::infra::remote::mapper;

const USERS: &str = "users";

/// User accounts façade
pub struct UsersService {
    link: RemoteLink,
    store: Arc<FallbackStore>,
}

fn apply_patch(user: &mut User, patch: UserPatch) {
    if let Some(name) = patch.name {
        user.name = name;
    }
    if let Some(email) = patch.email {
        user.email = email;
    }
    if let Some(role) = patch.role {
        user.role = role;
    }
    if let Some(telephone) = patch.telephone {
        user.telephone = Some(telephone);
    }
    if let Some(address) = patch.address {
        user.address = Some(address);
    }
}

impl UsersService {
    pub fn new(
        transport: Arc<dyn Transport>,
        store: Arc<FallbackStore>,
        policy: ReconnectPolicy,
    ) -> Self {
        Self {
            link: RemoteLink::new(transport, policy, USERS),
            store,
        }
    }

    pub fn connectivity(&self) -> &Connectivity {
        self.link.connectivity()
    }

    #[instrument(name = "clinic_admin.service.list_users", skip(self, query), fields(role = ?query.role))]
    pub async fn list_users(&self, query: &UserQuery) -> Result<Vec<User>, DomainError> {
        debug!("Listing users");

        let users = match self
            .link
            .attempt(Method::Get, &[USERS], None, mapper::decode_users)
            .await
        {
            Some(users) => users,
            None => {
                self.store.simulate_latency().await;
                self.store.users().snapshot()
            }
        };

        let users = filter_users(users, query);
        debug!("Successfully listed {} users", users.len());
        Ok(users)
    }

    #[instrument(
        name = "clinic_admin.service.create_user",
        skip(self, new_user),
        fields(email = %new_user.email, role = %new_user.role)
    )]
    pub async fn create_user(&self, new_user: NewUser) -> Result<User, DomainError> {
        info!("Creating new user");
        validate_new_user(&new_user)?;

        let body = mapper::user_body(&new_user)?;
        if let Some(user) = self
            .link
            .attempt(Method::Post, &[USERS], Some(body), mapper::decode_user)
            .await
        {
            info!("Successfully created user with id={}", user.id);
            return Ok(user);
        }

        self.store.simulate_latency().await;
        let user = User {
            id: new_record_id(),
            name: new_user.name,
            email: new_user.email,
            role: new_user.role,
            telephone: new_user.telephone,
            address: new_user.address,
            created_at: Utc::now(),
        };
        self.store.users().append(user.clone());

        info!("Created user with id={} in fallback store", user.id);
        Ok(user)
    }

    #[instrument(name = "clinic_admin.service.update_user", skip(self, patch), fields(user_id = %id))]
    pub async fn update_user(&self, id: &str, patch: UserPatch) -> Result<User, DomainError> {
        info!("Updating user");
        validate_user_patch(&patch)?;

        let body = mapper::user_patch_body(&patch)?;
        if let Some(user) = self
            .link
            .attempt(Method::Put, &[USERS, id], Some(body), mapper::decode_user)
            .await
        {
            info!("Successfully updated user");
            return Ok(user);
        }

        self.store.simulate_latency().await;
        let user = self
            .store
            .users()
            .update_by_id(id, |u| apply_patch(u, patch))
            .ok_or_else(|| DomainError::user_not_found(id))?;

        info!("Updated user in fallback store");
        Ok(user)
    }

    #[instrument(name = "clinic_admin.service.delete_user", skip(self), fields(user_id = %id))]
    pub async fn delete_user(&self, id: &str) -> Result<(), DomainError> {
        info!("Deleting user");

        if self
            .link
            .attempt(Method::Delete, &[USERS, id], None, |_| Ok(()))
            .await
            .is_some()
        {
            info!("Successfully deleted user");
            return Ok(());
        }

        self.store.simulate_latency().await;
        self.store
            .users()
            .remove_by_id(id)
            .ok_or_else(|| DomainError::user_not_found(id))?;

        info!("Deleted user from fallback store");
        Ok(())
    }
}
