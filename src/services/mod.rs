//! Business logic services

pub mod auth;
pub mod catalog;
pub mod lending;
pub mod patrons;
pub mod reports;

use crate::{config::AuthConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub catalog: catalog::CatalogService,
    pub patrons: patrons::PatronService,
    pub lending: lending::LendingService,
    pub reports: reports::ReportsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, auth_config: AuthConfig) -> Self {
        Self {
            auth: auth::AuthService::new(repository.clone(), auth_config),
            catalog: catalog::CatalogService::new(repository.clone()),
            patrons: patrons::PatronService::new(repository.clone()),
            lending: lending::LendingService::new(repository.clone()),
            reports: reports::ReportsService::new(repository),
        }
    }
}
