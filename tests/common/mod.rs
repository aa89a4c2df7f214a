use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::Request;
use chrono::Utc;
use http_body_util::BodyExt;
use serde_json::Value;
use tokio::sync::Mutex;
use uuid::Uuid;

use landing_gateway::app::{app, AppState};
use landing_gateway::config::AppConfig;
use landing_gateway::database::models::domain::{DomainStatus, TenantDomain};
use landing_gateway::database::models::landing::Landing;
use landing_gateway::database::store::{DomainStore, StoreError};

/// In-memory store standing in for PostgreSQL in router tests. Counts
/// routing lookups so cache behavior can be asserted, and can be switched
/// into a failing mode to exercise store-outage degradation.
#[derive(Default)]
pub struct MemoryDomainStore {
    domains: Mutex<HashMap<String, TenantDomain>>,
    landings: Mutex<HashMap<String, Landing>>,
    domain_lookups: AtomicUsize,
    fail_lookups: AtomicBool,
}

impl MemoryDomainStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_domain(&self, hostname: &str, slug: &str, status: DomainStatus) {
        let now = Utc::now();
        self.domains.lock().await.insert(
            hostname.to_string(),
            TenantDomain {
                id: Uuid::new_v4(),
                hostname: hostname.to_string(),
                slug: slug.to_string(),
                status,
                created_at: now,
                updated_at: now,
            },
        );
    }

    pub async fn add_landing(&self, slug: &str, display_name: &str, published: bool) {
        self.landings.lock().await.insert(
            slug.to_string(),
            Landing {
                id: Uuid::new_v4(),
                slug: slug.to_string(),
                display_name: display_name.to_string(),
                published,
                created_at: Utc::now(),
            },
        );
    }

    pub fn lookups(&self) -> usize {
        self.domain_lookups.load(Ordering::SeqCst)
    }

    pub fn set_failing(&self, failing: bool) {
        self.fail_lookups.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl DomainStore for MemoryDomainStore {
    async fn find_active_domain(
        &self,
        hostname: &str,
    ) -> Result<Option<TenantDomain>, StoreError> {
        self.domain_lookups.fetch_add(1, Ordering::SeqCst);
        if self.fail_lookups.load(Ordering::SeqCst) {
            return Err(StoreError::Connection("store offline".to_string()));
        }
        Ok(self
            .domains
            .lock()
            .await
            .get(hostname)
            .filter(|d| d.status == DomainStatus::Active)
            .cloned())
    }

    async fn find_landing(&self, slug: &str) -> Result<Option<Landing>, StoreError> {
        Ok(self.landings.lock().await.get(slug).cloned())
    }

    async fn insert_domain(
        &self,
        hostname: &str,
        slug: &str,
    ) -> Result<TenantDomain, StoreError> {
        let mut domains = self.domains.lock().await;
        if domains.contains_key(hostname) {
            return Err(StoreError::DuplicateHostname(hostname.to_string()));
        }
        let now = Utc::now();
        let domain = TenantDomain {
            id: Uuid::new_v4(),
            hostname: hostname.to_string(),
            slug: slug.to_string(),
            status: DomainStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        domains.insert(hostname.to_string(), domain.clone());
        Ok(domain)
    }

    async fn set_domain_status(
        &self,
        hostname: &str,
        status: DomainStatus,
    ) -> Result<Option<TenantDomain>, StoreError> {
        let mut domains = self.domains.lock().await;
        Ok(domains.get_mut(hostname).map(|domain| {
            domain.status = status;
            domain.updated_at = Utc::now();
            domain.clone()
        }))
    }

    async fn list_domains(&self) -> Result<Vec<TenantDomain>, StoreError> {
        Ok(self.domains.lock().await.values().cloned().collect())
    }

    async fn health(&self) -> Result<(), StoreError> {
        if self.fail_lookups.load(Ordering::SeqCst) {
            return Err(StoreError::Connection("store offline".to_string()));
        }
        Ok(())
    }
}

/// Router wired to the given store with development config defaults.
pub fn test_app(store: Arc<MemoryDomainStore>) -> axum::Router {
    test_app_with(AppConfig::development(), store)
}

/// Router wired to the given store with a customized config.
pub fn test_app_with(config: AppConfig, store: Arc<MemoryDomainStore>) -> axum::Router {
    let config: &'static AppConfig = Box::leak(Box::new(config));
    app(AppState::new(config, store))
}

pub fn get_request(host: &str, path: &str) -> Request<Body> {
    Request::builder()
        .uri(path)
        .header("host", host)
        .body(Body::empty())
        .unwrap()
}

pub async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
