use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Row};
use thiserror::Error;
use uuid::Uuid;

use super::models::domain::{DomainStatus, TenantDomain};
use super::models::landing::Landing;

/// Errors from the domain store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("malformed row: {0}")]
    MalformedRow(String),

    #[error("duplicate hostname: {0}")]
    DuplicateHostname(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Read/write seam over the persisted tenant-domain records.
///
/// The routing path only ever calls `find_active_domain`; the management
/// surface owns the rest. Implementations must match hostnames exactly
/// (callers normalize to lowercase first).
#[async_trait]
pub trait DomainStore: Send + Sync {
    /// Exact-hostname lookup, `active` records only.
    async fn find_active_domain(&self, hostname: &str)
        -> Result<Option<TenantDomain>, StoreError>;

    async fn find_landing(&self, slug: &str) -> Result<Option<Landing>, StoreError>;

    /// Insert a new record in `pending` state.
    async fn insert_domain(&self, hostname: &str, slug: &str)
        -> Result<TenantDomain, StoreError>;

    /// Flip the status of an existing record. `None` when no record matches.
    async fn set_domain_status(
        &self,
        hostname: &str,
        status: DomainStatus,
    ) -> Result<Option<TenantDomain>, StoreError>;

    async fn list_domains(&self) -> Result<Vec<TenantDomain>, StoreError>;

    /// Connectivity probe for the health endpoint.
    async fn health(&self) -> Result<(), StoreError>;
}

/// PostgreSQL-backed store over the `tenant_domains` and `landings` tables.
pub struct PgDomainStore {
    pool: PgPool,
}

impl PgDomainStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Map a `tenant_domains` row, rejecting unknown status text rather
    /// than propagating it into routing decisions.
    fn domain_from_row(row: &PgRow) -> Result<TenantDomain, StoreError> {
        let status_text: String = row.try_get("status")?;
        let status = DomainStatus::parse(&status_text).ok_or_else(|| {
            StoreError::MalformedRow(format!("unknown domain status '{}'", status_text))
        })?;

        Ok(TenantDomain {
            id: row.try_get("id")?,
            hostname: row.try_get("hostname")?,
            slug: row.try_get("slug")?,
            status,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

#[async_trait]
impl DomainStore for PgDomainStore {
    async fn find_active_domain(
        &self,
        hostname: &str,
    ) -> Result<Option<TenantDomain>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, hostname, slug, status, created_at, updated_at
            FROM tenant_domains
            WHERE hostname = $1 AND status = 'active'
            "#,
        )
        .bind(hostname)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::domain_from_row).transpose()
    }

    async fn find_landing(&self, slug: &str) -> Result<Option<Landing>, StoreError> {
        let row = sqlx::query(
            "SELECT id, slug, display_name, published, created_at FROM landings WHERE slug = $1",
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| {
            Ok(Landing {
                id: r.try_get("id")?,
                slug: r.try_get("slug")?,
                display_name: r.try_get("display_name")?,
                published: r.try_get("published")?,
                created_at: r.try_get("created_at")?,
            })
        })
        .transpose()
    }

    async fn insert_domain(
        &self,
        hostname: &str,
        slug: &str,
    ) -> Result<TenantDomain, StoreError> {
        let row = sqlx::query(
            r#"
            INSERT INTO tenant_domains (id, hostname, slug, status, created_at, updated_at)
            VALUES ($1, $2, $3, 'pending', now(), now())
            RETURNING id, hostname, slug, status, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(hostname)
        .bind(slug)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                StoreError::DuplicateHostname(hostname.to_string())
            }
            _ => StoreError::from(e),
        })?;

        Self::domain_from_row(&row)
    }

    async fn set_domain_status(
        &self,
        hostname: &str,
        status: DomainStatus,
    ) -> Result<Option<TenantDomain>, StoreError> {
        let row = sqlx::query(
            r#"
            UPDATE tenant_domains
            SET status = $2, updated_at = now()
            WHERE hostname = $1
            RETURNING id, hostname, slug, status, created_at, updated_at
            "#,
        )
        .bind(hostname)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::domain_from_row).transpose()
    }

    async fn list_domains(&self) -> Result<Vec<TenantDomain>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, hostname, slug, status, created_at, updated_at
            FROM tenant_domains
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::domain_from_row).collect()
    }

    async fn health(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
