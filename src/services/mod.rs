pub mod domain_service;

pub use domain_service::{DomainError, DomainService};
