//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API and form inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{ChangeLogQuery, LoginRequest, UpdateContactRequest};

pub use responses::{
    ChangeLogResponse, ContactUpdateResponse, HealthChecks, HealthResponse,
    ReadinessResponse, RedeployResponse, SiteResponse,
};
