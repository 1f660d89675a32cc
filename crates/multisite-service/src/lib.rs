//! # multisite-service
//!
//! Application layer: site lookups, contact number edits with their change log,
//! the redeploy stub, admin login and the DTOs served by the JSON API.

pub mod dto;
pub mod services;

pub use services::{
    AuthService, ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult, SiteService,
};
