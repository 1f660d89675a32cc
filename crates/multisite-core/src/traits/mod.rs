//! Repository traits

mod repositories;

pub use repositories::{
    AdminRepository, ChangeLogRepository, ContactNumberChange, RepoResult, SiteRepository,
};
