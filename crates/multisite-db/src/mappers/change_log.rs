//! Change log model -> entity mapper

use multisite_core::entities::SiteChangeLog;

use crate::models::SiteChangeLogModel;

impl From<SiteChangeLogModel> for SiteChangeLog {
    fn from(model: SiteChangeLogModel) -> Self {
        SiteChangeLog {
            id: model.id,
            site_id: model.site_id,
            admin_user_id: model.admin_user_id,
            change_type: model.change_type,
            old_value: model.old_value,
            new_value: model.new_value,
            description: model.description,
            created_at: model.created_at,
        }
    }
}
