//! Site model -> entity mapper

use multisite_core::entities::Site;

use crate::models::SiteModel;

impl From<SiteModel> for Site {
    fn from(model: SiteModel) -> Self {
        Site {
            id: model.id,
            domain: model.domain,
            site_name: model.site_name,
            whatsapp_number: model.whatsapp_number,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
