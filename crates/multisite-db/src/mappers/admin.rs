//! Admin model -> entity mapper

use multisite_core::entities::AdminUser;

use crate::models::AdminUserModel;

impl From<AdminUserModel> for AdminUser {
    fn from(model: AdminUserModel) -> Self {
        model.into_parts().0
    }
}

impl AdminUserModel {
    /// Split the row into the entity and its password hash
    pub fn into_parts(self) -> (AdminUser, String) {
        let AdminUserModel {
            id,
            email,
            password_hash,
            created_at,
        } = self;
        (
            AdminUser {
                id,
                email,
                created_at,
            },
            password_hash,
        )
    }
}
