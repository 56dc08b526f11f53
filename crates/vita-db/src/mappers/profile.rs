//! Profile entity <-> model mapper

use vita_core::entities::UserProfile;
use vita_core::Snowflake;

use crate::models::ProfileModel;

impl From<ProfileModel> for UserProfile {
    fn from(model: ProfileModel) -> Self {
        UserProfile {
            id: Snowflake::new(model.id),
            email: model.email,
            display_name: model.display_name,
            avatar_url: model.avatar_url,
            bio: model.bio,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
