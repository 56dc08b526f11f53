//! Authentication and profile service

use chrono::Utc;
use tracing::{info, instrument};
use validator::Validate;
use vita_common::{validate_password_strength, AppError};
use vita_core::{DomainError, Snowflake, UserProfile};

use crate::dto::{
    AuthResponse, ChangePasswordRequest, LoginRequest, RefreshTokenRequest, RegisterRequest,
    UpdateProfileRequest,
};

use super::context::GatewayContext;
use super::error::{GatewayError, GatewayResult};
use super::resolve::store_file;

pub struct AuthService<'a> {
    ctx: &'a GatewayContext,
}

impl<'a> AuthService<'a> {
    pub fn new(ctx: &'a GatewayContext) -> Self {
        Self { ctx }
    }

    /// Register a new account and issue a token pair.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: RegisterRequest) -> GatewayResult<AuthResponse> {
        request
            .validate()
            .map_err(|e| GatewayError::validation(e.to_string()))?;
        validate_password_strength(&request.password)?;

        let email = request.email.trim().to_lowercase();
        if self.ctx.profile_store().email_exists(&email).await? {
            return Err(GatewayError::Domain(DomainError::EmailAlreadyExists(email)));
        }

        let password_hash = self.ctx.password_service().hash(&request.password)?;

        let profile = UserProfile::new(
            self.ctx.generate_id(),
            email,
            request.display_name.trim(),
        );
        self.ctx
            .profile_store()
            .create_profile(&profile, &password_hash)
            .await?;

        let tokens = self.ctx.jwt_service().generate_token_pair(profile.id)?;

        info!(user_id = %profile.id, "user registered");
        Ok(AuthResponse {
            user: profile,
            tokens,
        })
    }

    /// Verify credentials and issue a token pair.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> GatewayResult<AuthResponse> {
        request
            .validate()
            .map_err(|e| GatewayError::validation(e.to_string()))?;

        let email = request.email.trim().to_lowercase();
        let profile = match self.ctx.profile_store().profile_by_email(&email).await {
            Ok(profile) => profile,
            // Do not reveal whether the account exists.
            Err(e) if e.is_not_found() => return Err(GatewayError::App(AppError::InvalidCredentials)),
            Err(e) => return Err(GatewayError::Domain(e)),
        };

        let hash = self.ctx.profile_store().password_hash(profile.id).await?;
        self.ctx
            .password_service()
            .verify_or_error(&request.password, &hash)?;

        let tokens = self.ctx.jwt_service().generate_token_pair(profile.id)?;

        info!(user_id = %profile.id, "user logged in");
        Ok(AuthResponse {
            user: profile,
            tokens,
        })
    }

    /// Exchange a refresh token for a new token pair.
    #[instrument(skip(self, request))]
    pub async fn refresh(&self, request: RefreshTokenRequest) -> GatewayResult<AuthResponse> {
        let tokens = self.ctx.jwt_service().refresh_tokens(&request.refresh_token)?;
        let claims = self.ctx.jwt_service().decode_token(&tokens.access_token)?;
        let user = self.ctx.profile_store().profile(claims.user_id()?).await?;

        Ok(AuthResponse { user, tokens })
    }

    /// Fetch the caller's own profile.
    #[instrument(skip(self))]
    pub async fn me(&self, user_id: Snowflake) -> GatewayResult<UserProfile> {
        Ok(self.ctx.profile_store().profile(user_id).await?)
    }

    /// Fetch any user's public profile.
    #[instrument(skip(self))]
    pub async fn profile(&self, user_id: Snowflake) -> GatewayResult<UserProfile> {
        Ok(self.ctx.profile_store().profile(user_id).await?)
    }

    /// Change the caller's password after verifying the current one.
    #[instrument(skip(self, request))]
    pub async fn change_password(
        &self,
        user_id: Snowflake,
        request: ChangePasswordRequest,
    ) -> GatewayResult<()> {
        request
            .validate()
            .map_err(|e| GatewayError::validation(e.to_string()))?;
        validate_password_strength(&request.new_password)?;

        let hash = self.ctx.profile_store().password_hash(user_id).await?;
        self.ctx
            .password_service()
            .verify_or_error(&request.current_password, &hash)?;

        let new_hash = self.ctx.password_service().hash(&request.new_password)?;
        self.ctx
            .profile_store()
            .update_password_hash(user_id, &new_hash)
            .await?;

        info!(user_id = %user_id, "password changed");
        Ok(())
    }

    /// Apply a partial profile update.
    #[instrument(skip(self, request))]
    pub async fn update_profile(
        &self,
        user_id: Snowflake,
        request: UpdateProfileRequest,
    ) -> GatewayResult<UserProfile> {
        request
            .validate()
            .map_err(|e| GatewayError::validation(e.to_string()))?;

        let mut profile = self.ctx.profile_store().profile(user_id).await?;

        if let Some(display_name) = request.display_name {
            profile.display_name = display_name.trim().to_string();
        }
        if let Some(bio) = request.bio {
            profile.bio = Some(bio);
        }
        if let Some(avatar_url) = request.avatar_url {
            profile.avatar_url = Some(avatar_url);
        }
        profile.updated_at = Utc::now();

        self.ctx.profile_store().update_profile(&profile).await?;

        info!(user_id = %user_id, "profile updated");
        Ok(profile)
    }

    /// Store a new avatar image and point the profile at it.
    #[instrument(skip(self, bytes))]
    pub async fn update_avatar(
        &self,
        user_id: Snowflake,
        file_name: &str,
        bytes: &[u8],
    ) -> GatewayResult<UserProfile> {
        let ext = std::path::Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .filter(|e| matches!(e.as_str(), "jpg" | "jpeg" | "png" | "webp"))
            .ok_or_else(|| GatewayError::validation("Unsupported avatar image type"))?;
        if bytes.is_empty() {
            return Err(GatewayError::validation("Avatar payload is empty"));
        }

        let path = format!("avatars/{user_id}.{ext}");
        let url = store_file(self.ctx.file_stores(), &path, bytes).await?;

        let mut profile = self.ctx.profile_store().profile(user_id).await?;
        profile.avatar_url = Some(url);
        profile.updated_at = Utc::now();
        self.ctx.profile_store().update_profile(&profile).await?;

        info!(user_id = %user_id, "avatar updated");
        Ok(profile)
    }
}
