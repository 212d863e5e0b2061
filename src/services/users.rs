use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::User,
    services::providers::UserDirectory,
};

/// Parses a user identity string into a user id
pub fn parse_user_id(identity: &str) -> AppResult<Uuid> {
    Uuid::parse_str(identity.trim())
        .map_err(|_| AppError::InvalidUserIdentity(identity.to_string()))
}

/// Resolves a user identity string to a known user
///
/// Malformed identities fail before the directory is consulted.
pub async fn resolve_user(directory: &dyn UserDirectory, identity: &str) -> AppResult<User> {
    let user_id = parse_user_id(identity).inspect_err(|_| {
        tracing::warn!(identity = %identity, "Invalid user ID format");
    })?;

    directory.resolve_user(user_id).await?.ok_or_else(|| {
        tracing::warn!(user_id = %user_id, "User not found");
        AppError::UserNotFound(user_id)
    })
}
