use auth::{AuthError, AuthService, Role};

const DEFAULT_ADMIN_EMAIL: &str = "admin@sweetshop.local";
const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Provision the default admin account if it is not already present.
pub async fn ensure_admin(auth: &AuthService) -> Result<(), AuthError> {
    match auth
        .register_with_role(DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD, Role::Admin)
        .await
    {
        Ok(user) => {
            tracing::warn!(
                email = DEFAULT_ADMIN_EMAIL,
                id = user.id,
                "created default admin account; change its password before production use"
            );
            Ok(())
        }
        Err(AuthError::EmailTaken) => {
            tracing::debug!(email = DEFAULT_ADMIN_EMAIL, "admin account already present");
            Ok(())
        }
        Err(e) => Err(e),
    }
}
