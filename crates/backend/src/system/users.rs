use anyhow::Result;
use chrono::Utc;
use contracts::auth::UserInfo;

use crate::shared::db::pool;

const DEFAULT_ADMIN_EMAIL: &str = "admin@example.com";
const DEFAULT_ADMIN_PASSWORD: &str = "admin";

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: String,
    pub email: String,
    pub display_name: Option<String>,
    pub password_hash: String,
    pub is_admin: bool,
}

impl User {
    pub fn to_info(&self) -> UserInfo {
        UserInfo {
            id: self.id.clone(),
            email: self.email.clone(),
            display_name: self.display_name.clone(),
            is_admin: self.is_admin,
        }
    }
}

/// Look up a user by email and check the password. Returns None for both
/// unknown email and wrong password so callers cannot tell them apart.
pub async fn verify_credentials(email: &str, password: &str) -> Result<Option<User>> {
    let user: Option<User> = sqlx::query_as(
        "SELECT id, email, display_name, password_hash, is_admin
         FROM sys_users WHERE email = ?",
    )
    .bind(email)
    .fetch_optional(pool())
    .await?;

    let Some(user) = user else {
        return Ok(None);
    };

    if password::verify(password, &user.password_hash)? {
        Ok(Some(user))
    } else {
        Ok(None)
    }
}

pub async fn get_by_id(user_id: &str) -> Result<Option<User>> {
    let user = sqlx::query_as(
        "SELECT id, email, display_name, password_hash, is_admin
         FROM sys_users WHERE id = ?",
    )
    .bind(user_id)
    .fetch_optional(pool())
    .await?;
    Ok(user)
}

/// Seed the default admin account on first start so the dashboard is
/// reachable before any user management exists.
pub async fn ensure_default_admin() -> Result<()> {
    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM sys_users")
        .fetch_one(pool())
        .await?;
    if count.0 > 0 {
        return Ok(());
    }

    let hash = password::hash(DEFAULT_ADMIN_PASSWORD)?;
    sqlx::query(
        "INSERT INTO sys_users (id, email, display_name, password_hash, is_admin, created_at)
         VALUES (?, ?, ?, ?, 1, ?)",
    )
    .bind(uuid::Uuid::new_v4().to_string())
    .bind(DEFAULT_ADMIN_EMAIL)
    .bind("Administrator")
    .bind(&hash)
    .bind(Utc::now().to_rfc3339())
    .execute(pool())
    .await?;

    tracing::warn!(
        "Seeded default admin {} with the default password; change it",
        DEFAULT_ADMIN_EMAIL
    );
    Ok(())
}

mod password {
    use anyhow::{anyhow, Result};
    use argon2::password_hash::rand_core::OsRng;
    use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
    use argon2::Argon2;

    pub fn hash(password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| anyhow!("password hashing failed: {}", e))?;
        Ok(hash.to_string())
    }

    pub fn verify(password: &str, hash: &str) -> Result<bool> {
        let parsed = PasswordHash::new(hash).map_err(|e| anyhow!("invalid password hash: {}", e))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn hash_then_verify() {
            let hash = hash("s3cret").unwrap();
            assert!(verify("s3cret", &hash).unwrap());
            assert!(!verify("wrong", &hash).unwrap());
        }
    }
}
