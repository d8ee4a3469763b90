use anyhow::{Context, Result};
use chrono::Utc;
use contracts::auth::TokenClaims;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use once_cell::sync::OnceCell;
use rand::Rng;

const ACCESS_TOKEN_LIFETIME_HOURS: i64 = 24;

static JWT_SECRET: OnceCell<String> = OnceCell::new();

/// Generate JWT access token with 24 hours lifetime
pub async fn generate_access_token(user_id: &str, email: &str, is_admin: bool) -> Result<String> {
    let secret = get_jwt_secret().await?;
    encode_token(user_id, email, is_admin, &secret)
}

/// Validate JWT token and extract claims
pub async fn validate_token(token: &str) -> Result<TokenClaims> {
    let secret = get_jwt_secret().await?;
    decode_token(token, &secret)
}

fn encode_token(user_id: &str, email: &str, is_admin: bool, secret: &str) -> Result<String> {
    let now = Utc::now();
    let exp = (now + chrono::Duration::hours(ACCESS_TOKEN_LIFETIME_HOURS)).timestamp() as usize;
    let iat = now.timestamp() as usize;

    let claims = TokenClaims {
        sub: user_id.to_string(),
        email: email.to_string(),
        is_admin,
        exp,
        iat,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .context("Failed to encode JWT token")
}

fn decode_token(token: &str, secret: &str) -> Result<TokenClaims> {
    let token_data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .context("Failed to decode JWT token")?;

    Ok(token_data.claims)
}

/// Get or create the JWT secret. Cached for the process lifetime and
/// persisted in sys_settings so tokens survive restarts.
pub async fn get_jwt_secret() -> Result<String> {
    if let Some(secret) = JWT_SECRET.get() {
        return Ok(secret.clone());
    }

    let secret = match get_jwt_secret_from_db().await? {
        Some(secret) => secret,
        None => {
            let secret = generate_jwt_secret();
            save_jwt_secret_to_db(&secret).await?;
            secret
        }
    };

    let _ = JWT_SECRET.set(secret.clone());
    Ok(secret)
}

/// Generate a cryptographically secure JWT secret (256 bits)
fn generate_jwt_secret() -> String {
    use base64::{engine::general_purpose, Engine as _};
    let mut rng = rand::thread_rng();
    let random_bytes: Vec<u8> = (0..32).map(|_| rng.gen::<u8>()).collect();
    general_purpose::STANDARD.encode(&random_bytes)
}

async fn get_jwt_secret_from_db() -> Result<Option<String>> {
    let row: Option<(String,)> =
        sqlx::query_as("SELECT value FROM sys_settings WHERE key = 'jwt_secret'")
            .fetch_optional(crate::shared::db::pool())
            .await?;
    Ok(row.map(|(value,)| value))
}

async fn save_jwt_secret_to_db(secret: &str) -> Result<()> {
    sqlx::query("INSERT OR REPLACE INTO sys_settings (key, value) VALUES ('jwt_secret', ?)")
        .bind(secret)
        .execute(crate::shared::db::pool())
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_roundtrip_preserves_claims() {
        let secret = "test-secret";
        let token = encode_token("user-1", "admin@example.com", true, secret).unwrap();
        let claims = decode_token(&token, secret).unwrap();

        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.email, "admin@example.com");
        assert!(claims.is_admin);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = encode_token("user-1", "admin@example.com", false, "secret-a").unwrap();
        assert!(decode_token(&token, "secret-b").is_err());
    }

    #[test]
    fn generated_secret_is_256_bits() {
        use base64::{engine::general_purpose, Engine as _};
        let secret = generate_jwt_secret();
        let bytes = general_purpose::STANDARD.decode(&secret).unwrap();
        assert_eq!(bytes.len(), 32);
    }
}
