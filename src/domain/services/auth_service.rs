use crate::domain::models::{auth::Claims, user::User};
use crate::error::AppError;
use crate::config::Config;
use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::rngs::OsRng;
use uuid::Uuid;
use chrono::{Utc, Duration};
use tracing::error;

pub const TOKEN_AUDIENCE: &str = "rsvp-console";

pub struct AuthService {
    config: Config,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl AuthService {
    pub fn new(config: Config) -> Self {
        let encoding_key = EncodingKey::from_ed_pem(config.jwt_secret_key.as_bytes())
            .expect("Invalid JWT Private Key PEM");
        let decoding_key = DecodingKey::from_ed_pem(config.jwt_public_key.as_bytes())
            .expect("Invalid JWT Public Key PEM");

        Self { config, encoding_key, decoding_key }
    }

    pub fn hash_password(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::InternalWithMsg(format!("Password hashing failed: {}", e)))
    }

    pub fn verify_password(&self, password: &str, password_hash: &str) -> Result<(), AppError> {
        let parsed_hash = PasswordHash::new(password_hash)
            .map_err(|_| AppError::Internal)?;

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .map_err(|_| invalid_credentials())
    }

    pub fn issue_access_token(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now();
        let exp = (now + Duration::minutes(self.config.session_ttl_minutes)).timestamp() as usize;

        let claims = Claims {
            iss: self.config.auth_issuer.clone(),
            sub: user.id.clone(),
            aud: TOKEN_AUDIENCE.to_string(),
            exp,
            iat: now.timestamp() as usize,
            jti: Uuid::new_v4().to_string(),
            email: user.email.clone(),
        };

        encode(&Header::new(Algorithm::EdDSA), &claims, &self.encoding_key)
            .map_err(|e| {
                error!("JWT encoding failed: {}", e);
                AppError::Internal
            })
    }

    pub fn verify_access_token(&self, token: &str) -> Result<Claims, AppError> {
        let mut validation = Validation::new(Algorithm::EdDSA);
        validation.set_audience(&[TOKEN_AUDIENCE]);
        validation.set_issuer(&[self.config.auth_issuer.as_str()]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|_| AppError::Unauthorized("Invalid or expired session".into()))
    }
}

/// Same answer for unknown email and wrong password.
pub fn invalid_credentials() -> AppError {
    AppError::Unauthorized("Invalid email or password".into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(ttl_minutes: i64) -> Config {
        Config {
            database_url: "sqlite::memory:".into(),
            port: 0,
            jwt_secret_key: include_str!("../../../tests/keys/test_private.pem").into(),
            jwt_public_key: include_str!("../../../tests/keys/test_public.pem").into(),
            auth_issuer: "test-issuer".into(),
            session_ttl_minutes: ttl_minutes,
            public_base_url: "http://localhost".into(),
            mail_service_url: None,
            mail_service_token: String::new(),
        }
    }

    #[test]
    fn issued_token_verifies_to_the_same_subject() {
        let service = AuthService::new(config(60));
        let user = User::new("org@x.com".into(), None, String::new());

        let token = service.issue_access_token(&user).unwrap();
        let claims = service.verify_access_token(&token).unwrap();

        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.email, "org@x.com");
        assert_eq!(claims.aud, TOKEN_AUDIENCE);
    }

    #[test]
    fn expired_token_is_rejected() {
        let service = AuthService::new(config(-10));
        let user = User::new("org@x.com".into(), None, String::new());

        let token = service.issue_access_token(&user).unwrap();
        assert!(matches!(service.verify_access_token(&token), Err(AppError::Unauthorized(_))));
    }

    #[test]
    fn tampered_token_is_rejected() {
        let service = AuthService::new(config(60));
        let user = User::new("org@x.com".into(), None, String::new());
        let token = service.issue_access_token(&user).unwrap();

        let tampered = format!("{}x", token);
        assert!(service.verify_access_token(&tampered).is_err());
        assert!(service.verify_access_token("not-a-jwt").is_err());
    }

    #[test]
    fn password_hash_verifies_only_the_original_password() {
        let service = AuthService::new(config(60));
        let hash = service.hash_password("correct horse").unwrap();

        assert!(service.verify_password("correct horse", &hash).is_ok());
        assert!(matches!(
            service.verify_password("battery staple", &hash),
            Err(AppError::Unauthorized(_))
        ));
    }
}
