/// Authentication service - JWT and password handling
///
/// Access tokens carry the account role so capability checks need no
/// database read. Refresh tokens carry only the subject; the role is looked up
/// again whenever a refresh token is exchanged, so role changes take effect
/// within one access-token lifetime.
use crate::config::AuthSettings;
use crate::error::{Result, ServerError};
use cadence_core::{Role, User, UserId};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub struct AuthService {
    secret: String,
    access_token_expiration: Duration,
    refresh_token_expiration: Duration,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    /// Present on access tokens only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    pub exp: i64,
    pub iat: i64,
    pub token_type: TokenType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// Tokens handed out at login
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl AuthService {
    pub fn new(secret: String, access_expiration_hours: u64, refresh_expiration_days: u64) -> Self {
        Self {
            secret,
            access_token_expiration: Duration::hours(access_expiration_hours as i64),
            refresh_token_expiration: Duration::days(refresh_expiration_days as i64),
        }
    }

    pub fn from_settings(settings: &AuthSettings) -> Self {
        Self::new(
            settings.jwt_secret.clone(),
            settings.jwt_expiration_hours,
            settings.jwt_refresh_expiration_days,
        )
    }

    pub fn hash_password(&self, password: &str) -> Result<String> {
        bcrypt::hash(password, bcrypt::DEFAULT_COST).map_err(ServerError::from)
    }

    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool> {
        bcrypt::verify(password, hash).map_err(ServerError::from)
    }

    /// Access and refresh token for a freshly authenticated user
    pub fn issue(&self, user: &User) -> Result<TokenPair> {
        Ok(TokenPair {
            access_token: self.create_access_token(&user.id, user.role)?,
            refresh_token: self.create_refresh_token(&user.id)?,
        })
    }

    pub fn create_access_token(&self, user_id: &UserId, role: Role) -> Result<String> {
        self.sign(user_id, Some(role), TokenType::Access, self.access_token_expiration)
    }

    pub fn create_refresh_token(&self, user_id: &UserId) -> Result<String> {
        self.sign(user_id, None, TokenType::Refresh, self.refresh_token_expiration)
    }

    /// Check signature and expiry, whatever the token type
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let decoding_key = DecodingKey::from_secret(self.secret.as_bytes());
        let token_data = decode::<Claims>(token, &decoding_key, &Validation::default())?;
        Ok(token_data.claims)
    }

    /// Subject and role of a valid access token
    pub fn verify_access_token(&self, token: &str) -> Result<(UserId, Role)> {
        let claims = self.verify_token(token)?;
        match (claims.token_type, claims.role) {
            (TokenType::Access, Some(role)) => Ok((UserId::new(claims.sub), role)),
            (TokenType::Access, None) => Err(ServerError::Auth("Token has no role".to_string())),
            (TokenType::Refresh, _) => Err(ServerError::Auth("Invalid token type".to_string())),
        }
    }

    /// Subject of a valid refresh token
    pub fn verify_refresh_token(&self, token: &str) -> Result<UserId> {
        let claims = self.verify_token(token)?;
        if claims.token_type != TokenType::Refresh {
            return Err(ServerError::Auth("Invalid token type".to_string()));
        }
        Ok(UserId::new(claims.sub))
    }

    fn sign(
        &self,
        user_id: &UserId,
        role: Option<Role>,
        token_type: TokenType,
        expiration: Duration,
    ) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.as_str().to_string(),
            role,
            exp: (now + expiration).timestamp(),
            iat: now.timestamp(),
            token_type,
        };

        let encoding_key = EncodingKey::from_secret(self.secret.as_bytes());
        encode(&Header::default(), &claims, &encoding_key).map_err(ServerError::from)
    }
}
