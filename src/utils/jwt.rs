use crate::config::AppConfig;
use actix_web::cookie::{Cookie, SameSite};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// Refresh Token 所在的 Cookie 名
pub const REFRESH_COOKIE: &str = "educa_refresh";

/// token 类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Access,
    Refresh,
}

// JWT Claims 结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,            // 用户ID
    pub role: String,           // 用户角色
    pub token_type: TokenKind,
    pub exp: usize,             // 过期时间戳
    pub iat: usize,             // 签发时间戳
}

impl Claims {
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

pub struct JwtUtils;

impl JwtUtils {
    fn secret() -> &'static str {
        &AppConfig::get().jwt.secret
    }

    fn sign(
        user_id: i64,
        role: &str,
        kind: TokenKind,
        ttl: chrono::Duration,
        secret: &str,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            role: role.to_string(),
            token_type: kind,
            exp: (now + ttl).timestamp() as usize,
            iat: now.timestamp() as usize,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    fn verify(
        token: &str,
        expected: TokenKind,
        secret: &str,
    ) -> Result<Claims, jsonwebtoken::errors::Error> {
        let claims = decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?
        .claims;
        if claims.token_type != expected {
            return Err(jsonwebtoken::errors::ErrorKind::InvalidToken.into());
        }
        Ok(claims)
    }

    pub fn generate_access_token(
        user_id: i64,
        role: &str,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let ttl = chrono::Duration::minutes(AppConfig::get().jwt.access_token_expiry);
        Self::sign(user_id, role, TokenKind::Access, ttl, Self::secret())
    }

    /// `token_expiry` 为 None 时使用默认的刷新有效期
    pub fn generate_token_pair(
        user_id: i64,
        role: &str,
        token_expiry: Option<chrono::Duration>,
    ) -> Result<TokenPair, jsonwebtoken::errors::Error> {
        let refresh_ttl = token_expiry.unwrap_or_else(|| {
            chrono::Duration::days(AppConfig::get().jwt.refresh_token_expiry)
        });
        Ok(TokenPair {
            access_token: Self::generate_access_token(user_id, role)?,
            refresh_token: Self::sign(
                user_id,
                role,
                TokenKind::Refresh,
                refresh_ttl,
                Self::secret(),
            )?,
        })
    }

    pub fn verify_access_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        Self::verify(token, TokenKind::Access, Self::secret())
    }

    pub fn verify_refresh_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        Self::verify(token, TokenKind::Refresh, Self::secret())
    }

    // 使用 Refresh Token 生成新的 Access Token
    pub fn refresh_access_token(
        refresh_token: &str,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = Self::verify_refresh_token(refresh_token)?;
        let user_id = claims
            .user_id()
            .ok_or(jsonwebtoken::errors::ErrorKind::InvalidToken)?;
        Self::generate_access_token(user_id, &claims.role)
    }

    fn refresh_cookie(value: String, max_age: actix_web::cookie::time::Duration) -> Cookie<'static> {
        Cookie::build(REFRESH_COOKIE, value)
            .path("/api/v1/auth")
            .max_age(max_age)
            .same_site(SameSite::Strict)
            .http_only(true)
            .secure(AppConfig::get().is_production())
            .finish()
    }

    pub fn create_refresh_token_cookie(refresh_token: &str, days: i64) -> Cookie<'static> {
        Self::refresh_cookie(
            refresh_token.to_string(),
            actix_web::cookie::time::Duration::days(days),
        )
    }

    /// 注销时用于清除 Cookie
    pub fn create_empty_refresh_token_cookie() -> Cookie<'static> {
        Self::refresh_cookie(String::new(), actix_web::cookie::time::Duration::seconds(0))
    }

    pub fn extract_refresh_token_from_cookie(req: &actix_web::HttpRequest) -> Option<String> {
        req.cookie(REFRESH_COOKIE)
            .map(|cookie| cookie.value().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "unit-test-secret";

    #[test]
    fn test_sign_and_verify_access() {
        let token =
            JwtUtils::sign(7, "instructor", TokenKind::Access, chrono::Duration::minutes(5), SECRET)
                .unwrap();
        let claims = JwtUtils::verify(&token, TokenKind::Access, SECRET).unwrap();
        assert_eq!(claims.user_id(), Some(7));
        assert_eq!(claims.role, "instructor");
    }

    #[test]
    fn test_refresh_token_is_not_an_access_token() {
        let token =
            JwtUtils::sign(7, "student", TokenKind::Refresh, chrono::Duration::days(1), SECRET)
                .unwrap();
        assert!(JwtUtils::verify(&token, TokenKind::Access, SECRET).is_err());
        assert!(JwtUtils::verify(&token, TokenKind::Refresh, SECRET).is_ok());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token =
            JwtUtils::sign(1, "admin", TokenKind::Access, chrono::Duration::minutes(5), SECRET)
                .unwrap();
        assert!(JwtUtils::verify(&token, TokenKind::Access, "other").is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let token =
            JwtUtils::sign(1, "admin", TokenKind::Access, chrono::Duration::minutes(-10), SECRET)
                .unwrap();
        assert!(JwtUtils::verify(&token, TokenKind::Access, SECRET).is_err());
    }
}
