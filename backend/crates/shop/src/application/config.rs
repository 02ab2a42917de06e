//! Application Configuration
//!
//! Built once at startup and shared by `Arc`; nothing here is read from the
//! environment after that.

use std::time::Duration;

use platform::cookie::CookieConfig;
/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Shop application configuration
#[derive(Debug, Clone)]
pub struct ShopConfig {
    /// Session cookie name
    pub session_cookie_name: String,
    /// HMAC key for session tokens (32 bytes)
    pub token_secret: [u8; 32],
    /// Lifetime of an issued session token (and of its cookie)
    pub token_ttl: Duration,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
    /// Country stored on addresses that leave it blank
    pub default_country: String,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "jwt".to_string(),
            token_secret: platform::crypto::random_secret(),
            token_ttl: Duration::from_secs(7 * 24 * 3600), // 1 week
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            password_pepper: None,
            default_country: "India".to_string(),
        }
    }
}

impl ShopConfig {
    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::default()
        }
    }

    /// Get token TTL in seconds
    pub fn token_ttl_secs(&self) -> i64 {
        i64::try_from(self.token_ttl.as_secs()).unwrap_or(i64::MAX)
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }

    /// Session cookie settings; the cookie lives as long as the token
    pub fn cookie_config(&self) -> CookieConfig {
        CookieConfig {
            name: self.session_cookie_name.clone(),
            secure: self.cookie_secure,
            http_only: true,
            same_site: self.cookie_same_site,
            path: "/".to_string(),
            max_age_secs: Some(self.token_ttl.as_secs()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ShopConfig::default();
        assert_eq!(config.session_cookie_name, "jwt");
        assert_eq!(config.token_ttl_secs(), 604800);
        assert_eq!(config.default_country, "India");
        assert!(config.pepper().is_none());
    }

    #[test]
    fn test_default_secret_is_random() {
        let a = ShopConfig::default();
        let b = ShopConfig::default();
        assert_ne!(a.token_secret, [0u8; 32]);
        assert_ne!(a.token_secret, b.token_secret);
    }

    #[test]
    fn test_development_secret_is_random() {
        let a = ShopConfig::development();
        let b = ShopConfig::development();
        assert!(!a.cookie_secure);
        assert_ne!(a.token_secret, b.token_secret);
    }

    #[test]
    fn test_cookie_config_matches_token_ttl() {
        let cookie = ShopConfig::default().cookie_config();
        assert_eq!(cookie.name, "jwt");
        assert_eq!(cookie.max_age_secs, Some(604800));
        assert!(cookie.http_only);
    }
}
