//! Authentication handling for the Mayar API
//!
//! Supports two credential kinds:
//! - Bearer tokens (`Authorization: Bearer <token>`)
//! - No authentication (empty header set)

use std::collections::HashMap;
use std::fmt;

/// Trait for producing authentication headers
pub trait AuthHandler: Send + Sync {
    /// Header name to value mapping attached to every request
    fn headers(&self) -> HashMap<String, String>;

    /// Apply the authentication headers to an existing header map
    fn apply_auth(&self, headers: &mut HashMap<String, String>) {
        headers.extend(self.headers());
    }
}

/// Bearer token authentication
#[derive(Clone)]
pub struct ApiToken {
    token: String,
}

impl ApiToken {
    /// Create with an explicit API token
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into() }
    }
}

// Keep the token out of debug output
impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiToken").field("token", &"***").finish()
    }
}

impl AuthHandler for ApiToken {
    fn headers(&self) -> HashMap<String, String> {
        HashMap::from([("Authorization".to_string(), format!("Bearer {}", self.token))])
    }
}

/// Unauthenticated requests
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAuth;

impl AuthHandler for NoAuth {
    fn headers(&self) -> HashMap<String, String> {
        HashMap::new()
    }
}

/// Pick the handler for an optional token; empty tokens mean no auth
pub fn create_auth_handler(token: Option<&str>) -> Box<dyn AuthHandler> {
    match token {
        Some(token) if !token.is_empty() => Box::new(ApiToken::new(token)),
        _ => Box::new(NoAuth),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_header() {
        let auth = ApiToken::new("test-key-123");
        let headers = auth.headers();
        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("Authorization").unwrap(), "Bearer test-key-123");
    }

    #[test]
    fn test_no_auth_is_empty() {
        assert!(NoAuth.headers().is_empty());
    }

    #[test]
    fn test_apply_auth_keeps_existing_headers() {
        let mut headers = HashMap::from([("Accept".to_string(), "application/json".to_string())]);
        ApiToken::new("abc").apply_auth(&mut headers);
        assert_eq!(headers.len(), 2);
        assert_eq!(headers.get("Authorization").unwrap(), "Bearer abc");
    }

    #[test]
    fn test_factory() {
        assert_eq!(create_auth_handler(Some("tok")).headers().len(), 1);
        assert!(create_auth_handler(Some("")).headers().is_empty());
        assert!(create_auth_handler(None).headers().is_empty());
    }

    #[test]
    fn test_debug_redacts_token() {
        let rendered = format!("{:?}", ApiToken::new("secret-value"));
        assert!(!rendered.contains("secret-value"));
    }
}
