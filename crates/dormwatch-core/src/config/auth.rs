//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// JWT authentication configuration.
///
/// Tokens are signed with a shared HMAC secret and remain valid until
/// expiry — there is no session table or revocation list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret used to sign and verify tokens.
    pub jwt_secret: String,
    /// Token lifetime in hours.
    #[serde(default = "default_ttl_hours")]
    pub jwt_ttl_hours: u64,
}

fn default_ttl_hours() -> u64 {
    72
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ttl() {
        let cfg: AuthConfig =
            serde_json::from_str(r#"{"jwt_secret": "s"}"#).expect("deserialize");
        assert_eq!(cfg.jwt_ttl_hours, 72);
    }
}
