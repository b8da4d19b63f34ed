use crate::error::ApiError;
use serde::Deserialize;

pub const ADMIN_ROLE: &str = "admin";

/// Claims extracted from the bearer token by the OAuth2 resource-server
/// layer. Anything beyond `sub` and `roles` in the token is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct RailwayClaims {
    pub sub: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl RailwayClaims {
    /// Subject identifier of the caller; orders are scoped to it.
    pub fn subject(&self) -> Result<&str, ApiError> {
        self.sub
            .as_deref()
            .ok_or_else(|| ApiError::Unauthorized("Token has no subject".to_owned()))
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    pub fn require_admin(&self) -> Result<(), ApiError> {
        if self.has_role(ADMIN_ROLE) {
            Ok(())
        } else {
            Err(ApiError::Forbidden(
                "You do not have permission to perform this action.".to_owned(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(sub: Option<&str>, roles: &[&str]) -> RailwayClaims {
        RailwayClaims {
            sub: sub.map(str::to_owned),
            roles: roles.iter().map(|r| r.to_string()).collect(),
        }
    }

    #[test]
    fn test_admin_check() {
        assert!(claims(Some("u1"), &["admin"]).require_admin().is_ok());
        assert!(claims(Some("u1"), &["staff", "admin"]).require_admin().is_ok());
        assert!(claims(Some("u1"), &[]).require_admin().is_err());
        assert!(claims(Some("u1"), &["administrator"]).require_admin().is_err());
    }

    #[test]
    fn test_subject_required() {
        assert_eq!(claims(Some("u1"), &[]).subject().unwrap(), "u1");
        assert!(claims(None, &[]).subject().is_err());
    }

    #[test]
    fn test_roles_claim_optional_in_token() {
        let parsed: RailwayClaims = serde_json::from_str(r#"{"sub": "user-1"}"#).unwrap();
        assert_eq!(parsed.sub.as_deref(), Some("user-1"));
        assert!(parsed.roles.is_empty());
    }
}
