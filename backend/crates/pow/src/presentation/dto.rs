//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::IssueOutcome;

/// Response for GET /api/pow/challenge
///
/// A disabled service reports only `{ "enabled": false }`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeResponse {
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<IssueOutcome> for ChallengeResponse {
    fn from(outcome: IssueOutcome) -> Self {
        match outcome {
            IssueOutcome::Issued(descriptor) => Self {
                enabled: true,
                token: Some(descriptor.token.as_str().to_string()),
                difficulty: Some(descriptor.difficulty.bits()),
                expires_at: Some(descriptor.expires_at),
            },
            IssueOutcome::Disabled => Self {
                enabled: false,
                token: None,
                difficulty: None,
                expires_at: None,
            },
        }
    }
}

/// Request for POST /api/pow/verify
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyRequest {
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub solution: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ChallengeDescriptor;
    use crate::domain::value_objects::{ChallengeToken, Difficulty};

    #[test]
    fn test_disabled_response_has_only_enabled_flag() {
        let json = serde_json::to_value(ChallengeResponse::from(IssueOutcome::Disabled)).unwrap();
        assert_eq!(json, serde_json::json!({ "enabled": false }));
    }

    #[test]
    fn test_issued_response_uses_camel_case() {
        let outcome = IssueOutcome::Issued(ChallengeDescriptor {
            token: ChallengeToken::parse("abc").unwrap(),
            difficulty: Difficulty::new(4).unwrap(),
            expires_at: Utc::now(),
        });
        let json = serde_json::to_value(ChallengeResponse::from(outcome)).unwrap();

        assert_eq!(json["enabled"], true);
        assert_eq!(json["token"], "abc");
        assert_eq!(json["difficulty"], 4);
        assert!(json.get("expiresAt").is_some());
    }

    #[test]
    fn test_verify_request_tolerates_missing_fields() {
        let req: VerifyRequest = serde_json::from_str(r#"{"token":"t"}"#).unwrap();
        assert_eq!(req.token, "t");
        assert!(req.solution.is_empty());
    }
}
