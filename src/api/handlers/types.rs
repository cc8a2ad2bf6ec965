//! Request/response types for the gateway endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(ToSchema, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(ToSchema, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmCodeRequest {
    pub username: String,
    pub confirmation_code: String,
}

#[derive(ToSchema, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct TokenResponse {
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use serde_json::json;

    #[test]
    fn signup_request_uses_camel_case_confirmation() -> Result<()> {
        let request: SignupRequest = serde_json::from_value(json!({
            "username": "alice",
            "email": "alice@example.com",
            "password": "Secure123!",
            "confirmPassword": "Secure123!"
        }))?;
        assert_eq!(request.confirm_password, "Secure123!");
        Ok(())
    }

    #[test]
    fn confirm_code_request_uses_camel_case_code() -> Result<()> {
        let request: ConfirmCodeRequest = serde_json::from_value(json!({
            "username": "alice",
            "confirmationCode": "123456"
        }))?;
        assert_eq!(request.confirmation_code, "123456");
        Ok(())
    }

    #[test]
    fn message_response_omits_missing_error() -> Result<()> {
        let value = serde_json::to_value(MessageResponse {
            message: "Confirmation successful".to_string(),
            error: None,
        })?;
        assert_eq!(value, json!({ "message": "Confirmation successful" }));
        Ok(())
    }
}
