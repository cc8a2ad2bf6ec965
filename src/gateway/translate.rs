//! Map provider errors to stable, client-facing messages.

use crate::identity::{ProviderError, RejectionKind};

pub const SIGNUP_PENDING: &str =
    "Signup successful! Please confirm your email using the provided code.";
pub const SIGNUP_FAILED: &str = "Signup failed";
pub const CONFIRMATION_SUCCEEDED: &str = "Confirmation successful";
pub const CONFIRMATION_FAILED: &str = "Confirmation failed";
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";
pub const LOGIN_FAILED: &str = "Login failed";

pub const USER_EXISTS: &str = "User already exists";
pub const WEAK_PASSWORD: &str = "The password does not meet the security requirements.";
pub const INVALID_PARAMETERS: &str =
    "Invalid parameters. Ensure the email and password are valid.";
pub const CODE_DELIVERY_FAILED: &str =
    "Failed to deliver confirmation code. Check your email service.";

/// Sign-up errors: known categories get a fixed message, everything else
/// carries the raw provider text.
#[must_use]
pub fn signup_error(err: &ProviderError) -> String {
    match err {
        ProviderError::Rejected { kind, .. } => match kind {
            RejectionKind::UsernameExists => USER_EXISTS.to_string(),
            RejectionKind::InvalidPassword => WEAK_PASSWORD.to_string(),
            RejectionKind::InvalidParameter => INVALID_PARAMETERS.to_string(),
            RejectionKind::CodeDeliveryFailure => CODE_DELIVERY_FAILED.to_string(),
            _ => format!("Sign-up failed: {err}"),
        },
        _ => format!("Sign-up failed: {err}"),
    }
}

#[must_use]
pub fn confirmation_error(err: &ProviderError) -> String {
    format!("Confirmation failed: {err}")
}

#[must_use]
pub fn login_error(err: &ProviderError) -> String {
    format!("Authentication failed: {err}")
}
