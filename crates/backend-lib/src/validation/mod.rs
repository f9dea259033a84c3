// ============================
// glasshouse-backend-lib/src/validation/mod.rs
// ============================
//! Request input validation.

use crate::error::AppError;

/// Minimum length for new passwords
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Both credential fields must be present
pub fn validate_credentials(identifier: &str, password: &str) -> Result<(), AppError> {
    if identifier.is_empty() || password.is_empty() {
        return Err(AppError::Validation(
            "Identifier and password are required".to_string(),
        ));
    }
    Ok(())
}

/// Registration additionally enforces the minimum password length
pub fn validate_new_password(password: &str) -> Result<(), AppError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AppError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}
