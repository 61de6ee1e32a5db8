use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    #[default]
    Renter,
    Homeowner,
    Admin,
}

impl UserType {
    pub const ALL: [UserType; 3] = [UserType::Renter, UserType::Homeowner, UserType::Admin];

    pub fn as_str(self) -> &'static str {
        match self {
            UserType::Renter => "renter",
            UserType::Homeowner => "homeowner",
            UserType::Admin => "admin",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            UserType::Renter => "Renter / Tenant",
            UserType::Homeowner => "Home Owner / Landlord",
            UserType::Admin => "Administrator",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            UserType::Renter => "Looking to rent properties for short or long term stays",
            UserType::Homeowner => "Want to list and manage your properties for rent",
            UserType::Admin => "Platform administrator with full system access",
        }
    }

    /// Page a user of this type lands on after signing in.
    pub fn landing_path(self) -> &'static str {
        match self {
            UserType::Renter => "/",
            UserType::Homeowner => "/homeowner-dashboard",
            UserType::Admin => "/admin-dashboard",
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleDescriptor {
    pub value: UserType,
    pub label: &'static str,
    pub description: &'static str,
    pub landing_path: &'static str,
}

pub fn roles() -> Vec<RoleDescriptor> {
    UserType::ALL
        .iter()
        .map(|role| RoleDescriptor {
            value: *role,
            label: role.display_name(),
            description: role.description(),
            landing_path: role.landing_path(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Please fill in all required information.")]
    MissingFields { fields: Vec<&'static str> },
    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),
    #[error("Passwords don't match!")]
    PasswordMismatch,
    #[error("Please agree to the terms and conditions")]
    TermsNotAccepted,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub user_type: UserType,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
    #[serde(default)]
    pub user_type: UserType,
    #[serde(default)]
    pub agree_to_terms: bool,
}

/// Where the client should go next and what to tell the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthOutcome {
    pub user_type: UserType,
    pub email: String,
    pub redirect_to: &'static str,
    pub message: String,
}

fn missing_fields(fields: &[(&'static str, &str)]) -> Result<(), AuthError> {
    let missing: Vec<&'static str> = fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(AuthError::MissingFields { fields: missing })
    }
}

fn checked_email(raw: &str) -> Result<String, AuthError> {
    let email = raw.trim();
    if email.contains('@') {
        Ok(email.to_string())
    } else {
        Err(AuthError::InvalidEmail(email.to_string()))
    }
}

/// Mock sign-in; credentials are not verified.
pub fn login(request: &LoginRequest) -> Result<AuthOutcome, AuthError> {
    missing_fields(&[
        ("email", request.email.as_str()),
        ("password", request.password.as_str()),
    ])?;
    let email = checked_email(&request.email)?;

    Ok(AuthOutcome {
        user_type: request.user_type,
        email,
        redirect_to: request.user_type.landing_path(),
        message: format!("Welcome back! Logging in as {}", request.user_type),
    })
}

pub fn signup(request: &SignupRequest) -> Result<AuthOutcome, AuthError> {
    missing_fields(&[
        ("first_name", request.first_name.as_str()),
        ("last_name", request.last_name.as_str()),
        ("email", request.email.as_str()),
        ("phone", request.phone.as_str()),
        ("password", request.password.as_str()),
        ("confirm_password", request.confirm_password.as_str()),
    ])?;
    let email = checked_email(&request.email)?;

    if request.password != request.confirm_password {
        return Err(AuthError::PasswordMismatch);
    }
    if !request.agree_to_terms {
        return Err(AuthError::TermsNotAccepted);
    }

    Ok(AuthOutcome {
        user_type: request.user_type,
        email,
        redirect_to: request.user_type.landing_path(),
        message: format!(
            "Welcome {}! Your {} account has been created.",
            request.first_name.trim(),
            request.user_type
        ),
    })
}
