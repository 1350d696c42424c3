//! User models
//!
//! Users log in either anonymously or with email and password. The variant
//! is carried on the wire in `auth_type`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Sex as accepted by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

/// Authentication variant discriminator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthType {
    EmailPassword,
    Anonymous,
}

impl AuthType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthType::EmailPassword => "email_password",
            AuthType::Anonymous => "anonymous",
        }
    }
}

/// Login credentials
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "auth_type", rename_all = "snake_case")]
pub enum Login {
    EmailPassword {
        email: String,
        password: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        new_password: Option<String>,
    },
    Anonymous,
}

impl Login {
    pub fn anonymous() -> Self {
        Login::Anonymous
    }

    /// Email/password login; the email is trimmed since the service matches it exactly
    pub fn email_password(email: &str, password: &str) -> Self {
        Login::EmailPassword {
            email: email.trim().to_string(),
            password: password.to_string(),
            new_password: None,
        }
    }

    pub fn auth_type(&self) -> AuthType {
        match self {
            Login::EmailPassword { .. } => AuthType::EmailPassword,
            Login::Anonymous => AuthType::Anonymous,
        }
    }
}

/// A dated body weight measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub date: DateTime<Utc>,
    pub weight: f64,
}

/// Profile fields shared by every user variant
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_dish_media: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<Vec<WeightEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sex: Option<Sex>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
}

/// A user sent to the service (creation, login)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(flatten)]
    pub login: Login,
    #[serde(flatten)]
    pub profile: UserProfile,
}

impl User {
    pub fn new(login: Login) -> Self {
        Self {
            login,
            profile: UserProfile::default(),
        }
    }

    pub fn with_profile(mut self, profile: UserProfile) -> Self {
        self.profile = profile;
        self
    }
}

impl From<Login> for User {
    fn from(login: Login) -> Self {
        Self::new(login)
    }
}

/// Partial user for updates; only set fields are sent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialUser {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_type: Option<AuthType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_password: Option<String>,
    #[serde(flatten)]
    pub profile: UserProfile,
}

/// User as returned by the service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(default)]
    pub auth_type: Option<AuthType>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(flatten)]
    pub profile: UserProfile,
}

/// `data` payload of the get-user endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserData {
    pub user: UserRecord,
}
