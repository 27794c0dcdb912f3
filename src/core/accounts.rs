// User accounts: registration and lookup
//
// Emails are stored trimmed and lower-cased so lookups match regardless of
// how the address was typed.

use crate::db::{Database, NewUser, User};
use crate::error::{LightbnbError, Result};
use regex::Regex;
use std::sync::Arc;

const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";

pub struct Accounts {
    db: Arc<Database>,
    email_regex: Regex,
}

impl Accounts {
    pub fn new(db: Arc<Database>) -> Result<Self> {
        let email_regex =
            Regex::new(EMAIL_PATTERN).map_err(|e| LightbnbError::Generic(e.to_string()))?;

        Ok(Self { db, email_regex })
    }

    /// Create an account. `password` should already be hashed.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<User> {
        let name = name.trim();
        let email = normalize_email(email);

        if name.is_empty() {
            return Err(LightbnbError::invalid("name is required"));
        }
        if !self.email_regex.is_match(&email) {
            return Err(LightbnbError::invalid(format!("'{}' is not an email address", email)));
        }
        if password.is_empty() {
            return Err(LightbnbError::invalid("password is required"));
        }

        if self.db.get_user_with_email(&email).await?.is_some() {
            return Err(LightbnbError::DuplicateEmail(email));
        }

        // The check above can lose a race; the UNIQUE constraint is the backstop
        let email_for_err = email.clone();
        let user = self
            .db
            .add_user(NewUser {
                name: name.to_string(),
                email,
                password: password.to_string(),
            })
            .await
            .map_err(|e| duplicate_email_or(e, &email_for_err))
            .inspect_err(|e| tracing::warn!(error = %e, "failed to add user"))?;

        tracing::info!(user_id = user.id, "registered user");
        Ok(user)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        self.db
            .get_user_with_email(&normalize_email(email))
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "user lookup by email failed"))
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        self.db
            .get_user_with_id(id)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, user_id = id, "user lookup by id failed"))
    }
}

fn duplicate_email_or(err: LightbnbError, email: &str) -> LightbnbError {
    match err {
        LightbnbError::Database(sqlx::Error::Database(ref db_err)) if db_err.is_unique_violation() => {
            LightbnbError::DuplicateEmail(email.to_string())
        }
        other => other,
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
