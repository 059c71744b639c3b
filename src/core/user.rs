//! User business logic - Accounts holding membership numbers.
//!
//! Nothing in the search flow reads users yet; these operations keep the table
//! usable until authentication lands.

use crate::{
    entities::{
        User,
        user::{self, Memberships, Preferences},
    },
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{Set, prelude::*};
use tracing::info;

/// Creates a user. Emails are trimmed and lowercased and must be unique.
pub async fn create_user<C>(
    db: &C,
    email: &str,
    memberships: Memberships,
    preferences: Preferences,
) -> Result<user::Model>
where
    C: ConnectionTrait,
{
    let email = email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(Error::validation(format!("Invalid email address '{email}'")));
    }
    if get_user_by_email(db, &email).await?.is_some() {
        return Err(Error::validation(format!("Email '{email}' is already registered")));
    }

    let now = Utc::now();
    let user = user::ActiveModel {
        id: Set(uuid::Uuid::new_v4().to_string()),
        email: Set(email),
        memberships: Set(memberships),
        preferences: Set(preferences),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let created = user.insert(db).await?;
    info!("Created user {}", created.id);
    Ok(created)
}

/// Finds a user by email (case-insensitive).
pub async fn get_user_by_email<C>(db: &C, email: &str) -> Result<Option<user::Model>>
where
    C: ConnectionTrait,
{
    User::find()
        .filter(user::Column::Email.eq(email.trim().to_lowercase()))
        .one(db)
        .await
        .map_err(Into::into)
}
