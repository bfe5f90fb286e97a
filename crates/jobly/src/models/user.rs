//! User model.
//!
//! Registration, password hashing, and token issuance live in the route
//! layer's collaborators; this model only covers the stored account fields.

use crate::client::GenericClient;
use crate::error::{Error, Result};
use crate::row::{FromRow, RowExt};
use crate::sql::{ColumnMap, UpdateFields, build_update_assignment};
use serde::{Deserialize, Serialize};
use tokio_postgres::Row;

const USER_COLS: &str = "username, first_name AS \"firstName\", \
     last_name AS \"lastName\", email, is_admin AS \"isAdmin\"";

/// A user account row, in its API-facing shape.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_admin: bool,
}

impl FromRow for User {
    fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            username: row.try_get_column("username")?,
            first_name: row.try_get_column("firstName")?,
            last_name: row.try_get_column("lastName")?,
            email: row.try_get_column("email")?,
            is_admin: row.try_get_column("isAdmin")?,
        })
    }
}

/// A partial user update; `None` fields are left unchanged.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub is_admin: Option<bool>,
}

impl UserUpdate {
    fn into_fields(self) -> UpdateFields {
        UpdateFields::new()
            .set_opt("firstName", self.first_name)
            .set_opt("lastName", self.last_name)
            .set_opt("email", self.email)
            .set_opt("isAdmin", self.is_admin)
    }
}

impl User {
    const COLUMN_MAP: ColumnMap = ColumnMap::new(&[
        ("firstName", "first_name"),
        ("lastName", "last_name"),
        ("isAdmin", "is_admin"),
    ]);

    /// List all users, ordered by username.
    pub async fn find_all(client: &impl GenericClient) -> Result<Vec<User>> {
        let sql = format!("SELECT {USER_COLS} FROM users ORDER BY username");
        let rows = client.query(&sql, &[]).await?;
        rows.iter().map(User::from_row).collect()
    }

    /// Fetch one user by username.
    pub async fn get(client: &impl GenericClient, username: &str) -> Result<User> {
        let sql = format!("SELECT {USER_COLS} FROM users WHERE username = $1");
        let row = client
            .query_opt(&sql, &[&username])
            .await?
            .ok_or_else(|| Error::not_found(format!("No user: {username}")))?;
        User::from_row(&row)
    }

    /// Apply a partial update and return the updated row.
    ///
    /// Fails with [`Error::EmptyUpdate`] when no fields are set and
    /// [`Error::NotFound`] when the username does not exist.
    pub async fn update(
        client: &impl GenericClient,
        username: &str,
        changes: UserUpdate,
    ) -> Result<User> {
        let assignment = build_update_assignment(changes.into_fields(), &Self::COLUMN_MAP)?;
        let sql = format!(
            "UPDATE users SET {} WHERE username = ${} RETURNING {USER_COLS}",
            assignment.set_clause,
            assignment.next_index(),
        );
        tracing::debug!(sql = %sql, username = %username, "updating user");
        let mut params = assignment.params.as_refs();
        params.push(&username);
        let row = client
            .query_opt(&sql, &params)
            .await?
            .ok_or_else(|| Error::not_found(format!("No user: {username}")))?;
        User::from_row(&row)
    }

    /// Delete a user; fails with [`Error::NotFound`] if they don't exist.
    pub async fn remove(client: &impl GenericClient, username: &str) -> Result<()> {
        let row = client
            .query_opt(
                "DELETE FROM users WHERE username = $1 RETURNING username",
                &[&username],
            )
            .await?;
        match row {
            Some(_) => Ok(()),
            None => Err(Error::not_found(format!("No user: {username}"))),
        }
    }
}
