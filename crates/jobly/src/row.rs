//! Row mapping traits and utilities

use crate::error::Result;
use tokio_postgres::Row;

/// Trait for converting a database row into a Rust struct.
///
/// # Example
///
/// ```ignore
/// use jobly::{FromRow, Result, RowExt};
///
/// struct User {
///     username: String,
///     email: Option<String>,
/// }
///
/// impl FromRow for User {
///     fn from_row(row: &tokio_postgres::Row) -> Result<Self> {
///         Ok(Self {
///             username: row.try_get_column("username")?,
///             email: row.try_get_column("email")?,
///         })
///     }
/// }
/// ```
pub trait FromRow: Sized {
    /// Convert a database row into Self
    fn from_row(row: &Row) -> Result<Self>;
}

/// Extension trait for Row to provide typed access
pub trait RowExt {
    /// Try to get a column value, returning Error::Decode on failure
    fn try_get_column<T>(&self, column: &str) -> Result<T>
    where
        T: for<'a> tokio_postgres::types::FromSql<'a>;
}

impl RowExt for Row {
    fn try_get_column<T>(&self, column: &str) -> Result<T>
    where
        T: for<'a> tokio_postgres::types::FromSql<'a>,
    {
        self.try_get(column)
            .map_err(|e| crate::error::Error::decode(column, e.to_string()))
    }
}
