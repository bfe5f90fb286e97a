//! Partial-update assignment builder.
//!
//! Turns an ordered set of API-facing field/value pairs into the SET clause
//! of a parameterized UPDATE statement. Values are always bound parameters;
//! only column names (resolved through a declared [`ColumnMap`]) land in the
//! SQL text.

use crate::error::{Error, Result};
use crate::sql::param::{Param, ParamList};
use tokio_postgres::types::ToSql;

/// Declared mapping from API-facing field names to storage column names.
///
/// Fields without an entry map to themselves, so only the names that differ
/// (camelCase → snake_case) need declaring.
///
/// # Example
/// ```
/// use jobly::sql::ColumnMap;
///
/// const USER_COLUMNS: ColumnMap = ColumnMap::new(&[
///     ("firstName", "first_name"),
///     ("isAdmin", "is_admin"),
/// ]);
///
/// assert_eq!(USER_COLUMNS.resolve("firstName"), "first_name");
/// assert_eq!(USER_COLUMNS.resolve("email"), "email");
/// ```
#[derive(Clone, Copy, Debug)]
pub struct ColumnMap {
    entries: &'static [(&'static str, &'static str)],
}

impl ColumnMap {
    /// Create a column map from a static table of (field, column) pairs.
    pub const fn new(entries: &'static [(&'static str, &'static str)]) -> Self {
        Self { entries }
    }

    /// A map with no entries; every field resolves to itself.
    pub const fn empty() -> Self {
        Self { entries: &[] }
    }

    /// Resolve an API-facing field name to its storage column name.
    ///
    /// Falls back to the field name unchanged when no mapping exists.
    pub fn resolve<'a>(&self, field: &'a str) -> &'a str {
        self.entries
            .iter()
            .find(|(from, _)| *from == field)
            .map(|(_, to)| *to)
            .unwrap_or(field)
    }
}

/// An ordered partial update: API-facing field names paired with new values.
///
/// Entry order determines placeholder order in the generated SET clause.
#[derive(Clone, Debug, Default)]
pub struct UpdateFields {
    entries: Vec<(String, Param)>,
}

impl UpdateFields {
    /// Create an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field value.
    pub fn set<T: ToSql + Send + Sync + 'static>(mut self, field: &str, value: T) -> Self {
        self.entries.push((field.to_string(), Param::new(value)));
        self
    }

    /// Append a field value if it is Some; None means "leave unchanged".
    pub fn set_opt<T: ToSql + Send + Sync + 'static>(self, field: &str, value: Option<T>) -> Self {
        match value {
            Some(v) => self.set(field, v),
            None => self,
        }
    }

    /// Number of fields set.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no fields are set.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A generated SET clause and its positionally matched parameters.
///
/// The Nth parameter is referenced by the `$N` placeholder, in the same
/// order the fields were set.
#[derive(Clone, Debug)]
pub struct Assignment {
    /// SET clause body, e.g. `"first_name"=$1, "is_admin"=$2`
    pub set_clause: String,
    /// Bound values, one per placeholder
    pub params: ParamList,
}

impl Assignment {
    /// The first placeholder index not used by the SET clause.
    ///
    /// Callers append their row-key condition as `WHERE key = $<next_index>`
    /// and push the key value after [`Assignment::params`].
    pub fn next_index(&self) -> usize {
        self.params.len() + 1
    }
}

/// Build a parameterized SET clause from a partial update.
///
/// Fails with [`Error::EmptyUpdate`] when no fields are set — callers must
/// surface that as a client-input error, not a server fault.
pub fn build_update_assignment(fields: UpdateFields, map: &ColumnMap) -> Result<Assignment> {
    if fields.is_empty() {
        return Err(Error::EmptyUpdate);
    }

    let mut params = ParamList::new();
    let mut parts = Vec::with_capacity(fields.len());
    for (field, value) in fields.entries {
        let idx = params.push_param(value);
        parts.push(format!("\"{}\"=${}", map.resolve(&field), idx));
    }

    Ok(Assignment {
        set_clause: parts.join(", "),
        params,
    })
}
