//! Dynamic SQL construction.
//!
//! This is the one place in the backend that shapes SQL at runtime:
//!
//! - [`update`]: partial-update objects become parameterized SET clauses
//!   (`"col"=$1, ...`) with a positionally matched value list.
//! - [`filter`]: optional search criteria become complete SELECT statements
//!   with conditional WHERE/AND joining.
//!
//! Placeholder indices are computed while the statement is built; there is
//! no string replacement, and no caller-supplied value is ever interpolated
//! into SQL text.

mod filter;
mod param;
mod update;

pub use filter::{CompanyFilter, FilterQuery, JobFilter};
pub use param::{Param, ParamList};
pub use update::{Assignment, ColumnMap, UpdateFields, build_update_assignment};
