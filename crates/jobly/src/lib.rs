//! # jobly
//!
//! Data layer for the jobly job-board backend: dynamic SQL construction plus
//! the PostgreSQL models for companies, jobs, and user accounts.
//!
//! ## Features
//!
//! - **Parameterized everywhere**: update values and filter values are bound
//!   `$n` parameters; SQL text only ever contains declared column names
//! - **Partial updates**: an optional-field struct per record type lowers
//!   into a parameterized SET clause (see [`sql::build_update_assignment`])
//! - **Typed filters**: raw query-string criteria are allow-listed into
//!   [`sql::CompanyFilter`] / [`sql::JobFilter`] and composed into complete
//!   SELECT statements with conditional WHERE/AND joining
//! - **Transaction-friendly**: pass a transaction anywhere a
//!   [`GenericClient`] is expected
//!
//! ## Usage
//!
//! ```ignore
//! use jobly::models::{Company, CompanyUpdate};
//! use jobly::sql::CompanyFilter;
//!
//! let pool = jobly::create_pool("postgres://localhost/jobly")?;
//! let client = pool.get().await?;
//!
//! // Conditional search
//! let filter = CompanyFilter::from_query(&query_params)?;
//! let companies = Company::search(&client, &filter).await?;
//!
//! // Partial update
//! let changes = CompanyUpdate {
//!     num_employees: Some(250),
//!     ..Default::default()
//! };
//! let company = Company::update(&client, "acme", changes).await?;
//! ```

pub mod client;
pub mod error;
pub mod models;
pub mod row;
pub mod sql;

pub use client::GenericClient;
pub use error::{Error, Result};
pub use row::{FromRow, RowExt};
pub use sql::{
    Assignment, ColumnMap, CompanyFilter, FilterQuery, JobFilter, Param, ParamList, UpdateFields,
    build_update_assignment,
};

#[cfg(feature = "pool")]
pub mod pool;

#[cfg(feature = "pool")]
pub use pool::{create_pool, create_pool_with_config};
