//! Database models for the three record types.
//!
//! Model methods take any [`GenericClient`](crate::GenericClient), so they
//! work with a direct connection, a pooled client, or a transaction.

mod company;
mod job;
mod user;

pub use company::{Company, CompanyUpdate, NewCompany};
pub use job::{Job, JobListing, JobUpdate, NewJob};
pub use user::{User, UserUpdate};
