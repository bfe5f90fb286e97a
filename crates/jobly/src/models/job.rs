//! Job model.

use crate::client::GenericClient;
use crate::error::{Error, Result};
use crate::row::{FromRow, RowExt};
use crate::sql::{ColumnMap, JobFilter, UpdateFields, build_update_assignment};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio_postgres::Row;

/// A job row, in its API-facing shape.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

impl FromRow for Job {
    fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            id: row.try_get_column("id")?,
            title: row.try_get_column("title")?,
            salary: row.try_get_column("salary")?,
            equity: row.try_get_column("equity")?,
            company_handle: row.try_get_column("company_handle")?,
        })
    }
}

/// A job listing entry: the columns the listing and search queries select.
///
/// Listing queries don't carry the row id, so this is a separate, narrower
/// shape than [`Job`].
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobListing {
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

impl FromRow for JobListing {
    fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            title: row.try_get_column("title")?,
            salary: row.try_get_column("salary")?,
            equity: row.try_get_column("equity")?,
            company_handle: row.try_get_column("company_handle")?,
        })
    }
}

/// Data for creating a job.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJob {
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

/// A partial job update; `None` fields are left unchanged.
///
/// The company handle is not updatable.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobUpdate {
    pub title: Option<String>,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
}

impl JobUpdate {
    fn into_fields(self) -> UpdateFields {
        UpdateFields::new()
            .set_opt("title", self.title)
            .set_opt("salary", self.salary)
            .set_opt("equity", self.equity)
    }
}

impl Job {
    // Job fields already match their column names.
    const COLUMN_MAP: ColumnMap = ColumnMap::empty();

    /// Create a job and return the stored row.
    pub async fn create(client: &impl GenericClient, data: NewJob) -> Result<Job> {
        tracing::debug!(title = %data.title, company = %data.company_handle, "creating job");
        let row = client
            .query_one(
                "INSERT INTO jobs (title, salary, equity, company_handle) \
                 VALUES ($1, $2, $3, $4) \
                 RETURNING id, title, salary, equity, company_handle",
                &[&data.title, &data.salary, &data.equity, &data.company_handle],
            )
            .await?;
        Job::from_row(&row)
    }

    /// List all jobs.
    pub async fn find_all(client: &impl GenericClient) -> Result<Vec<JobListing>> {
        let rows = client
            .query("SELECT title, salary, equity, company_handle FROM jobs", &[])
            .await?;
        rows.iter().map(JobListing::from_row).collect()
    }

    /// Fetch one job by id.
    pub async fn get(client: &impl GenericClient, id: i32) -> Result<Job> {
        let row = client
            .query_opt(
                "SELECT id, title, salary, equity, company_handle FROM jobs WHERE id = $1",
                &[&id],
            )
            .await?
            .ok_or_else(|| Error::not_found(format!("No job: {id}")))?;
        Job::from_row(&row)
    }

    /// List the jobs posted by one company.
    pub async fn get_by_company(client: &impl GenericClient, handle: &str) -> Result<Vec<Job>> {
        let rows = client
            .query(
                "SELECT id, title, salary, equity, company_handle FROM jobs \
                 WHERE company_handle = $1",
                &[&handle],
            )
            .await?;
        rows.iter().map(Job::from_row).collect()
    }

    /// List jobs matching the given filter criteria.
    pub async fn search(client: &impl GenericClient, filter: &JobFilter) -> Result<Vec<JobListing>> {
        let query = filter.to_query();
        tracing::debug!(sql = %query.sql, "searching jobs");
        let rows = client.query(&query.sql, &query.params.as_refs()).await?;
        rows.iter().map(JobListing::from_row).collect()
    }

    /// Apply a partial update and return the updated row.
    ///
    /// Fails with [`Error::EmptyUpdate`] when no fields are set and
    /// [`Error::NotFound`] when the id does not exist.
    pub async fn update(client: &impl GenericClient, id: i32, changes: JobUpdate) -> Result<Job> {
        let assignment = build_update_assignment(changes.into_fields(), &Self::COLUMN_MAP)?;
        let sql = format!(
            "UPDATE jobs SET {} WHERE id = ${} \
             RETURNING id, title, salary, equity, company_handle",
            assignment.set_clause,
            assignment.next_index(),
        );
        tracing::debug!(sql = %sql, id, "updating job");
        let mut params = assignment.params.as_refs();
        params.push(&id);
        let row = client
            .query_opt(&sql, &params)
            .await?
            .ok_or_else(|| Error::not_found(format!("No job: {id}")))?;
        Job::from_row(&row)
    }

    /// Delete a job; fails with [`Error::NotFound`] if it doesn't exist.
    pub async fn remove(client: &impl GenericClient, id: i32) -> Result<()> {
        let row = client
            .query_opt("DELETE FROM jobs WHERE id = $1 RETURNING id", &[&id])
            .await?;
        match row {
            Some(_) => Ok(()),
            None => Err(Error::not_found(format!("No job: {id}"))),
        }
    }
}
