//! Company model.

use crate::client::GenericClient;
use crate::error::{Error, Result};
use crate::row::{FromRow, RowExt};
use crate::sql::{ColumnMap, CompanyFilter, UpdateFields, build_update_assignment};
use serde::{Deserialize, Serialize};
use tokio_postgres::Row;

const COMPANY_COLS: &str = "handle, name, description, \
     num_employees AS \"numEmployees\", logo_url AS \"logoUrl\"";

/// A company row, in its API-facing shape.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub handle: String,
    pub name: String,
    pub description: String,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

impl FromRow for Company {
    fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            handle: row.try_get_column("handle")?,
            name: row.try_get_column("name")?,
            description: row.try_get_column("description")?,
            num_employees: row.try_get_column("numEmployees")?,
            logo_url: row.try_get_column("logoUrl")?,
        })
    }
}

/// Data for creating a company.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCompany {
    pub handle: String,
    pub name: String,
    pub description: String,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

/// A partial company update; `None` fields are left unchanged.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

impl CompanyUpdate {
    fn into_fields(self) -> UpdateFields {
        UpdateFields::new()
            .set_opt("name", self.name)
            .set_opt("description", self.description)
            .set_opt("numEmployees", self.num_employees)
            .set_opt("logoUrl", self.logo_url)
    }
}

impl Company {
    const COLUMN_MAP: ColumnMap = ColumnMap::new(&[
        ("numEmployees", "num_employees"),
        ("logoUrl", "logo_url"),
    ]);

    /// Create a company and return the stored row.
    pub async fn create(client: &impl GenericClient, data: NewCompany) -> Result<Company> {
        let sql = format!(
            "INSERT INTO companies (handle, name, description, num_employees, logo_url) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {COMPANY_COLS}"
        );
        tracing::debug!(handle = %data.handle, "creating company");
        let row = client
            .query_one(
                &sql,
                &[
                    &data.handle,
                    &data.name,
                    &data.description,
                    &data.num_employees,
                    &data.logo_url,
                ],
            )
            .await?;
        Company::from_row(&row)
    }

    /// List all companies, ordered by name.
    pub async fn find_all(client: &impl GenericClient) -> Result<Vec<Company>> {
        let sql = format!("SELECT {COMPANY_COLS} FROM companies ORDER BY name");
        let rows = client.query(&sql, &[]).await?;
        rows.iter().map(Company::from_row).collect()
    }

    /// Fetch one company by handle.
    pub async fn get(client: &impl GenericClient, handle: &str) -> Result<Company> {
        let sql = format!("SELECT {COMPANY_COLS} FROM companies WHERE handle = $1");
        let row = client
            .query_opt(&sql, &[&handle])
            .await?
            .ok_or_else(|| Error::not_found(format!("No company: {handle}")))?;
        Company::from_row(&row)
    }

    /// List companies matching the given filter criteria.
    pub async fn search(
        client: &impl GenericClient,
        filter: &CompanyFilter,
    ) -> Result<Vec<Company>> {
        let query = filter.to_query()?;
        tracing::debug!(sql = %query.sql, "searching companies");
        let rows = client.query(&query.sql, &query.params.as_refs()).await?;
        rows.iter().map(Company::from_row).collect()
    }

    /// Apply a partial update and return the updated row.
    ///
    /// Fails with [`Error::EmptyUpdate`] when no fields are set and
    /// [`Error::NotFound`] when the handle does not exist.
    pub async fn update(
        client: &impl GenericClient,
        handle: &str,
        changes: CompanyUpdate,
    ) -> Result<Company> {
        let assignment = build_update_assignment(changes.into_fields(), &Self::COLUMN_MAP)?;
        let sql = format!(
            "UPDATE companies SET {} WHERE handle = ${} RETURNING {COMPANY_COLS}",
            assignment.set_clause,
            assignment.next_index(),
        );
        tracing::debug!(sql = %sql, handle = %handle, "updating company");
        let mut params = assignment.params.as_refs();
        params.push(&handle);
        let row = client
            .query_opt(&sql, &params)
            .await?
            .ok_or_else(|| Error::not_found(format!("No company: {handle}")))?;
        Company::from_row(&row)
    }

    /// Delete a company; fails with [`Error::NotFound`] if it doesn't exist.
    pub async fn remove(client: &impl GenericClient, handle: &str) -> Result<()> {
        let row = client
            .query_opt(
                "DELETE FROM companies WHERE handle = $1 RETURNING handle",
                &[&handle],
            )
            .await?;
        match row {
            Some(_) => Ok(()),
            None => Err(Error::not_found(format!("No company: {handle}"))),
        }
    }
}
