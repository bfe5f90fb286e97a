//! Listing filter composition.
//!
//! Raw query-string parameters are allow-listed into a typed filter struct
//! per entity kind, then composed into a complete SELECT with conditional
//! WHERE/AND joining. Unlike the source this layer replaced, filter values
//! are bound `$n` parameters, never interpolated into the SQL text.

use crate::error::{Error, Result};
use crate::sql::param::ParamList;
use serde::Deserialize;
use std::collections::HashMap;

/// A composed listing query: full SELECT text plus its bound values.
#[derive(Clone, Debug)]
pub struct FilterQuery {
    /// Complete SELECT statement with `$n` placeholders
    pub sql: String,
    /// Bound values, one per placeholder
    pub params: ParamList,
}

const COMPANY_SELECT: &str = "SELECT handle, name, description, \
     num_employees AS \"numEmployees\", logo_url AS \"logoUrl\" FROM companies";

const JOB_SELECT: &str = "SELECT title, salary, equity, company_handle FROM jobs";

/// Append the next predicate, introducing it with WHERE the first time
/// and AND after that.
fn push_connector(sql: &mut String, has_where: &mut bool) {
    sql.push_str(if *has_where { " AND " } else { " WHERE " });
    *has_where = true;
}

fn parse_int(key: &str, raw: &str) -> Result<i32> {
    raw.trim()
        .parse()
        .map_err(|_| Error::validation(format!("{key} must be an integer, got '{raw}'")))
}

fn parse_bool(key: &str, raw: &str) -> Result<bool> {
    let v = raw.trim();
    if v.eq_ignore_ascii_case("true") || v == "1" {
        Ok(true)
    } else if v.eq_ignore_ascii_case("false") || v == "0" {
        Ok(false)
    } else {
        Err(Error::validation(format!(
            "{key} must be a boolean, got '{raw}'"
        )))
    }
}

/// Search constraints for company listings.
///
/// Every field is optional; an all-`None` filter composes the unfiltered
/// listing query.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyFilter {
    /// Case-insensitive substring match on company name
    pub name: Option<String>,
    /// Exclusive lower bound on employee count
    pub min_employees: Option<i32>,
    /// Exclusive upper bound on employee count
    pub max_employees: Option<i32>,
}

impl CompanyFilter {
    /// Build a filter from raw query-string parameters.
    ///
    /// Only `name`, `minEmployees`, and `maxEmployees` are recognized;
    /// every other key is dropped silently. Numeric values that fail to
    /// parse are a [`Error::Validation`] failure.
    pub fn from_query(params: &HashMap<String, String>) -> Result<Self> {
        let mut filter = Self::default();
        if let Some(name) = params.get("name") {
            filter.name = Some(name.clone());
        }
        if let Some(raw) = params.get("minEmployees") {
            filter.min_employees = Some(parse_int("minEmployees", raw)?);
        }
        if let Some(raw) = params.get("maxEmployees") {
            filter.max_employees = Some(parse_int("maxEmployees", raw)?);
        }
        Ok(filter)
    }

    /// Compose the company listing SELECT.
    ///
    /// Fails with [`Error::InvalidRange`] when both employee bounds are
    /// present and `min >= max`. Both bounds are exclusive.
    pub fn to_query(&self) -> Result<FilterQuery> {
        let mut sql = String::from(COMPANY_SELECT);
        let mut params = ParamList::new();
        let mut has_where = false;

        if let Some(name) = &self.name {
            let idx = params.push(format!("%{name}%"));
            push_connector(&mut sql, &mut has_where);
            sql.push_str(&format!("name ILIKE ${idx}"));
        }

        match (self.min_employees, self.max_employees) {
            (Some(min), Some(max)) => {
                if min >= max {
                    return Err(Error::InvalidRange { min, max });
                }
                let lo = params.push(min);
                let hi = params.push(max);
                push_connector(&mut sql, &mut has_where);
                sql.push_str(&format!(
                    "num_employees > ${lo} AND num_employees < ${hi}"
                ));
            }
            (Some(min), None) => {
                let lo = params.push(min);
                push_connector(&mut sql, &mut has_where);
                sql.push_str(&format!("num_employees > ${lo}"));
            }
            (None, Some(max)) => {
                let hi = params.push(max);
                push_connector(&mut sql, &mut has_where);
                sql.push_str(&format!("num_employees < ${hi}"));
            }
            (None, None) => {}
        }

        Ok(FilterQuery { sql, params })
    }
}

/// Search constraints for job listings.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobFilter {
    /// Case-insensitive substring match on job title
    pub title: Option<String>,
    /// Exclusive lower bound on salary
    pub min_salary: Option<i32>,
    /// Restrict to jobs with a non-zero equity share
    #[serde(default)]
    pub has_equity: bool,
}

impl JobFilter {
    /// Build a filter from raw query-string parameters.
    ///
    /// Only `title`, `minSalary`, and `hasEquity` are recognized; every
    /// other key is dropped silently.
    pub fn from_query(params: &HashMap<String, String>) -> Result<Self> {
        let mut filter = Self::default();
        if let Some(title) = params.get("title") {
            filter.title = Some(title.clone());
        }
        if let Some(raw) = params.get("minSalary") {
            filter.min_salary = Some(parse_int("minSalary", raw)?);
        }
        if let Some(raw) = params.get("hasEquity") {
            filter.has_equity = parse_bool("hasEquity", raw)?;
        }
        Ok(filter)
    }

    /// Compose the job listing SELECT.
    ///
    /// Unlike the company composer this has no failure path: the only
    /// numeric constraint is a single lower bound.
    pub fn to_query(&self) -> FilterQuery {
        let mut sql = String::from(JOB_SELECT);
        let mut params = ParamList::new();
        let mut has_where = false;

        if let Some(title) = &self.title {
            let idx = params.push(format!("%{title}%"));
            push_connector(&mut sql, &mut has_where);
            sql.push_str(&format!("title ILIKE ${idx}"));
        }

        match (self.has_equity, self.min_salary) {
            (true, Some(min)) => {
                let idx = params.push(min);
                push_connector(&mut sql, &mut has_where);
                sql.push_str(&format!("equity > 0 AND salary > ${idx}"));
            }
            (false, Some(min)) => {
                let idx = params.push(min);
                push_connector(&mut sql, &mut has_where);
                sql.push_str(&format!("salary > ${idx}"));
            }
            (true, None) => {
                push_connector(&mut sql, &mut has_where);
                sql.push_str("equity > 0");
            }
            (false, None) => {}
        }

        FilterQuery { sql, params }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query_of(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn company_unknown_keys_are_dropped() {
        let filter =
            CompanyFilter::from_query(&query_of(&[("name", "x"), ("bogus", "y")])).unwrap();
        assert_eq!(filter.name.as_deref(), Some("x"));
        assert_eq!(filter.min_employees, None);
        assert_eq!(filter.max_employees, None);
    }

    #[test]
    fn company_numeric_parse_failure_is_validation() {
        let err = CompanyFilter::from_query(&query_of(&[("minEmployees", "lots")])).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(err.is_client_error());
    }

    #[test]
    fn company_no_criteria_selects_all() {
        let query = CompanyFilter::default().to_query().unwrap();
        assert_eq!(
            query.sql,
            "SELECT handle, name, description, num_employees AS \"numEmployees\", \
             logo_url AS \"logoUrl\" FROM companies"
        );
        assert!(query.params.is_empty());
    }

    #[test]
    fn company_name_and_min() {
        let filter = CompanyFilter {
            name: Some("bo".to_string()),
            min_employees: Some(5),
            max_employees: None,
        };
        let query = filter.to_query().unwrap();
        assert!(
            query
                .sql
                .ends_with("WHERE name ILIKE $1 AND num_employees > $2")
        );
        assert_eq!(query.params.len(), 2);
    }

    #[test]
    fn company_range_only_starts_with_where() {
        let filter = CompanyFilter {
            name: None,
            min_employees: Some(5),
            max_employees: Some(10),
        };
        let query = filter.to_query().unwrap();
        assert!(
            query
                .sql
                .ends_with("WHERE num_employees > $1 AND num_employees < $2")
        );
    }

    #[test]
    fn company_max_only() {
        let filter = CompanyFilter {
            name: None,
            min_employees: None,
            max_employees: Some(50),
        };
        let query = filter.to_query().unwrap();
        assert!(query.sql.ends_with("WHERE num_employees < $1"));
        assert_eq!(query.params.len(), 1);
    }

    #[test]
    fn company_equal_bounds_are_invalid() {
        let filter = CompanyFilter {
            name: None,
            min_employees: Some(10),
            max_employees: Some(10),
        };
        assert!(matches!(
            filter.to_query().unwrap_err(),
            Error::InvalidRange { min: 10, max: 10 }
        ));
    }

    #[test]
    fn company_inverted_bounds_are_invalid() {
        let filter = CompanyFilter {
            name: None,
            min_employees: Some(20),
            max_employees: Some(5),
        };
        assert!(matches!(
            filter.to_query().unwrap_err(),
            Error::InvalidRange { min: 20, max: 5 }
        ));
    }

    #[test]
    fn company_valid_range_succeeds() {
        let filter = CompanyFilter {
            name: None,
            min_employees: Some(5),
            max_employees: Some(10),
        };
        assert!(filter.to_query().is_ok());
    }

    #[test]
    fn job_equity_and_salary_without_title() {
        let filter = JobFilter {
            title: None,
            min_salary: Some(100_000),
            has_equity: true,
        };
        let query = filter.to_query();
        assert!(query.sql.ends_with("WHERE equity > 0 AND salary > $1"));
        assert!(!query.sql.contains("title"));
        assert_eq!(query.params.len(), 1);
    }

    #[test]
    fn job_title_then_salary() {
        let filter = JobFilter {
            title: Some("engineer".to_string()),
            min_salary: Some(50_000),
            has_equity: false,
        };
        let query = filter.to_query();
        assert!(query.sql.ends_with("WHERE title ILIKE $1 AND salary > $2"));
    }

    #[test]
    fn job_equity_only() {
        let filter = JobFilter {
            title: None,
            min_salary: None,
            has_equity: true,
        };
        let query = filter.to_query();
        assert!(query.sql.ends_with("WHERE equity > 0"));
        assert!(query.params.is_empty());
    }

    #[test]
    fn job_no_criteria_selects_all() {
        let query = JobFilter::default().to_query();
        assert_eq!(
            query.sql,
            "SELECT title, salary, equity, company_handle FROM jobs"
        );
    }

    #[test]
    fn job_has_equity_parsing() {
        let t = JobFilter::from_query(&query_of(&[("hasEquity", "true")])).unwrap();
        assert!(t.has_equity);
        let f = JobFilter::from_query(&query_of(&[("hasEquity", "0")])).unwrap();
        assert!(!f.has_equity);
        assert!(JobFilter::from_query(&query_of(&[("hasEquity", "maybe")])).is_err());
    }

    #[test]
    fn composition_is_deterministic() {
        let filter = CompanyFilter {
            name: Some("net".to_string()),
            min_employees: Some(10),
            max_employees: Some(500),
        };
        let a = filter.to_query().unwrap();
        let b = filter.to_query().unwrap();
        assert_eq!(a.sql, b.sql);
    }
}
