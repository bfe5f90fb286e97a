//! End-to-end properties of the dynamic statement builders.
//!
//! Pure tests; no database connection required.

use jobly::sql::{
    ColumnMap, CompanyFilter, JobFilter, UpdateFields, build_update_assignment,
};
use jobly::Error;
use std::collections::HashMap;

fn query_of(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

const USER_COLUMNS: ColumnMap = ColumnMap::new(&[
    ("firstName", "first_name"),
    ("lastName", "last_name"),
    ("isAdmin", "is_admin"),
]);

#[test]
fn assignment_placeholders_match_value_order() {
    let fields = UpdateFields::new()
        .set("firstName", "Ann")
        .set("isAdmin", false);
    let assignment = build_update_assignment(fields, &USER_COLUMNS).unwrap();

    // first_name before is_admin, $1 before $2, two bound values
    assert_eq!(assignment.set_clause, "\"first_name\"=$1, \"is_admin\"=$2");
    assert_eq!(assignment.params.len(), 2);
    assert!(
        assignment.set_clause.find("first_name").unwrap()
            < assignment.set_clause.find("is_admin").unwrap()
    );
}

#[test]
fn assignment_param_count_tracks_field_count() {
    for n in 1usize..6 {
        let mut fields = UpdateFields::new();
        for i in 0..n {
            fields = fields.set(&format!("field{i}"), i as i32);
        }
        let assignment = build_update_assignment(fields, &ColumnMap::empty()).unwrap();
        assert_eq!(assignment.params.len(), n);
        assert_eq!(assignment.next_index(), n + 1);
        for k in 1..=n {
            assert!(assignment.set_clause.contains(&format!("${k}")));
        }
    }
}

#[test]
fn empty_update_always_fails() {
    let err = build_update_assignment(UpdateFields::new(), &USER_COLUMNS).unwrap_err();
    assert!(matches!(err, Error::EmptyUpdate));
    assert!(err.is_client_error());

    let err = build_update_assignment(UpdateFields::new(), &ColumnMap::empty()).unwrap_err();
    assert!(matches!(err, Error::EmptyUpdate));
}

#[test]
fn company_filter_allowlists_raw_params() {
    let filter = CompanyFilter::from_query(&query_of(&[("name", "x"), ("bogus", "y")])).unwrap();
    assert_eq!(filter.name.as_deref(), Some("x"));
    assert_eq!(filter.min_employees, None);
    assert_eq!(filter.max_employees, None);
}

#[test]
fn job_filter_allowlists_raw_params() {
    let filter = JobFilter::from_query(&query_of(&[
        ("title", "engineer"),
        ("minEmployees", "5"), // company key, not a job key
        ("sort", "salary"),
    ]))
    .unwrap();
    assert_eq!(filter.title.as_deref(), Some("engineer"));
    assert_eq!(filter.min_salary, None);
    assert!(!filter.has_equity);
}

#[test]
fn company_range_validation() {
    let equal = CompanyFilter::from_query(&query_of(&[
        ("minEmployees", "10"),
        ("maxEmployees", "10"),
    ]))
    .unwrap();
    assert!(matches!(
        equal.to_query().unwrap_err(),
        Error::InvalidRange { min: 10, max: 10 }
    ));

    let inverted = CompanyFilter::from_query(&query_of(&[
        ("minEmployees", "20"),
        ("maxEmployees", "5"),
    ]))
    .unwrap();
    assert!(matches!(
        inverted.to_query().unwrap_err(),
        Error::InvalidRange { min: 20, max: 5 }
    ));

    let valid = CompanyFilter::from_query(&query_of(&[
        ("minEmployees", "5"),
        ("maxEmployees", "10"),
    ]))
    .unwrap();
    assert!(valid.to_query().is_ok());
}

#[test]
fn company_name_and_min_scenario() {
    let filter = CompanyFilter::from_query(&query_of(&[
        ("name", "bo"),
        ("minEmployees", "5"),
    ]))
    .unwrap();
    let query = filter.to_query().unwrap();
    assert!(
        query
            .sql
            .contains("WHERE name ILIKE $1 AND num_employees > $2")
    );
    assert_eq!(query.params.len(), 2);
}

#[test]
fn job_equity_and_salary_scenario() {
    let filter = JobFilter::from_query(&query_of(&[
        ("hasEquity", "true"),
        ("minSalary", "100000"),
    ]))
    .unwrap();
    let query = filter.to_query();
    assert!(query.sql.contains("WHERE equity > 0 AND salary > $1"));
    assert!(!query.sql.contains("title ILIKE"));
    assert_eq!(query.params.len(), 1);
}

#[test]
fn composers_are_idempotent() {
    let company = CompanyFilter::from_query(&query_of(&[
        ("name", "net"),
        ("minEmployees", "10"),
        ("maxEmployees", "500"),
    ]))
    .unwrap();
    assert_eq!(
        company.to_query().unwrap().sql,
        company.to_query().unwrap().sql
    );

    let job = JobFilter::from_query(&query_of(&[("title", "dev"), ("hasEquity", "1")])).unwrap();
    assert_eq!(job.to_query().sql, job.to_query().sql);
}

#[test]
fn filter_values_never_appear_in_sql_text() {
    let filter = CompanyFilter::from_query(&query_of(&[
        ("name", "'; DROP TABLE companies; --"),
        ("minEmployees", "5"),
    ]))
    .unwrap();
    let query = filter.to_query().unwrap();
    assert!(!query.sql.contains("DROP TABLE"));
    assert_eq!(query.params.len(), 2);
}
