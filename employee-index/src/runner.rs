//! Reporting wrappers around the operations, and the default run sequence.
//!
//! Every step prints its outcome and never fails: errors are logged and
//! replaced by an empty value so the next step still runs.

use tracing::info;

use crate::operations::{EmployeeIndex, IndexSummary};
use crate::report::{format_facets, format_records, report_error, OrLogDefault};
use employee_index_shared::{EmployeeRecord, FacetCounts, DEPARTMENT_FIELD};

/// First collection of the default sequence.
pub const PRESSNAVE_COLLECTION: &str = "Pressnave";

/// Second collection of the default sequence.
pub const COLLECTION_3545: &str = "3545";

/// Employee removed by the default sequence.
pub const DEFAULT_DELETE_ID: &str = "E02003";

pub async fn report_count(index: &EmployeeIndex) -> u64 {
    let count = index
        .get_emp_count()
        .await
        .or_log_default("getting employee count");
    println!(
        "Employee count in {} collection: {}",
        index.collection(),
        count
    );
    count
}

pub async fn report_index(index: &EmployeeIndex, exclude_column: Option<&str>) -> IndexSummary {
    println!("Indexing data into {}...", index.collection());
    match index.index_data(exclude_column).await {
        Ok(summary) => {
            match (&summary.excluded_column, exclude_column) {
                (Some(column), _) => println!(
                    "Data indexed excluding column '{}': {} records, {} rows skipped.",
                    column, summary.indexed, summary.skipped
                ),
                (None, Some(column)) => println!(
                    "Data indexed (column '{}' not present): {} records, {} rows skipped.",
                    column, summary.indexed, summary.skipped
                ),
                (None, None) => println!(
                    "Data indexed: {} records, {} rows skipped.",
                    summary.indexed, summary.skipped
                ),
            }
            summary
        }
        Err(e) => {
            report_error("indexing data", &e);
            IndexSummary::default()
        }
    }
}

pub async fn report_search(index: &EmployeeIndex, field: &str, value: &str) -> Vec<EmployeeRecord> {
    println!(
        "Searching for {} = '{}' in {} collection...",
        field,
        value,
        index.collection()
    );
    let records = index
        .search_by_column(field, value)
        .await
        .or_log_default("searching in collection");
    println!("{}", format_records(&records));
    records
}

/// Returns whether the delete request succeeded.
pub async fn report_delete(index: &EmployeeIndex, id: &str) -> bool {
    println!(
        "Deleting employee with ID '{}' from {} collection...",
        id,
        index.collection()
    );
    match index.del_emp_by_id(id).await {
        Ok(()) => {
            println!("Employee with ID '{}' deleted.", id);
            true
        }
        Err(e) => {
            report_error(&format!("deleting employee with ID '{}'", id), &e);
            false
        }
    }
}

pub async fn report_facet(index: &EmployeeIndex, field: &str) -> FacetCounts {
    println!(
        "Getting {} facets for {} collection...",
        field,
        index.collection()
    );
    let facets = index
        .get_facet(field)
        .await
        .or_log_default("getting facets");
    println!("{}", format_facets(&facets));
    facets
}

/// The default sequence: count, index both collections, count again, delete
/// one employee, run three searches, and print the department facets.
pub async fn run_sequence(pressnave: &EmployeeIndex, other: &EmployeeIndex) {
    info!(
        first = %pressnave.collection(),
        second = %other.collection(),
        "Starting run sequence"
    );

    report_count(pressnave).await;
    report_count(other).await;

    report_index(pressnave, Some("Department")).await;
    report_index(other, Some("Gender")).await;

    report_count(pressnave).await;
    report_count(other).await;

    report_delete(pressnave, DEFAULT_DELETE_ID).await;

    report_search(pressnave, "Department", "IT").await;
    report_search(pressnave, "Gender", "Male").await;
    report_search(other, "Department", "IT").await;

    report_facet(pressnave, DEPARTMENT_FIELD).await;
    report_facet(other, DEPARTMENT_FIELD).await;

    info!("Run sequence complete");
}
