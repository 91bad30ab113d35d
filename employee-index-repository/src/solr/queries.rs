//! Solr query builders.
//!
//! This module turns a `SearchQuery` into the parameters of a Solr `select`
//! request, and builds the bodies of update requests.

use serde_json::{json, Value};

use employee_index_shared::{QueryFilter, SearchQuery};

/// Lucene query syntax characters that must be escaped in a bare term.
const SPECIAL_CHARS: &[char] = &[
    '+', '-', '&', '|', '!', '(', ')', '{', '}', '[', ']', '^', '"', '~', '*', '?', ':', '\\',
    '/',
];

/// Render a filter as a Solr `q` parameter.
///
/// - `All` becomes `*:*`
/// - `FieldEquals` becomes `field:"value"`, an exact phrase match
pub(crate) fn build_query_string(filter: &QueryFilter) -> String {
    match filter {
        QueryFilter::All => "*:*".to_string(),
        QueryFilter::FieldEquals { field, value } => {
            format!("{}:{}", escape_field(field), quote_value(value))
        }
    }
}

/// Escape a field name so it can be used on the left of `:`.
pub(crate) fn escape_field(field: &str) -> String {
    let mut escaped = String::with_capacity(field.len());
    for c in field.chars() {
        if SPECIAL_CHARS.contains(&c) || c.is_whitespace() {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Quote a value as a phrase. Only `\` and `"` need escaping inside quotes.
pub(crate) fn quote_value(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        if c == '"' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

/// Build the query parameters for a `select` request.
pub(crate) fn build_select_params(query: &SearchQuery) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("q", build_query_string(&query.filter)),
        ("wt", "json".to_string()),
        ("start", query.start.to_string()),
        ("rows", query.rows.to_string()),
    ];

    if query.has_facets() {
        params.push(("facet", "true".to_string()));
        for field in &query.facet_fields {
            params.push(("facet.field", field.clone()));
        }
        // Only values that occur, and all of them
        params.push(("facet.mincount", "1".to_string()));
        params.push(("facet.limit", "-1".to_string()));
    }

    params
}

/// Build the query parameters for an `update` request.
pub(crate) fn build_update_params(commit: bool) -> Vec<(&'static str, String)> {
    let mut params = vec![("wt", "json".to_string())];
    if commit {
        params.push(("commit", "true".to_string()));
    }
    params
}

/// Build a delete-by-id update body.
pub(crate) fn build_delete_body(id: &str) -> Value {
    json!({ "delete": { "id": id } })
}
