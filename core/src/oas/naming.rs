#![deny(missing_docs)]

//! # Operation Identifiers
//!
//! Gives every operation under `paths` an `operationId` so lookups can reach it.

use crate::oas::methods::HttpMethod;
use serde_json::Value;
use std::collections::HashSet;

/// Derives an operation identifier from the HTTP Method and URL path.
///
/// e.g. `GET /users/{id}` -> `get_users_id`
pub fn derive_operation_id(method: HttpMethod, path: &str) -> String {
    let mut clean_path = String::with_capacity(path.len());
    for c in path.chars() {
        if c.is_ascii_alphanumeric() {
            clean_path.push(c);
        } else if !clean_path.is_empty() && !clean_path.ends_with('_') {
            clean_path.push('_');
        }
    }
    let clean_path = clean_path.trim_end_matches('_');

    if clean_path.is_empty() {
        method.as_str().to_string()
    } else {
        format!("{}_{}", method.as_str(), clean_path)
    }
}

/// Assigns an identifier to every operation that lacks a non-empty `operationId`.
///
/// Existing identifiers are left untouched. A derived identifier that collides
/// with one already in use gets a `_2`, `_3`, ... suffix. Path items that are
/// still `$ref`s are skipped.
///
/// Returns the number of identifiers assigned.
pub fn backfill_operation_ids(doc: &mut Value) -> usize {
    let Some(paths) = doc.get_mut("paths").and_then(Value::as_object_mut) else {
        return 0;
    };

    let mut taken: HashSet<String> = paths
        .iter()
        .filter(|(path, _)| !path.starts_with("x-"))
        .flat_map(|(_, item)| {
            HttpMethod::ALL
                .into_iter()
                .filter_map(move |method| item.get(method.as_str()))
        })
        .filter_map(existing_operation_id)
        .map(str::to_string)
        .collect();

    let mut assigned = 0;
    for (path, item) in paths.iter_mut() {
        if path.starts_with("x-") {
            continue;
        }
        let Some(item) = item.as_object_mut() else {
            continue;
        };
        for method in HttpMethod::ALL {
            let Some(Value::Object(operation)) = item.get_mut(method.as_str()) else {
                continue;
            };
            if operation
                .get("operationId")
                .and_then(Value::as_str)
                .is_some_and(|id| !id.is_empty())
            {
                continue;
            }

            let id = unique_id(derive_operation_id(method, path), &taken);
            taken.insert(id.clone());
            operation.insert("operationId".to_string(), Value::String(id));
            assigned += 1;
        }
    }

    assigned
}

fn existing_operation_id(operation: &Value) -> Option<&str> {
    operation
        .get("operationId")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
}

fn unique_id(base: String, taken: &HashSet<String>) -> String {
    if !taken.contains(&base) {
        return base;
    }
    let mut n = 2;
    loop {
        let candidate = format!("{}_{}", base, n);
        if !taken.contains(&candidate) {
            return candidate;
        }
        n += 1;
    }
}
