#![deny(missing_docs)]

//! # Reference Utilities
//!
//! Helpers for mapping `$ref` strings onto JSON Pointers within the current document.
//!
//! These never fetch external documents. Absolute or relative references are
//! treated as local when their document part matches the root `$self` URI.

use percent_encoding::percent_decode_str;
use serde_json::Value;
use std::path::Path;
use url::Url;

/// Normalizes a `$ref` to a local JSON Pointer (e.g. `#/components/...`) if it targets the
/// current document as identified by `$self`.
///
/// Returns `None` if the reference is external or lacks a fragment.
pub(crate) fn normalize_ref_to_local(ref_str: &str, self_uri: Option<&str>) -> Option<String> {
    let (document, fragment) = match ref_str.split_once('#') {
        Some((document, fragment)) => (document, Some(fragment)),
        None => (ref_str, None),
    };

    if document.is_empty() {
        return Some(format!("#{}", fragment.unwrap_or_default()));
    }

    let fragment = fragment?;
    let self_uri = self_uri?;
    if ref_doc_matches_self(document, self_uri) {
        return Some(format!("#{}", fragment));
    }
    None
}

/// Looks up a local reference (`#/a/b`) in `root`.
///
/// Segments are JSON Pointer and percent decoded; array segments must be indices.
pub(crate) fn resolve_local_pointer<'a>(root: &'a Value, local_ref: &str) -> Option<&'a Value> {
    let pointer = local_ref.strip_prefix('#').unwrap_or(local_ref);
    if pointer.is_empty() {
        return Some(root);
    }
    let pointer = pointer.strip_prefix('/')?;

    pointer.split('/').try_fold(root, |node, raw_segment| {
        let segment = decode_pointer_segment(raw_segment);
        match node {
            Value::Object(map) => map.get(&segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        }
    })
}

/// Decodes a JSON Pointer segment (handles `~1` and `~0`).
pub(crate) fn decode_pointer_segment(segment: &str) -> String {
    let decoded = segment.replace("~1", "/").replace("~0", "~");
    percent_decode_str(&decoded)
        .decode_utf8_lossy()
        .into_owned()
}

fn ref_doc_matches_self(ref_doc: &str, self_uri: &str) -> bool {
    if ref_doc == self_uri {
        return true;
    }

    if let (Ok(ref_url), Ok(self_url)) = (Url::parse(ref_doc), Url::parse(self_uri)) {
        return ref_url.scheme() == self_url.scheme()
            && ref_url.host() == self_url.host()
            && ref_url.port() == self_url.port()
            && ref_url.path() == self_url.path();
    }

    // If `$self` is an absolute-path reference (e.g. "/api/openapi"), compare path.
    if self_uri.starts_with('/') {
        if let Ok(ref_url) = Url::parse(ref_doc) {
            return ref_url.path() == self_uri;
        }
    }

    // Fallback: compare raw relative paths.
    if !self_uri.contains("://") && !ref_doc.contains("://") {
        return Path::new(ref_doc) == Path::new(self_uri);
    }

    false
}
