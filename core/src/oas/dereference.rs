#![deny(missing_docs)]

//! # Dereferencing
//!
//! Turns a raw document into one where every resolvable `$ref` has been
//! replaced by a copy of its target.
//!
//! [`Dereferencer`] is the seam [`SpecContext`](crate::oas::SpecContext)
//! calls through; [`LocalDereferencer`] is the in-process implementation.

use crate::error::{AppError, AppResult};
use crate::oas::ref_utils::{normalize_ref_to_local, resolve_local_pointer};
use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Output of a [`Dereferencer`].
#[derive(Debug, Clone, PartialEq)]
pub struct Dereferenced {
    /// The fully resolved document.
    pub schema: Value,
}

/// Resolves `$ref` pointers of a raw OpenAPI document.
pub trait Dereferencer {
    /// Returns a resolved copy of `raw`. The input is never modified.
    fn dereference(&self, raw: &Value) -> AppResult<Dereferenced>;
}

/// Inlines references that point into the document itself.
///
/// - `#/...` pointers, and absolute/relative references matching the root `$self`.
/// - Keys next to a `$ref` (e.g. `description`) override the same keys of the target.
/// - A reference met again while it is still being expanded is a cycle; the inner
///   occurrence is left as a `$ref` object.
/// - External and dangling references are left in place with a warning.
/// - A target is expanded once; later references to it reuse that expansion unless
///   it was cut short by a cycle through a reference still open further out.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalDereferencer;

impl Dereferencer for LocalDereferencer {
    fn dereference(&self, raw: &Value) -> AppResult<Dereferenced> {
        if !raw.is_object() {
            return Err(AppError::InvalidDocument(
                "cannot dereference a document whose root is not a mapping".into(),
            ));
        }

        let mut walker = RefWalker::new(raw);
        let schema = walker.walk(raw);

        debug!(
            inlined = walker.inlined,
            reused = walker.reused,
            unresolved = walker.unresolved,
            "dereferenced document"
        );
        Ok(Dereferenced { schema })
    }
}

struct RefWalker<'a> {
    root: &'a Value,
    self_uri: Option<&'a str>,
    /// Local pointers currently being expanded, innermost last.
    in_progress: Vec<String>,
    /// Finished expansions by local pointer.
    expanded: HashMap<String, Value>,
    /// Shallowest `in_progress` depth a cycle was cut at during the current expansion.
    cut_depth: usize,
    inlined: usize,
    reused: usize,
    unresolved: usize,
}

impl<'a> RefWalker<'a> {
    fn new(root: &'a Value) -> Self {
        Self {
            root,
            self_uri: root.get("$self").and_then(Value::as_str),
            in_progress: Vec::new(),
            expanded: HashMap::new(),
            cut_depth: usize::MAX,
            inlined: 0,
            reused: 0,
            unresolved: 0,
        }
    }

    fn walk(&mut self, node: &'a Value) -> Value {
        match node {
            Value::Object(map) => {
                if let Some(Value::String(reference)) = map.get("$ref") {
                    if let Some(resolved) = self.inline(reference, map) {
                        return resolved;
                    }
                    self.unresolved += 1;
                }
                Value::Object(
                    map.iter()
                        .map(|(key, value)| (key.clone(), self.walk(value)))
                        .collect(),
                )
            }
            Value::Array(items) => Value::Array(items.iter().map(|v| self.walk(v)).collect()),
            other => other.clone(),
        }
    }

    fn inline(&mut self, reference: &str, node: &'a Map<String, Value>) -> Option<Value> {
        let Some(local) = normalize_ref_to_local(reference, self.self_uri) else {
            warn!(reference, "external reference left unresolved");
            return None;
        };
        if let Some(depth) = self.in_progress.iter().position(|open| *open == local) {
            debug!(reference, "circular reference left in place");
            self.cut_depth = self.cut_depth.min(depth);
            return None;
        }

        let mut resolved = match self.expanded.get(&local) {
            Some(done) => {
                self.reused += 1;
                done.clone()
            }
            None => {
                let root = self.root;
                let Some(target) = resolve_local_pointer(root, &local) else {
                    warn!(reference, "reference target not found, left unresolved");
                    return None;
                };

                let outer_cut = std::mem::replace(&mut self.cut_depth, usize::MAX);
                let depth = self.in_progress.len();
                self.in_progress.push(local.clone());
                let resolved = self.walk(target);
                self.in_progress.pop();

                // A cut above `depth` points at a reference opened outside this one.
                if self.cut_depth >= depth {
                    self.expanded.insert(local, resolved.clone());
                }
                self.cut_depth = self.cut_depth.min(outer_cut);
                resolved
            }
        };

        if let Value::Object(resolved_map) = &mut resolved {
            for (key, value) in node.iter().filter(|(key, _)| key.as_str() != "$ref") {
                let value = self.walk(value);
                resolved_map.insert(key.clone(), value);
            }
        }

        self.inlined += 1;
        Some(resolved)
    }
}
