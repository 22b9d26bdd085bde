#![deny(missing_docs)]

//! # Document Model
//!
//! Strongly typed view over a resolved OpenAPI 3.x document.
//!
//! Only the parts read by lookups are typed; everything else is kept as raw
//! JSON in `extensions` so rendering layers can still reach it. Every field the
//! OpenAPI specification marks optional is optional here as well, so validation
//! happens once, when the document is loaded.

use crate::oas::methods::HttpMethod;
use indexmap::IndexMap;
use serde::de::Error as DeError;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use utoipa::openapi::RefOr;

/// Root of a resolved OpenAPI document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpenApiDocument {
    /// OpenAPI version (e.g. "3.1.0").
    /// Numeric YAML scalars such as `3.0` are read as their string form.
    #[serde(
        default,
        deserialize_with = "deserialize_version",
        skip_serializing_if = "Option::is_none"
    )]
    pub openapi: Option<String>,

    /// Metadata about the API.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<Info>,

    /// Declared servers, in document order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub servers: Vec<Server>,

    /// Path items keyed by path template.
    #[serde(default)]
    pub paths: Paths,

    /// Reusable components.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<Components>,

    /// Every other root field (`tags`, `webhooks`, `x-...`, ...).
    #[serde(flatten)]
    pub extensions: IndexMap<String, Value>,
}

/// The Info Object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Info {
    /// API title.
    #[serde(default)]
    pub title: String,
    /// API version (not the OpenAPI version).
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub version: String,
    /// Long form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Remaining fields (`contact`, `license`, `x-...`).
    #[serde(flatten)]
    pub extensions: IndexMap<String, Value>,
}

/// A Server Object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Server {
    /// Server URL, possibly templated with `{variables}`.
    pub url: String,
    /// Human readable description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Substitution variables for the URL template.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub variables: IndexMap<String, ServerVariable>,
    /// Spec extensions and other fields.
    #[serde(flatten)]
    pub extensions: IndexMap<String, Value>,
}

/// A Server Variable Object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerVariable {
    /// Allowed values. Numeric or boolean YAML scalars are read as strings.
    #[serde(
        rename = "enum",
        default,
        deserialize_with = "deserialize_lenient_strings",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub enum_values: Vec<String>,
    /// Default substitution value (e.g. `443` for a port).
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub default: String,
    /// Description of the variable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// The Paths Object: ordered path items plus `x-` extensions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Paths {
    /// Parsed path items keyed by path template, in document order.
    pub items: IndexMap<String, PathItem>,
    /// Spec extensions attached to the Paths Object (x-...).
    pub extensions: IndexMap<String, Value>,
}

impl Paths {
    /// Returns true when no concrete path items are present.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'de> Deserialize<'de> for Paths {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = IndexMap::<String, Value>::deserialize(deserializer)?;
        let mut items = IndexMap::new();
        let mut extensions = IndexMap::new();

        for (key, value) in raw {
            if key.starts_with("x-") {
                extensions.insert(key, value);
                continue;
            }
            let path_item = serde_json::from_value::<PathItem>(value).map_err(|e| {
                DeError::custom(format!("Failed to parse path item '{}': {}", key, e))
            })?;
            items.insert(key, path_item);
        }

        Ok(Self { items, extensions })
    }
}

impl Serialize for Paths {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.items.len() + self.extensions.len()))?;
        for (key, value) in &self.items {
            map.serialize_entry(key, value)?;
        }
        for (key, value) in &self.extensions {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// A Path Item Object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathItem {
    /// A `$ref` the dereferencer could not inline (external or circular).
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Short summary shared by all operations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Description shared by all operations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// GET operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub get: Option<Operation>,
    /// PUT operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub put: Option<Operation>,
    /// POST operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<Operation>,
    /// DELETE operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete: Option<Operation>,
    /// OPTIONS operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Operation>,
    /// HEAD operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head: Option<Operation>,
    /// PATCH operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patch: Option<Operation>,
    /// TRACE operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<Operation>,
    /// Parameters common to every operation of the path.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<RefOr<Parameter>>,
    /// Remaining fields (`servers`, `x-...`).
    #[serde(flatten)]
    pub extensions: IndexMap<String, Value>,
}

impl PathItem {
    /// Returns the operation bound to `method`, if any.
    pub fn operation(&self, method: HttpMethod) -> Option<&Operation> {
        match method {
            HttpMethod::Get => self.get.as_ref(),
            HttpMethod::Post => self.post.as_ref(),
            HttpMethod::Put => self.put.as_ref(),
            HttpMethod::Delete => self.delete.as_ref(),
            HttpMethod::Patch => self.patch.as_ref(),
            HttpMethod::Options => self.options.as_ref(),
            HttpMethod::Head => self.head.as_ref(),
            HttpMethod::Trace => self.trace.as_ref(),
        }
    }

    /// Iterates the declared operations in [`HttpMethod::ALL`] order.
    pub fn operations(&self) -> impl Iterator<Item = (HttpMethod, &Operation)> + '_ {
        HttpMethod::ALL
            .into_iter()
            .filter_map(move |method| self.operation(method).map(|op| (method, op)))
    }
}

/// An Operation Object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// Unique identifier of the operation.
    #[serde(rename = "operationId", skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    /// Short summary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Long form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Tags for grouping.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Whether the operation is deprecated.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub deprecated: bool,
    /// Declared parameters, in document order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<RefOr<Parameter>>,
    /// Request body, kept as raw JSON.
    #[serde(rename = "requestBody", skip_serializing_if = "Option::is_none")]
    pub request_body: Option<Value>,
    /// Responses keyed by status code.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub responses: IndexMap<String, Value>,
    /// Code samples under the `x-codeSamples` extension.
    #[serde(rename = "x-codeSamples", skip_serializing_if = "Option::is_none")]
    pub code_samples: Option<Vec<CodeSample>>,
    /// Code samples under the older `x-code-samples` spelling.
    #[serde(rename = "x-code-samples", skip_serializing_if = "Option::is_none")]
    pub legacy_code_samples: Option<Vec<CodeSample>>,
    /// Remaining fields (`security`, `callbacks`, `x-...`).
    #[serde(flatten)]
    pub extensions: IndexMap<String, Value>,
}

impl Operation {
    /// Returns the code samples, preferring `x-codeSamples` over `x-code-samples`.
    pub fn code_samples(&self) -> &[CodeSample] {
        self.code_samples
            .as_deref()
            .or(self.legacy_code_samples.as_deref())
            .unwrap_or_default()
    }
}

/// Where a parameter is carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterIn {
    /// URL query parameter.
    Query,
    /// The whole query string (OAS 3.2).
    Querystring,
    /// Request header.
    Header,
    /// Templated path segment.
    Path,
    /// Cookie value.
    Cookie,
}

/// A Parameter Object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Parameter location.
    #[serde(rename = "in")]
    pub location: ParameterIn,
    /// Description of the parameter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the parameter is mandatory.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
    /// Whether the parameter is deprecated.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub deprecated: bool,
    /// Schema of the parameter value, kept as raw JSON.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
    /// Example value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
    /// Remaining fields (`style`, `explode`, `examples`, `x-...`).
    #[serde(flatten)]
    pub extensions: IndexMap<String, Value>,
}

/// The Components Object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Components {
    /// Schema definitions, in document order.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub schemas: IndexMap<String, Value>,
    /// Every other component section.
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

/// A single vendor code sample (`x-codeSamples` entry).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeSample {
    /// Language of the sample (e.g. "curl", "JavaScript").
    #[serde(default)]
    pub lang: String,
    /// Optional tab label shown instead of `lang`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Sample source code.
    #[serde(default)]
    pub source: String,
}

fn deserialize_version<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(DeError::custom(format!(
            "expected a version string, found {}",
            other
        ))),
    }
}

fn deserialize_lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    scalar_to_string(value.unwrap_or(Value::Null)).map_err(DeError::custom)
}

fn deserialize_lenient_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .into_iter()
            .map(|item| scalar_to_string(item).map_err(DeError::custom))
            .collect(),
        Some(other) => Err(DeError::custom(format!(
            "expected a list of values, found {}",
            other
        ))),
    }
}

/// Strings pass through, numbers and booleans use their JSON text, `null` is empty.
fn scalar_to_string(value: Value) -> Result<String, String> {
    match value {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(format!("expected a scalar value, found {}", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_paths_split_extensions() {
        let doc: OpenApiDocument = serde_json::from_value(json!({
            "openapi": "3.1.0",
            "paths": {
                "x-owner": "platform",
                "/users": { "get": { "operationId": "listUsers" } }
            }
        }))
        .unwrap();

        assert_eq!(doc.paths.items.len(), 1);
        assert_eq!(doc.paths.extensions.get("x-owner"), Some(&json!("platform")));
        assert!(doc.paths.items["/users"].get.is_some());
    }

    #[test]
    fn test_numeric_versions_become_strings() {
        let doc: OpenApiDocument = serde_json::from_value(json!({
            "openapi": 3.0,
            "info": { "title": "T", "version": 1 }
        }))
        .unwrap();

        assert_eq!(doc.openapi.as_deref(), Some("3.0"));
        assert_eq!(doc.info.unwrap().version, "1");
    }

    #[test]
    fn test_server_variables_accept_non_string_scalars() {
        let doc: OpenApiDocument = serde_json::from_value(json!({
            "openapi": "3.0.3",
            "servers": [{
                "url": "https://api.x.com:{port}/{tls}",
                "variables": {
                    "port": { "default": 443, "enum": [443, 8443] },
                    "tls": { "default": true }
                }
            }]
        }))
        .unwrap();

        let variables = &doc.servers[0].variables;
        assert_eq!(variables["port"].default, "443");
        assert_eq!(variables["port"].enum_values, vec!["443", "8443"]);
        assert_eq!(variables["tls"].default, "true");
    }

    #[test]
    fn test_incomplete_code_samples_are_kept() {
        let op: Operation = serde_json::from_value(json!({
            "operationId": "getUser",
            "x-codeSamples": [{ "lang": "curl", "label": "cURL" }, { "source": "GET /users" }]
        }))
        .unwrap();

        let samples = op.code_samples();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].label.as_deref(), Some("cURL"));
        assert_eq!(samples[0].source, "");
        assert_eq!(samples[1].lang, "");
        assert_eq!(samples[1].source, "GET /users");
    }

    #[test]
    fn test_unresolved_parameter_reference_is_kept() {
        let op: Operation = serde_json::from_value(json!({
            "parameters": [
                { "$ref": "other.yaml#/components/parameters/Limit" },
                { "name": "id", "in": "path", "required": true }
            ]
        }))
        .unwrap();

        assert!(matches!(op.parameters[0], RefOr::Ref(_)));
        match &op.parameters[1] {
            RefOr::T(p) => {
                assert_eq!(p.name, "id");
                assert_eq!(p.location, ParameterIn::Path);
                assert!(p.required);
            }
            RefOr::Ref(_) => panic!("inline parameter parsed as a reference"),
        }
    }

    #[test]
    fn test_code_samples_prefer_camel_case_spelling() {
        let op: Operation = serde_json::from_value(json!({
            "x-codeSamples": [{ "lang": "curl", "source": "curl /a" }],
            "x-code-samples": [{ "lang": "js", "source": "fetch('/a')" }]
        }))
        .unwrap();
        assert_eq!(op.code_samples()[0].lang, "curl");

        let legacy: Operation = serde_json::from_value(json!({
            "x-code-samples": [{ "lang": "js", "label": "Node", "source": "fetch('/a')" }]
        }))
        .unwrap();
        assert_eq!(legacy.code_samples()[0].label.as_deref(), Some("Node"));

        assert!(Operation::default().code_samples().is_empty());
    }

    #[test]
    fn test_unknown_fields_land_in_extensions() {
        let op: Operation = serde_json::from_value(json!({
            "operationId": "a",
            "security": [],
            "x-internal": true
        }))
        .unwrap();
        assert_eq!(op.extensions.get("x-internal"), Some(&json!(true)));
        assert!(op.extensions.contains_key("security"));
        assert!(!op.extensions.contains_key("operationId"));
    }

    #[test]
    fn test_path_item_operations_follow_method_order() {
        let item: PathItem = serde_json::from_value(json!({
            "delete": { "operationId": "d" },
            "get": { "operationId": "g" },
            "post": { "operationId": "p" }
        }))
        .unwrap();

        let order: Vec<HttpMethod> = item.operations().map(|(m, _)| m).collect();
        assert_eq!(
            order,
            vec![HttpMethod::Get, HttpMethod::Post, HttpMethod::Delete]
        );
    }
}
