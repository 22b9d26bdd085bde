use oas_docs_core::{AppError, HttpMethod, ParameterIn, SpecContext};
use pretty_assertions::assert_eq;
use serde_json::json;
use utoipa::openapi::RefOr;

const USERS_YAML: &str = r#"
openapi: 3.1.0
info:
  title: Users
  version: 1.0.0
servers:
  - url: https://api.x.com
    description: Production
paths:
  /users:
    get:
      summary: List users
      responses:
        '200':
          description: OK
  /users/{id}:
    get:
      operationId: getUser
      parameters:
        - $ref: '#/components/parameters/UserId'
        - name: expand
          in: query
          schema:
            type: string
      responses:
        '200':
          description: OK
          content:
            application/json:
              schema:
                $ref: '#/components/schemas/User'
      x-codeSamples:
        - lang: curl
          label: cURL
          source: curl https://api.x.com/users/42
components:
  parameters:
    UserId:
      name: id
      in: path
      required: true
      schema:
        type: string
  schemas:
    User:
      type: object
      properties:
        id:
          type: string
"#;

fn users_context() -> SpecContext {
    let mut ctx = SpecContext::new();
    ctx.set_specification_str(USERS_YAML).unwrap();
    ctx
}

#[test]
fn finds_operation_method_and_path() {
    let ctx = users_context();

    let op = ctx.find_operation("getUser").unwrap();
    assert_eq!(op.operation_id.as_deref(), Some("getUser"));
    assert_eq!(ctx.find_operation_method("getUser"), Some(HttpMethod::Get));
    assert_eq!(
        ctx.find_operation_method("getUser").map(|m| m.to_string()),
        Some("get".to_string())
    );
    assert_eq!(ctx.find_operation_path("getUser"), Some("/users/{id}"));
}

#[test]
fn parameters_are_dereferenced() {
    let ctx = users_context();
    let params = ctx.find_operation_parameters("getUser");
    assert_eq!(params.len(), 2);

    let RefOr::T(id) = &params[0] else {
        panic!("parameter reference was not resolved");
    };
    assert_eq!(id.name, "id");
    assert_eq!(id.location, ParameterIn::Path);
    assert!(id.required);
    assert_eq!(id.schema, Some(json!({ "type": "string" })));
}

#[test]
fn response_schemas_are_dereferenced() {
    let ctx = users_context();
    let op = ctx.find_operation("getUser").unwrap();
    assert_eq!(
        op.responses["200"]["content"]["application/json"]["schema"],
        json!({ "type": "object", "properties": { "id": { "type": "string" } } })
    );
}

#[test]
fn unknown_operation_is_absent_everywhere() {
    let ctx = users_context();
    assert!(ctx.find_operation("deleteUser").is_none());
    assert!(ctx.find_operation_method("deleteUser").is_none());
    assert!(ctx.find_operation_path("deleteUser").is_none());
    assert!(ctx.find_operation_parameters("deleteUser").is_empty());
    assert!(ctx.find_operation_code_samples("deleteUser").is_empty());
}

#[test]
fn operations_without_id_are_backfilled() {
    let ctx = users_context();
    assert_eq!(ctx.find_operation_path("get_users"), Some("/users"));
    assert_eq!(
        ctx.raw_spec()["paths"]["/users"]["get"]["operationId"],
        json!("get_users")
    );
}

#[test]
fn base_url_and_schemas() {
    let ctx = users_context();
    assert_eq!(ctx.base_url(), "https://api.x.com");
    assert!(ctx.schemas().contains_key("User"));

    let bare = SpecContext::from_specification(json!({ "openapi": "3.0.0", "paths": {} })).unwrap();
    assert_eq!(bare.base_url(), "");
    assert!(bare.schemas().is_empty());

    let empty_servers =
        SpecContext::from_specification(json!({ "openapi": "3.0.0", "servers": [] })).unwrap();
    assert_eq!(empty_servers.base_url(), "");
}

#[test]
fn code_samples_under_either_spelling() {
    let ctx = users_context();
    let samples = ctx.find_operation_code_samples("getUser");
    assert_eq!(samples.len(), 1);
    assert_eq!(samples[0].lang, "curl");
    assert_eq!(samples[0].label.as_deref(), Some("cURL"));

    let ctx = SpecContext::from_specification(json!({
        "openapi": "3.0.0",
        "paths": {
            "/legacy": {
                "get": {
                    "operationId": "legacy",
                    "x-code-samples": [{ "lang": "python", "source": "requests.get('/legacy')" }]
                }
            },
            "/both": {
                "get": {
                    "operationId": "both",
                    "x-codeSamples": [{ "lang": "go", "source": "http.Get(\"/both\")" }],
                    "x-code-samples": [{ "lang": "ruby", "source": "Net::HTTP.get('/both')" }]
                }
            }
        }
    }))
    .unwrap();

    assert_eq!(ctx.find_operation_code_samples("legacy")[0].lang, "python");
    let both = ctx.find_operation_code_samples("both");
    assert_eq!(both.len(), 1);
    assert_eq!(both[0].lang, "go");
}

#[test]
fn unsupported_version_leaves_state_unchanged() {
    let mut ctx = users_context();
    let raw_before = ctx.raw_spec().clone();

    let err = ctx
        .set_specification(json!({
            "openapi": "2.0",
            "servers": [{ "url": "https://other.x.com" }],
            "paths": { "/other": { "get": { "operationId": "other" } } }
        }))
        .unwrap_err();

    assert!(matches!(err, AppError::UnsupportedVersion(ref v) if v == "2.0"));
    assert_eq!(ctx.raw_spec(), &raw_before);
    assert_eq!(ctx.base_url(), "https://api.x.com");
    assert!(ctx.find_operation("other").is_none());
    assert!(ctx.find_operation("getUser").is_some());
}

#[test]
fn missing_version_still_loads() {
    let ctx = SpecContext::from_specification(json!({
        "servers": [{ "url": "https://noversion.x.com" }],
        "paths": { "/ping": { "get": { "operationId": "ping" } } }
    }))
    .unwrap();

    assert_eq!(ctx.resolved().openapi, None);
    assert_eq!(ctx.base_url(), "https://noversion.x.com");
    assert_eq!(ctx.find_operation_path("ping"), Some("/ping"));
}

#[test]
fn independent_contexts_do_not_share_state() {
    let users = users_context();
    let other = SpecContext::from_specification(json!({
        "openapi": "3.1.0",
        "servers": [{ "url": "https://other.x.com" }]
    }))
    .unwrap();

    assert_eq!(users.base_url(), "https://api.x.com");
    assert_eq!(other.base_url(), "https://other.x.com");
    assert!(other.find_operation("getUser").is_none());
}

#[test]
fn loose_server_variables_and_samples_do_not_block_lookups() {
    let mut ctx = SpecContext::new();
    ctx.set_specification_str(
        r#"
openapi: 3.0.3
servers:
  - url: 'https://api.x.com:{port}'
    variables:
      port:
        default: 443
        enum: [443, 8443]
paths:
  /users/{id}:
    get:
      operationId: getUser
      x-codeSamples:
        - lang: curl
          label: cURL
"#,
    )
    .unwrap();

    assert_eq!(ctx.base_url(), "https://api.x.com:{port}");
    assert_eq!(ctx.resolved().servers[0].variables["port"].default, "443");
    assert_eq!(ctx.find_operation_path("getUser"), Some("/users/{id}"));

    let samples = ctx.find_operation_code_samples("getUser");
    assert_eq!(samples.len(), 1);
    assert_eq!(samples[0].lang, "curl");
    assert_eq!(samples[0].source, "");
}
