//! Shared fixtures for the integration scenarios and benchmarks.
//!
//! | Form | Allow-list | Elements |
//! |------|------------|----------|
//! | `contact` | 42 | name, upload (managed_file), gallery (image), receipt (print pdf) |
//! | `survey` | 7 | rating |
//! | `open` | none | comment |

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use fg_04_api_gateway::{ApiGatewayService, GatewayConfig, GatewayDependencies};
use serde_json::Value;
use shared_store::InMemoryObjectStore;
use shared_types::{ElementDescriptor, FileObject, Form, Submission, User};
use std::sync::Arc;
use tower::ServiceExt;

pub const BASE_URL: &str = "http://forms.test";
pub const CLIENT_KEY: &str = "client-key";
pub const OTHER_KEY: &str = "other-key";

/// 2024-01-01T00:00:00Z
pub const JAN_1: i64 = 1_704_067_200;
/// 2024-02-01T00:00:00Z
pub const FEB_1: i64 = 1_706_745_600;

pub fn contact_form() -> Form {
    Form::new("contact", "Contact")
        .with_element(ElementDescriptor::new("name", "textfield").with_title("Name"))
        .with_element(ElementDescriptor::new("upload", "managed_file").with_title("Upload"))
        .with_element(ElementDescriptor::new("gallery", "webform_image_file"))
        .with_element(
            ElementDescriptor::new("receipt", "webform_entity_print_attachment:pdf")
                .with_title("Receipt"),
        )
        .with_allowed_users([42])
}

pub fn file(id: &str, name: &str) -> FileObject {
    FileObject {
        id: id.to_string(),
        uri: format!("private://webform/contact/1/{name}"),
        filename: name.to_string(),
        mime_type: "application/pdf".to_string(),
        size: 2048,
    }
}

pub fn submission(id: u64, uuid: &str, form_id: &str, created: i64, data: Value) -> Submission {
    Submission {
        id,
        uuid: uuid.to_string(),
        form_id: form_id.to_string(),
        created,
        data: data.as_object().cloned().unwrap_or_default(),
    }
}

fn user(id: u64, key: &str) -> User {
    User {
        id,
        name: format!("user-{id}"),
        api_key: Some(key.to_string()),
    }
}

/// Store holding the three forms, two API users and four submissions.
pub fn scenario_store() -> Arc<InMemoryObjectStore> {
    let store = InMemoryObjectStore::new();
    store.insert_form(contact_form());
    store.insert_form(
        Form::new("survey", "Survey")
            .with_element(ElementDescriptor::new("rating", "number"))
            .with_allowed_users([7]),
    );
    store.insert_form(
        Form::new("open", "Open").with_element(ElementDescriptor::new("comment", "textarea")),
    );

    store.insert_user(user(42, CLIENT_KEY));
    store.insert_user(user(7, OTHER_KEY));

    store.insert_file(file("127", "cv.pdf"));
    store.insert_file(file("128", "a.png"));
    store.insert_file(file("129", "b.png"));

    store.insert_submission(submission(
        1,
        "uuid-jan",
        "contact",
        JAN_1 + 12 * 3600,
        serde_json::json!({"name": "Ada", "upload": "127"}),
    ));
    store.insert_submission(submission(
        2,
        "uuid-feb",
        "contact",
        FEB_1 + 12 * 3600,
        serde_json::json!({"name": "Grace", "gallery": ["128", "129"]}),
    ));
    store.insert_submission(submission(
        3,
        "uuid-survey",
        "survey",
        JAN_1,
        serde_json::json!({"rating": 5}),
    ));
    store.insert_submission(submission(
        4,
        "uuid-open",
        "open",
        JAN_1,
        serde_json::json!({"comment": "hi"}),
    ));
    Arc::new(store)
}

pub fn gateway_config() -> GatewayConfig {
    GatewayConfig {
        public_base_url: BASE_URL.to_string(),
        ..GatewayConfig::default()
    }
}

pub fn gateway(store: Arc<InMemoryObjectStore>, config: GatewayConfig) -> ApiGatewayService {
    ApiGatewayService::new(config, GatewayDependencies::in_memory(store))
        .expect("fixture gateway config is valid")
}

pub fn get(uri: &str, key: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(key) = key {
        builder = builder.header("X-API-Key", key);
    }
    builder
        .body(Body::empty())
        .expect("fixture request is well formed")
}

/// Send one request through the router and decode the JSON body.
///
/// A non-JSON body decodes to `Value::Null`.
pub async fn send(router: Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = match router.oneshot(req).await {
        Ok(response) => response,
        Err(never) => match never {},
    };
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .map(|bytes| serde_json::from_slice(&bytes).unwrap_or(Value::Null))
        .unwrap_or(Value::Null);
    (status, body)
}
