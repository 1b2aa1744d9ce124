//! Delivery and management clients against a `wiremock` server.
//!
//! Both clients block, so every call runs on a blocking task while the mock
//! server answers from its own thread.

use serde_json::{json, Value};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use atelier_content::{
    ContentError, ContentModel, ContentService, DeliveryClient, EntryQuery, ManagementClient,
    SchemaStore,
};
use atelier_core::AvailabilityStatus;

const SPACE: &str = "/spaces/space1/environments/master";

async fn blocking<T: Send + 'static>(call: impl FnOnce() -> T + Send + 'static) -> T {
    tokio::task::spawn_blocking(call).await.expect("blocking call")
}

fn header_value<'a>(request: &'a Request, name: &str) -> Option<&'a str> {
    request.headers.get(name).and_then(|v| v.to_str().ok())
}

async fn mount(server: &MockServer, verb: &str, at: &str, status: u16, body: Value) {
    Mock::given(method(verb))
        .and(path(at))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

// ---------------------------------------------------------------------------
// Delivery
// ---------------------------------------------------------------------------

#[tokio::test]
async fn lists_content_types_with_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{SPACE}/content_types")))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [
            { "sys": { "id": "artwork" }, "name": "Artwork", "description": "Pieces" },
            { "sys": { "id": "aboutPage" }, "name": "About Page" }
        ]})))
        .expect(1)
        .mount(&server)
        .await;
    let client = DeliveryClient::new(server.uri(), "space1", "master", "tok");

    let types = blocking(move || client.list_content_types()).await.unwrap();

    assert_eq!(types.len(), 2);
    assert_eq!(types[0].id.0, "artwork");
    assert_eq!(types[0].description.as_deref(), Some("Pieces"));
    assert_eq!(types[1].description, None);
}

#[tokio::test]
async fn entries_query_carries_type_and_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/spaces/space1/environments/staging/entries"))
        .and(query_param("content_type", "artwork"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [{
            "sys": { "id": "e1", "contentType": { "sys": { "id": "artwork" } } },
            "fields": { "title": "Dusk", "availability": "Sold" }
        }]})))
        .expect(1)
        .mount(&server)
        .await;
    let client = DeliveryClient::new(server.uri(), "space1", "staging", "tok");

    let entries = blocking(move || {
        client.get_entries(&EntryQuery {
            content_type: "artwork".into(),
            limit: 5,
        })
    })
    .await
    .unwrap();

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].content_type_id(), Some("artwork"));
    assert_eq!(entries[0].fields["availability"], json!(AvailabilityStatus::Sold));
}

#[tokio::test]
async fn unknown_content_type_is_none() {
    let server = MockServer::start().await;
    mount(&server, "GET", &format!("{SPACE}/content_types/ghost"), 404, json!({ "sys": { "id": "NotFound" } })).await;
    let client = DeliveryClient::new(server.uri(), "space1", "master", "tok");

    let details = blocking(move || client.get_content_type(&"ghost".into())).await;

    assert_eq!(details.unwrap(), None);
}

#[tokio::test]
async fn auth_failure_is_a_status_error() {
    let server = MockServer::start().await;
    mount(&server, "GET", &format!("{SPACE}/content_types"), 401, json!({ "message": "bad token" })).await;
    let client = DeliveryClient::new(server.uri(), "space1", "master", "tok");

    let err = blocking(move || client.list_content_types()).await.unwrap_err();

    match err {
        ContentError::Status { status, body, .. } => {
            assert_eq!(status, 401);
            assert!(body.contains("bad token"));
        }
        other => panic!("expected status error, got {other}"),
    }
}

// ---------------------------------------------------------------------------
// Management
// ---------------------------------------------------------------------------

#[tokio::test]
async fn upsert_sends_current_version_then_activates() {
    let server = MockServer::start().await;
    let artwork_path = format!("{SPACE}/content_types/artwork");
    mount(&server, "GET", &artwork_path, 200, json!({ "sys": { "id": "artwork", "version": 4 } })).await;
    mount(&server, "PUT", &artwork_path, 200, json!({ "sys": { "id": "artwork", "version": 5 } })).await;
    mount(
        &server,
        "PUT",
        &format!("{artwork_path}/published"),
        200,
        json!({ "sys": { "id": "artwork", "version": 6 } }),
    )
    .await;
    let client = ManagementClient::new(server.uri(), "space1", "master", "cma");

    let version = blocking(move || {
        let model = ContentModel::embedded()?;
        let artwork = model.get("artwork").expect("artwork in model");
        let version = client.upsert_content_type(artwork)?;
        client.activate_content_type(&artwork.id, version)?;
        Ok::<_, ContentError>(version)
    })
    .await
    .unwrap();

    assert_eq!(version, 5);
    let requests = server.received_requests().await.expect("recording enabled");
    let seen: Vec<(String, &str)> = requests
        .iter()
        .map(|r| (r.method.to_string(), r.url.path()))
        .collect();
    assert_eq!(
        seen,
        [
            ("GET".to_string(), artwork_path.as_str()),
            ("PUT".to_string(), artwork_path.as_str()),
            ("PUT".to_string(), format!("{artwork_path}/published").as_str()),
        ]
    );

    let put = &requests[1];
    assert_eq!(header_value(put, "x-contentful-version"), Some("4"));
    assert_eq!(header_value(put, "authorization"), Some("Bearer cma"));
    let body: Value = put.body_json().unwrap();
    assert_eq!(body["name"], json!("Artwork"));
    assert_eq!(body["fields"].as_array().map(Vec::len), Some(12));

    assert_eq!(header_value(&requests[2], "x-contentful-version"), Some("5"));
}

#[tokio::test]
async fn new_content_type_is_created_without_version() {
    let server = MockServer::start().await;
    let about_path = format!("{SPACE}/content_types/aboutPage");
    mount(&server, "GET", &about_path, 404, json!({ "sys": { "id": "NotFound" } })).await;
    mount(&server, "PUT", &about_path, 201, json!({ "sys": { "id": "aboutPage", "version": 1 } })).await;
    let client = ManagementClient::new(server.uri(), "space1", "master", "cma");

    let version = blocking(move || {
        let model = ContentModel::embedded()?;
        client.upsert_content_type(model.get("aboutPage").expect("aboutPage in model"))
    })
    .await
    .unwrap();

    assert_eq!(version, 1);
    let requests = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 2);
    assert_eq!(header_value(&requests[1], "x-contentful-version"), None);
}

#[tokio::test]
async fn entry_write_and_publish_track_versions() {
    let server = MockServer::start().await;
    let entry_path = format!("{SPACE}/entries/e1");
    mount(
        &server,
        "GET",
        &entry_path,
        200,
        json!({ "sys": { "id": "e1", "version": 9 }, "fields": { "availability": { "en-US": "Available" } } }),
    )
    .await;
    mount(
        &server,
        "PUT",
        &entry_path,
        200,
        json!({ "sys": { "id": "e1", "version": 10 }, "fields": { "availability": { "en-US": "Sold" } } }),
    )
    .await;
    mount(&server, "PUT", &format!("{entry_path}/published"), 200, json!({ "sys": { "id": "e1", "version": 11 } })).await;
    let client = ManagementClient::new(server.uri(), "space1", "master", "cma");

    let published = blocking(move || {
        let mut entry = client.get_entry("e1")?;
        entry.set_localized("availability", "en-US", Some(json!("Sold")));
        let stored = client.update_entry(&entry)?;
        client.publish_entry(&stored.id, stored.version)
    })
    .await
    .unwrap();

    assert_eq!(published.version, 11);
    let requests = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 3);

    let update = &requests[1];
    assert_eq!(header_value(update, "x-contentful-version"), Some("9"));
    let body: Value = update.body_json().unwrap();
    assert_eq!(body["fields"]["availability"]["en-US"], json!("Sold"));

    let publish = &requests[2];
    assert_eq!(publish.url.path(), format!("{entry_path}/published"));
    assert_eq!(header_value(publish, "x-contentful-version"), Some("10"));
}
