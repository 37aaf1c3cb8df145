use common::config::components::acl::DataSourceAclModel;
use common::config::components::connections::{DatabaseMeta, PORT_NUMBER};
use common::config::components::server::BiServerConnection;
use common::utils::Variables;
use shared_clients::bi_server::{
    CONNECTION_ADD_PATH, CONNECTION_GET_PATH, CONNECTION_UPDATE_PATH, DSW_IMPORT_PATH,
    METADATA_IMPORT_PATH, MONDRIAN_POST_ANALYSIS_PATH,
};
use shared_clients::{BiServerClient, BiServerClientError, PublishStatus};
use std::collections::HashMap;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

// base64("admin:password")
const BASIC_AUTH: &str = "Basic YWRtaW46cGFzc3dvcmQ=";

fn client_for(server: &MockServer) -> BiServerClient {
    BiServerClient::new(BiServerConnection::new(&server.uri(), "admin", "password")).unwrap()
}

fn sample_meta() -> DatabaseMeta {
    DatabaseMeta {
        name: "SampleData".into(),
        plugin_id: "POSTGRESQL".into(),
        hostname: "${DB_HOST}".into(),
        database_name: "sampledata".into(),
        username: "${USER_NAME}".into(),
        password: "secret".into(),
        extra_options: HashMap::new(),
        attributes: HashMap::from([(PORT_NUMBER.to_string(), "5432".to_string())]),
    }
}

fn mount_path(p: &str) -> String {
    format!("/{p}")
}

/// Matches a multipart body whose parts carry exactly these names and
/// values, in this order.
struct FormParts(Vec<(&'static str, String)>);

fn form_parts(request: &Request) -> Vec<(String, String)> {
    let Some(boundary) = request
        .headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .and_then(|ct| ct.split("boundary=").nth(1))
        .map(|b| format!("--{}", b.trim_matches('"')))
    else {
        return Vec::new();
    };
    let body = String::from_utf8_lossy(&request.body);
    body.split(boundary.as_str())
        .filter_map(|section| {
            let (head, value) = section.split_once("\r\n\r\n")?;
            let name = head.split("name=\"").nth(1)?.split('"').next()?;
            Some((name.to_string(), value.trim_end_matches("\r\n").to_string()))
        })
        .collect()
}

impl Match for FormParts {
    fn matches(&self, request: &Request) -> bool {
        let parts = form_parts(request);
        parts.len() == self.0.len()
            && parts
                .iter()
                .zip(&self.0)
                .all(|((name, value), (want_name, want_value))| {
                    name == want_name && value == want_value
                })
    }
}

#[tokio::test]
async fn connection_lookup_without_name_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert!(client.connection_name_exists(None).await.is_none());
}

#[tokio::test]
async fn connection_lookup_parses_existing_connection() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(mount_path(CONNECTION_GET_PATH)))
        .and(query_param("name", "test"))
        .and(header("authorization", BASIC_AUTH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"id":"42","name":"test","hostname":"db.local"}"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let conn = client.connection_name_exists(Some("test")).await.unwrap();
    assert_eq!(conn.name, "test");
    assert_eq!(conn.id.as_deref(), Some("42"));
    assert_eq!(conn.hostname, "db.local");
}

#[tokio::test]
async fn connection_lookup_failures_are_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("name", "missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("name", "empty"))
        .respond_with(ResponseTemplate::new(200).set_body_string(""))
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert!(client.connection_name_exists(Some("missing")).await.is_none());
    assert!(client.connection_name_exists(Some("empty")).await.is_none());
}

#[tokio::test]
async fn connection_lookup_unreachable_server_is_none() {
    let client =
        BiServerClient::new(BiServerConnection::new("http://127.0.0.1:1", "admin", "password"))
            .unwrap();
    assert!(client.connection_name_exists(Some("test")).await.is_none());
}

#[tokio::test]
async fn publish_data_source_adds_or_updates() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(mount_path(CONNECTION_ADD_PATH)))
        .and(body_string_contains("SubstitutedHost"))
        .and(body_string_contains("SubstitutedUser"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(mount_path(CONNECTION_UPDATE_PATH)))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = client_for(&server);
    client.set_database_meta(Some(sample_meta()));
    client.set_variables(
        Variables::new()
            .with("DB_HOST", "SubstitutedHost")
            .with("USER_NAME", "SubstitutedUser"),
    );

    assert!(client.publish_data_source(false, None).await);
    assert!(!client.publish_data_source(true, Some("42")).await);
}

#[tokio::test]
async fn publish_data_source_without_connection_fails() {
    let server = MockServer::start().await;
    let client = client_for(&server);
    assert!(!client.publish_data_source(false, None).await);
}

#[tokio::test]
async fn mondrian_publish_maps_status_codes() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(mount_path(MONDRIAN_POST_ANALYSIS_PATH)))
        .and(body_string_contains("Datasource=SampleData;retainInlineAnnotations=true"))
        .and(body_string_contains("catalog-new"))
        .respond_with(ResponseTemplate::new(200).set_body_string("3"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(mount_path(MONDRIAN_POST_ANALYSIS_PATH)))
        .and(body_string_contains("catalog-existing"))
        .respond_with(ResponseTemplate::new(200).set_body_string("8"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(mount_path(MONDRIAN_POST_ANALYSIS_PATH)))
        .and(body_string_contains("catalog-odd"))
        .respond_with(ResponseTemplate::new(200).set_body_string("7"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(mount_path(MONDRIAN_POST_ANALYSIS_PATH)))
        .and(body_string_contains("catalog-empty"))
        .respond_with(ResponseTemplate::new(200).set_body_string(""))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let schema = b"<Schema name=\"Sales\"/>".to_vec();

    assert_eq!(
        client
            .publish_mondrian_schema(schema.clone(), "catalog-new", "SampleData", false)
            .await,
        PublishStatus::Success
    );
    assert_eq!(
        client
            .publish_mondrian_schema(schema.clone(), "catalog-existing", "SampleData", false)
            .await,
        PublishStatus::CatalogExists
    );
    assert_eq!(
        client
            .publish_mondrian_schema(schema.clone(), "catalog-odd", "SampleData", true)
            .await,
        PublishStatus::Failed
    );
    assert_eq!(
        client
            .publish_mondrian_schema(schema, "catalog-empty", "SampleData", true)
            .await,
        PublishStatus::Failed
    );
}

#[tokio::test]
async fn mondrian_publish_sends_parts_in_order() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(mount_path(MONDRIAN_POST_ANALYSIS_PATH)))
        .and(FormParts(vec![
            (
                "parameters",
                "Datasource=SampleData;retainInlineAnnotations=true".to_string(),
            ),
            ("uploadInput", "<Schema name=\"Sales\"/>".to_string()),
            ("catalogName", "sales".to_string()),
            ("overwrite", "true".to_string()),
            ("xmlaEnabledFlag", "true".to_string()),
        ]))
        .respond_with(ResponseTemplate::new(200).set_body_string("3"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let status = client
        .publish_mondrian_schema(
            b"<Schema name=\"Sales\"/>".to_vec(),
            "sales",
            "SampleData",
            true,
        )
        .await;
    assert_eq!(status, PublishStatus::Success);
}

#[tokio::test]
async fn mondrian_publish_error_status_fails_whatever_the_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("catalog-missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("3"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_string_contains("catalog-broken"))
        .respond_with(ResponseTemplate::new(500).set_body_string("8"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    for catalog in ["catalog-missing", "catalog-broken"] {
        let status = client
            .publish_mondrian_schema(b"<Schema/>".to_vec(), catalog, "SampleData", false)
            .await;
        assert_eq!(status, PublishStatus::Failed, "catalog {catalog}");
    }
}

#[tokio::test]
async fn mondrian_publish_unreachable_server_fails() {
    let client =
        BiServerClient::new(BiServerConnection::new("http://127.0.0.1:1", "admin", "password"))
            .unwrap();
    let status = client
        .publish_mondrian_schema(b"<Schema/>".to_vec(), "catalog", "SampleData", false)
        .await;
    assert_eq!(status, PublishStatus::Failed);
    assert_eq!(status.code(), 2);
}

#[tokio::test]
async fn metadata_publish_needs_success_code() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(mount_path(METADATA_IMPORT_PATH)))
        .and(body_string_contains("good.xmi"))
        .and(body_string_contains("testUser"))
        .and(header("authorization", BASIC_AUTH))
        .respond_with(ResponseTemplate::new(200).set_body_string("3"))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(mount_path(METADATA_IMPORT_PATH)))
        .and(body_string_contains("bad.xmi"))
        .respond_with(ResponseTemplate::new(200).set_body_string("2"))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(mount_path(METADATA_IMPORT_PATH)))
        .and(body_string_contains("denied.xmi"))
        .respond_with(ResponseTemplate::new(403).set_body_string("3"))
        .mount(&server)
        .await;

    let mut client = client_for(&server);
    let mut acl = DataSourceAclModel::default();
    acl.add_user("testUser");
    client.set_acl_model(Some(acl));
    client.set_force_overwrite(true);

    let xmi = b"<xmi/>".to_vec();
    assert_eq!(
        client.publish_metadata_file(xmi.clone(), "good.xmi").await,
        PublishStatus::Success
    );
    assert_eq!(
        client.publish_metadata_file(xmi.clone(), "bad.xmi").await,
        PublishStatus::Failed
    );
    assert_eq!(
        client.publish_metadata_file(xmi, "denied.xmi").await,
        PublishStatus::Failed
    );
}

#[tokio::test]
async fn dsw_publish_rejects_non_xmi_domain() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .publish_dsw(b"<xmi/>".to_vec(), "sales.txt")
        .await
        .unwrap_err();
    assert!(matches!(err, BiServerClientError::InvalidArgument { .. }));
}

#[tokio::test]
async fn dsw_publish_accepts_ok_and_created() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(mount_path(DSW_IMPORT_PATH)))
        .and(body_string_contains("ok.xmi"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(mount_path(DSW_IMPORT_PATH)))
        .and(body_string_contains("created.xmi"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(mount_path(DSW_IMPORT_PATH)))
        .and(body_string_contains("broken.xmi"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let xmi = b"<xmi/>".to_vec();
    assert_eq!(
        client.publish_dsw(xmi.clone(), "ok.xmi").await.unwrap(),
        PublishStatus::Success
    );
    assert_eq!(
        client.publish_dsw(xmi.clone(), "created.xmi").await.unwrap(),
        PublishStatus::Success
    );
    assert_eq!(
        client.publish_dsw(xmi, "broken.xmi").await.unwrap(),
        PublishStatus::Failed
    );
}
