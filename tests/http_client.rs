use std::time::Duration;

use desec_sync::common::identity::RRSetKey;
use desec_sync::common::Error;
use desec_sync::desec::api::{DomainApi, RRSetApi};
use desec_sync::desec::models::RRSetPatch;
use desec_sync::desec::DesecClient;
use desec_sync::resources::Resource;
use desec_sync::Session;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "4pnk7u-NHvrEkFzrhFDRTjGFyX_S";

fn client(server: &MockServer) -> DesecClient {
    let base = Url::parse(&format!("{}/api/v1/", server.uri())).unwrap();
    DesecClient::new(base, TOKEN.into(), Duration::from_secs(5)).unwrap()
}

/// The client blocks, so it runs off the runtime that serves the mocks.
async fn blocking<T, F>(f: F) -> T
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await.unwrap()
}

fn rrset_json(subname: &str, ttl: u32, records: &[&str]) -> serde_json::Value {
    let name = match subname {
        "" => "example.com.".to_string(),
        s => format!("{s}.example.com."),
    };
    json!({
        "domain": "example.com",
        "subname": subname,
        "name": name,
        "type": "A",
        "ttl": ttl,
        "records": records,
        "created": "2024-01-01T00:00:00Z",
    })
}

#[tokio::test(flavor = "multi_thread")]
async fn not_found_status_is_classified() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/domains/missing.example/rrsets/"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Not found."})))
        .expect(2)
        .mount(&server)
        .await;

    let client = client(&server);
    let (err, read) = blocking(move || {
        let err = client.list_rrsets("missing.example").unwrap_err();
        let session = Session::new(client);
        let read = session.rrsets().read("missing.example/@/A");
        (err, read)
    })
    .await;

    assert!(err.is_not_found(), "{err:?}");
    assert!(matches!(err, Error::NotFound { .. }));
    assert_eq!(read.unwrap(), None);
}

#[tokio::test(flavor = "multi_thread")]
async fn other_error_statuses_are_response_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/domains/example.com/rrsets/"))
        .respond_with(ResponseTemplate::new(503).set_body_string("try again later"))
        .mount(&server)
        .await;

    let client = client(&server);
    let err = blocking(move || client.list_rrsets("example.com").unwrap_err()).await;

    assert!(!err.is_not_found());
    match err {
        Error::ResponseError { message } => {
            assert!(message.contains("503"), "{message}");
            assert!(message.contains("try again later"), "{message}");
        }
        other => panic!("expected a response error, got {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn requests_carry_the_api_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/domains/example.com/rrsets/"))
        .and(header("Authorization", format!("Token {TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            rrset_json("", 3600, &["127.0.0.1"]),
            rrset_json("www", 60, &["127.0.0.2"]),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let rrsets = blocking(move || client.list_rrsets("example.com")).await.unwrap();

    let ids: Vec<_> = rrsets.iter().map(|r| r.id()).collect();
    assert_eq!(ids, vec!["example.com/@/A", "example.com/www/A"]);
    assert_eq!(rrsets[1].ttl, 60);
}

#[tokio::test(flavor = "multi_thread")]
async fn update_patches_ttl_and_records() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/v1/domains/example.com/rrsets/@/A/"))
        .and(header("Authorization", format!("Token {TOKEN}").as_str()))
        .and(body_json(json!({"ttl": 3600, "records": ["10.0.0.1"]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(rrset_json("", 3600, &["10.0.0.1"])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let updated = blocking(move || {
        client.update_rrset(
            &RRSetKey::new("example.com", "", "A"),
            &RRSetPatch {
                ttl: 3600,
                records: vec!["10.0.0.1".into()],
            },
        )
    })
    .await
    .unwrap();

    assert_eq!(updated.records, vec!["10.0.0.1"]);
    assert_eq!(updated.id(), "example.com/@/A");
}

#[tokio::test(flavor = "multi_thread")]
async fn deletes_accept_no_content_and_tolerate_absence() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/domains/example.com/rrsets/www/A/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/domains/gone.example/"))
        .respond_with(ResponseTemplate::new(404))
        .expect(2)
        .mount(&server)
        .await;

    let client = client(&server);
    let (rrset, domain, reconciled) = blocking(move || {
        let rrset = client.delete_rrset(&RRSetKey::new("example.com", "www", "A"));
        let domain = client.delete_domain("gone.example");
        let session = Session::new(client);
        let reconciled = session.domains().delete("gone.example");
        (rrset, domain, reconciled)
    })
    .await;

    assert!(rrset.is_ok(), "{rrset:?}");
    assert!(domain.unwrap_err().is_not_found());
    assert!(reconciled.is_ok(), "{reconciled:?}");
}
