// Integration tests for `MistClient` using wiremock.

#![allow(clippy::unwrap_used)]

use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use mistguest_api::{Error, GuestScope, MistClient, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup(org_id: Option<&str>) -> (MockServer, MistClient) {
    let server = MockServer::start().await;
    let client =
        MistClient::from_reqwest(&server.uri(), reqwest::Client::new(), org_id.map(Into::into))
            .unwrap();
    (server, client)
}

// ── Happy-path tests ────────────────────────────────────────────────

#[tokio::test]
async fn test_token_header_is_sent() {
    let server = MockServer::start().await;
    let token = SecretString::from("s3cret-token".to_owned());
    let client = MistClient::from_api_token(
        &server.uri(),
        &token,
        Some("org-1".into()),
        &TransportConfig::default(),
    )
    .unwrap();

    Mock::given(method("GET"))
        .and(path("/api/v1/orgs/org-1"))
        .and(header("authorization", "Token s3cret-token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "id": "org-1", "name": "Acme" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let org = client.get_org("org-1").await.unwrap();
    assert_eq!(org.name.as_deref(), Some("Acme"));
}

#[tokio::test]
async fn test_list_org_sites_follows_page_headers() {
    let (server, client) = setup(Some("org-1")).await;

    Mock::given(method("GET"))
        .and(path("/api/v1/orgs/org-1/sites"))
        .and(query_param("limit", "1000"))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Page-Total", "3")
                .insert_header("X-Page-Limit", "2")
                .insert_header("X-Page-Page", "1")
                .set_body_json(json!([
                    { "id": "s1", "name": "Alpha" },
                    { "id": "s2", "name": "Bravo" },
                ])),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/orgs/org-1/sites"))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Page-Total", "3")
                .insert_header("X-Page-Limit", "2")
                .insert_header("X-Page-Page", "2")
                .set_body_json(json!([{ "id": "s3", "name": "Charlie" }])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let sites = client.list_org_sites("org-1").await.unwrap();
    let ids: Vec<&str> = sites.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, ["s1", "s2", "s3"]);
}

#[tokio::test]
async fn test_pagination_without_page_header_advances_and_stops() {
    let (server, client) = setup(Some("org-1")).await;

    for page in 1..=3 {
        Mock::given(method("GET"))
            .and(path("/api/v1/orgs/org-1/sites"))
            .and(query_param("page", page.to_string()))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("X-Page-Total", "3")
                    .insert_header("X-Page-Limit", "1")
                    .set_body_json(json!([{ "id": format!("s{page}") }])),
            )
            .expect(1)
            .mount(&server)
            .await;
    }

    let sites = tokio::time::timeout(
        std::time::Duration::from_secs(5),
        client.list_org_sites("org-1"),
    )
    .await
    .expect("listing must terminate")
    .unwrap();

    let ids: Vec<&str> = sites.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, ["s1", "s2", "s3"]);
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_site_guest_listing_unwraps_results_and_filters_by_wlan() {
    let (server, client) = setup(Some("org-1")).await;

    Mock::given(method("GET"))
        .and(path("/api/v1/sites/site-1/guests"))
        .and(query_param("wlan_id", "wlan-9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                { "mac": "aabbccddeeff", "name": "Printer", "authorized_expiring_time": 1_700_000_000 }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let guests = client
        .list_guest_authorizations(GuestScope::Site("site-1"), Some("wlan-9"))
        .await
        .unwrap();

    assert_eq!(guests.len(), 1);
    assert_eq!(guests[0].name.as_deref(), Some("Printer"));
    assert_eq!(guests[0].authorized_expiring_time, Some(1_700_000_000));
}

#[tokio::test]
async fn test_upsert_guest_puts_body_at_scope() {
    let (server, client) = setup(Some("org-1")).await;
    let body = json!({ "authorized": true, "minutes": 60, "wlan_id": "w1" });

    Mock::given(method("PUT"))
        .and(path("/api/v1/orgs/org-1/guests/aabbccddeeff"))
        .and(body_json(&body))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "mac": "aabbccddeeff" })))
        .expect(1)
        .mount(&server)
        .await;

    let receipt = client
        .upsert_guest_authorization(GuestScope::Org("org-1"), "aabbccddeeff", &body)
        .await
        .unwrap();
    assert_eq!(receipt.status, 200);
    assert_eq!(receipt.body["mac"], "aabbccddeeff");
}

#[tokio::test]
async fn test_org_id_resolved_once_from_privileges() {
    let (server, client) = setup(None).await;

    Mock::given(method("GET"))
        .and(path("/api/v1/self"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "portal-token",
            "privileges": [
                { "scope": "site", "site_id": "s1" },
                { "scope": "org", "org_id": "org-42", "name": "Acme" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    assert_eq!(client.org_id().await.unwrap(), "org-42");
    assert_eq!(client.org_id().await.unwrap(), "org-42");
}

#[tokio::test]
async fn test_connection_uses_configured_org() {
    let (server, client) = setup(Some("org-7")).await;

    Mock::given(method("GET"))
        .and(path("/api/v1/orgs/org-7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "org-7" })))
        .mount(&server)
        .await;

    let org = client.test_connection().await.unwrap();
    assert_eq!(org.id, "org-7");
    assert_eq!(org.name, "Unknown");
}

// ── Error-path tests ────────────────────────────────────────────────

#[tokio::test]
async fn test_no_organizations_in_privileges() {
    let (server, client) = setup(None).await;

    Mock::given(method("GET"))
        .and(path("/api/v1/self"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "privileges": [] })))
        .mount(&server)
        .await;

    let err = client.test_connection().await.unwrap_err();
    assert!(matches!(err, Error::NoOrganizations));
    assert_eq!(err.to_string(), "No organizations found for this API token");
}

#[tokio::test]
async fn test_error_detail_is_surfaced() {
    let (server, client) = setup(Some("org-1")).await;

    Mock::given(method("PUT"))
        .and(path("/api/v1/sites/site-1/guests/aabbccddeeff"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "detail": "wlan not found" })))
        .mount(&server)
        .await;

    let err = client
        .upsert_guest_authorization(
            GuestScope::Site("site-1"),
            "aabbccddeeff",
            &json!({ "minutes": 0 }),
        )
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(400));
    assert_eq!(err.to_string(), "wlan not found");
}

#[tokio::test]
async fn test_error_without_detail_reports_status() {
    let (server, client) = setup(Some("org-1")).await;

    Mock::given(method("GET"))
        .and(path("/api/v1/orgs/org-1/templates/t-1"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not here"))
        .mount(&server)
        .await;

    let err = client.get_org_template("org-1", "t-1").await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "API error (status: 404)");
}

#[tokio::test]
async fn test_unauthorized_maps_to_authentication_error() {
    let (server, client) = setup(Some("org-1")).await;

    Mock::given(method("GET"))
        .and(path("/api/v1/orgs/org-1/wlans"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = client.list_org_wlans("org-1").await.unwrap_err();
    assert!(matches!(err, Error::Authentication { .. }));
}
