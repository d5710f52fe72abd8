// End-to-end guest authorization behavior against the fake Mist API.

#![allow(clippy::unwrap_used)]

mod common;

use pretty_assertions::assert_eq;
use serde_json::json;

use common::{ORG_ID, TOKEN_NAME};
use mistguest_core::{CoreError, FieldUpdate, GuestAuthorization, GuestUpdate};

fn request(mac: &str, minutes: u32) -> GuestAuthorization {
    GuestAuthorization {
        mac: mac.into(),
        name: Some("Lobby Display".into()),
        email: Some(String::new()),
        company: Some("Acme".into()),
        minutes,
        ..GuestAuthorization::default()
    }
}

// ── Authorize / list / deauthorize ──────────────────────────────────

#[tokio::test]
async fn authorized_guest_is_listed_as_active() {
    let (_server, _fake, portal) = common::start(Some(ORG_ID)).await;
    let guests = portal.guests();

    let created = guests
        .authorize("site-1", "wlan-1", &request("AA-BB-CC-DD-EE-FF", 120))
        .await
        .unwrap();
    assert_eq!(created.mac, "aa:bb:cc:dd:ee:ff");
    assert_eq!(created.remaining_minutes, 120);

    let listed = guests.list("site-1", "wlan-1").await.unwrap();
    assert_eq!(listed.len(), 1);
    let guest = &listed[0];
    assert_eq!(guest.mac, "aa:bb:cc:dd:ee:ff");
    assert!(!guest.is_expired);
    assert!((119..=120).contains(&guest.remaining_minutes));
    assert_eq!(guest.name, "Lobby Display");
    assert_eq!(guest.email, "");
}

#[tokio::test]
async fn deauthorized_guest_stays_listed_but_expired() {
    let (_server, fake, portal) = common::start(Some(ORG_ID)).await;
    let guests = portal.guests();

    guests
        .authorize("site-1", "wlan-1", &request("aabbccddeeff", 60))
        .await
        .unwrap();
    guests
        .deauthorize("site-1", "wlan-1", "aa:bb:cc:dd:ee:ff")
        .await
        .unwrap();

    let listed = guests.list("site-1", "wlan-1").await.unwrap();
    assert_eq!(listed.len(), 1);
    assert!(listed[0].is_expired);
    assert_eq!(listed[0].remaining_minutes, 0);

    let state = fake.state.lock().unwrap();
    let (path, body) = state.writes.last().unwrap();
    assert_eq!(path, "sites/site-1/guests/aabbccddeeff");
    assert_eq!(body, &json!({ "minutes": 0 }));
}

#[tokio::test]
async fn authorize_body_carries_only_supplied_fields() {
    let (_server, fake, portal) = common::start(Some(ORG_ID)).await;

    let mut req = request("aa:bb:cc:dd:ee:ff", 30);
    req.notify = true;
    portal
        .guests()
        .authorize("site-1", "wlan-9", &req)
        .await
        .unwrap();

    let state = fake.state.lock().unwrap();
    assert_eq!(state.writes.len(), 1);
    assert_eq!(
        state.writes[0].1,
        json!({
            "mac": "aa:bb:cc:dd:ee:ff",
            "minutes": 30,
            "authorized": true,
            "name": "Lobby Display",
            "company": "Acme",
            "field4": TOKEN_NAME,
            "notify": true,
            "wlan_id": "wlan-9"
        })
    );
}

// ── field4 ownership ────────────────────────────────────────────────

#[tokio::test]
async fn field4_is_always_the_token_name() {
    let (_server, fake, portal) = common::start(Some(ORG_ID)).await;
    let guests = portal.guests();

    let mut req = request("aabbccddeeff", 60);
    req.field4 = Some("caller supplied".into());
    let created = guests.authorize("site-1", "wlan-1", &req).await.unwrap();
    assert_eq!(created.field4, TOKEN_NAME);

    let update = GuestUpdate {
        company: FieldUpdate::Set("Globex".into()),
        field4: FieldUpdate::Set("caller again".into()),
        ..GuestUpdate::default()
    };
    let updated = guests
        .update("site-1", "wlan-1", "aabbccddeeff", &update)
        .await
        .unwrap();
    assert_eq!(updated.field4, TOKEN_NAME);

    let listed = guests.list("site-1", "wlan-1").await.unwrap();
    assert_eq!(listed[0].field4, TOKEN_NAME);
    assert_eq!(listed[0].company, "Globex");

    let state = fake.state.lock().unwrap();
    assert!(state.writes.iter().all(|(_, body)| body["field4"] == TOKEN_NAME));
}

#[tokio::test]
async fn token_name_lookup_failure_does_not_block_writes() {
    let (_server, fake, portal) = common::start(Some(ORG_ID)).await;
    fake.state.lock().unwrap().fail_self = true;

    let created = portal
        .guests()
        .authorize("site-1", "wlan-1", &request("aabbccddeeff", 60))
        .await
        .unwrap();
    assert_eq!(created.field4, "Unknown Token");
}

// ── Update ──────────────────────────────────────────────────────────

#[tokio::test]
async fn empty_update_is_rejected_before_any_request() {
    let (server, _fake, portal) = common::start(Some(ORG_ID)).await;

    let update = GuestUpdate {
        field4: FieldUpdate::Set("only field4".into()),
        ..GuestUpdate::default()
    };
    let err = portal
        .guests()
        .update("site-1", "wlan-1", "aabbccddeeff", &update)
        .await
        .unwrap_err();

    assert!(matches!(err, CoreError::NoFieldsToUpdate));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn update_without_minutes_reports_default_window() {
    let (_server, fake, portal) = common::start(Some(ORG_ID)).await;

    let update = GuestUpdate {
        name: FieldUpdate::Set("Renamed".into()),
        ..GuestUpdate::default()
    };
    let updated = portal
        .guests()
        .update("site-1", "wlan-1", "aa-bb-cc-dd-ee-ff", &update)
        .await
        .unwrap();

    assert_eq!(updated.remaining_minutes, 1440);
    assert_eq!(updated.name, "Renamed");
    let state = fake.state.lock().unwrap();
    assert_eq!(
        state.writes[0].1,
        json!({ "name": "Renamed", "field4": TOKEN_NAME })
    );
}

// ── Fallback ────────────────────────────────────────────────────────

#[tokio::test]
async fn rejected_site_write_retries_at_org_with_same_body() {
    let (_server, fake, portal) = common::start(None).await;
    fake.state.lock().unwrap().reject_site_writes = true;

    portal
        .guests()
        .authorize("site-1", "wlan-1", &request("aabbccddeeff", 60))
        .await
        .unwrap();

    let state = fake.state.lock().unwrap();
    assert_eq!(state.writes.len(), 2);
    assert_eq!(state.writes[0].0, "sites/site-1/guests/aabbccddeeff");
    assert_eq!(state.writes[1].0, format!("orgs/{ORG_ID}/guests/aabbccddeeff"));
    assert_eq!(state.writes[0].1, state.writes[1].1);
    assert!(state.org_guests.contains_key("aabbccddeeff"));
}

#[tokio::test]
async fn double_write_failure_carries_org_error() {
    let (_server, fake, portal) = common::start(Some(ORG_ID)).await;
    {
        let mut state = fake.state.lock().unwrap();
        state.reject_site_writes = true;
        state.reject_org_writes = true;
    }

    let err = portal
        .guests()
        .authorize("site-1", "wlan-1", &request("aabbccddeeff", 60))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Authorization failed: org write rejected");
}

#[tokio::test]
async fn deauthorize_never_falls_back() {
    let (_server, fake, portal) = common::start(Some(ORG_ID)).await;
    fake.state.lock().unwrap().reject_site_writes = true;

    let err = portal
        .guests()
        .deauthorize("site-1", "wlan-1", "aabbccddeeff")
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "site write rejected");
    assert_eq!(fake.state.lock().unwrap().writes.len(), 1);
}

#[tokio::test]
async fn guest_listing_falls_back_to_org_scope() {
    let (_server, fake, portal) = common::start(Some(ORG_ID)).await;
    {
        let mut state = fake.state.lock().unwrap();
        state.fail_site_guest_listing = true;
        state.reject_site_writes = true;
    }
    let guests = portal.guests();
    guests
        .authorize("site-1", "wlan-1", &request("aabbccddeeff", 45))
        .await
        .unwrap();

    let listed = guests.list("site-1", "wlan-1").await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].wlan_id, "wlan-1");
}

// ── Validation ──────────────────────────────────────────────────────

#[tokio::test]
async fn invalid_mac_is_a_caller_error_without_requests() {
    let (server, _fake, portal) = common::start(Some(ORG_ID)).await;

    let err = portal
        .guests()
        .authorize("site-1", "wlan-1", &request("aa:bb:cc", 60))
        .await
        .unwrap_err();

    assert!(matches!(err, CoreError::InvalidMacAddress { ref input } if input == "aa:bb:cc"));
    assert!(err.is_caller_error());
    assert!(server.received_requests().await.unwrap().is_empty());
}
