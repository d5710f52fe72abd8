// Stateful fake of the Mist v1 API for end-to-end guest lifecycle tests.
//
// Guest records are stored per scope and keyed by the MAC path segment;
// writes merge into the stored record and recompute expiry from `minutes`
// the way the real service does.

#![allow(clippy::unwrap_used, dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use secrecy::SecretString;
use serde_json::{Map, Value, json};
use wiremock::matchers::any;
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

use mistguest_core::{Portal, PortalConfig};

pub const ORG_ID: &str = "org-1";
pub const TOKEN_NAME: &str = "portal-token";

#[derive(Default)]
pub struct State {
    pub sites: Vec<Value>,
    pub org_wlans: Vec<Value>,
    pub site_wlans: HashMap<String, Vec<Value>>,
    pub templates: HashMap<String, Value>,
    pub sitegroups: HashMap<String, Value>,
    pub clients: HashMap<String, Vec<Value>>,
    /// (site_id, mac) → record
    pub site_guests: HashMap<(String, String), Map<String, Value>>,
    /// mac → record
    pub org_guests: HashMap<String, Map<String, Value>>,
    /// Every write as (path, body), in arrival order.
    pub writes: Vec<(String, Value)>,
    pub reject_site_writes: bool,
    pub reject_org_writes: bool,
    pub fail_org_wlans: bool,
    pub fail_site_guest_listing: bool,
    pub fail_self: bool,
}

#[derive(Clone, Default)]
pub struct FakeMist {
    pub state: Arc<Mutex<State>>,
}

fn json_response(status: u16, body: Value) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(body)
}

fn detail(status: u16, message: &str) -> ResponseTemplate {
    json_response(status, json!({ "detail": message }))
}

fn upsert(record: &mut Map<String, Value>, mac: &str, body: &Value) {
    if let Some(fields) = body.as_object() {
        for (k, v) in fields {
            record.insert(k.clone(), v.clone());
        }
    }
    record.insert("mac".into(), Value::String(mac.to_owned()));
    if let Some(minutes) = body.get("minutes").and_then(Value::as_i64) {
        let now = Utc::now().timestamp();
        record.insert("authorized_time".into(), json!(now));
        record.insert("authorized_expiring_time".into(), json!(now + minutes * 60));
    }
}

impl Respond for FakeMist {
    fn respond(&self, req: &Request) -> ResponseTemplate {
        let mut state = self.state.lock().unwrap();
        let path = req.url.path().trim_start_matches("/api/v1/").to_owned();
        let segments: Vec<&str> = path.split('/').collect();
        let query: HashMap<String, String> = req.url.query_pairs().into_owned().collect();

        match (req.method.as_str(), segments.as_slice()) {
            ("GET", ["self"]) if state.fail_self => detail(500, "identity service down"),
            ("GET", ["self"]) => json_response(
                200,
                json!({
                    "name": TOKEN_NAME,
                    "privileges": [{ "scope": "org", "org_id": ORG_ID, "name": "Acme" }]
                }),
            ),
            ("GET", ["orgs", org]) => json_response(200, json!({ "id": org, "name": "Acme" })),
            ("GET", ["orgs", _, "sites"]) => json_response(200, Value::Array(state.sites.clone())),
            ("GET", ["orgs", _, "wlans"]) if state.fail_org_wlans => detail(503, "unavailable"),
            ("GET", ["orgs", _, "wlans"]) => {
                json_response(200, Value::Array(state.org_wlans.clone()))
            }
            ("GET", ["orgs", _, "templates", id]) => match state.templates.get(*id) {
                Some(t) => json_response(200, t.clone()),
                None => detail(404, "template not found"),
            },
            ("GET", ["orgs", _, "sitegroups", id]) => match state.sitegroups.get(*id) {
                Some(g) => json_response(200, g.clone()),
                None => detail(404, "sitegroup not found"),
            },
            ("GET", ["sites", site, "wlans"]) => json_response(
                200,
                Value::Array(state.site_wlans.get(*site).cloned().unwrap_or_default()),
            ),
            ("GET", ["sites", site, "stats", "clients"]) => match state.clients.get(*site) {
                Some(c) => json_response(200, Value::Array(c.clone())),
                None => detail(404, "site not found"),
            },
            ("GET", ["sites", _, "guests"]) if state.fail_site_guest_listing => {
                detail(500, "guest listing failed")
            }
            ("GET", ["sites", site, "guests"]) => {
                let wlan = query.get("wlan_id");
                let results: Vec<Value> = state
                    .site_guests
                    .iter()
                    .filter(|((s, _), _)| s == site)
                    .filter(|(_, r)| {
                        wlan.is_none_or(|w| r.get("wlan_id").and_then(Value::as_str) == Some(w))
                    })
                    .map(|(_, r)| Value::Object(r.clone()))
                    .collect();
                json_response(200, json!({ "results": results }))
            }
            ("GET", ["orgs", _, "guests"]) => {
                let results: Vec<Value> = state
                    .org_guests
                    .values()
                    .map(|r| Value::Object(r.clone()))
                    .collect();
                json_response(200, Value::Array(results))
            }
            ("PUT", ["sites", site, "guests", mac]) => {
                let body: Value = serde_json::from_slice(&req.body).unwrap_or(Value::Null);
                state.writes.push((path.clone(), body.clone()));
                if state.reject_site_writes {
                    return detail(400, "site write rejected");
                }
                let key = ((*site).to_owned(), (*mac).to_owned());
                let record = state.site_guests.entry(key).or_default();
                upsert(record, mac, &body);
                json_response(200, Value::Object(record.clone()))
            }
            ("PUT", ["orgs", _, "guests", mac]) => {
                let body: Value = serde_json::from_slice(&req.body).unwrap_or(Value::Null);
                state.writes.push((path.clone(), body.clone()));
                if state.reject_org_writes {
                    return detail(400, "org write rejected");
                }
                let record = state.org_guests.entry((*mac).to_owned()).or_default();
                upsert(record, mac, &body);
                json_response(200, Value::Object(record.clone()))
            }
            _ => detail(404, "no such endpoint"),
        }
    }
}

/// Start the fake and a `Portal` pointed at it.
pub async fn start(org_id: Option<&str>) -> (MockServer, FakeMist, Portal) {
    let server = MockServer::start().await;
    let fake = FakeMist::default();
    Mock::given(any())
        .respond_with(fake.clone())
        .mount(&server)
        .await;

    let mut config = PortalConfig::new(SecretString::from("test-token".to_owned()));
    config.host = server.uri();
    config.org_id = org_id.map(Into::into);
    let portal = Portal::connect(&config).unwrap();

    (server, fake, portal)
}

pub fn site(id: &str, name: &str) -> Value {
    json!({ "id": id, "name": name, "timezone": "UTC" })
}
