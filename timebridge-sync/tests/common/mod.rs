//! Fake Toggl and Runn servers shared by the integration tests.

#![allow(dead_code)]

use chrono::NaiveDate;
use serde_json::{json, Value};
use timebridge_sync::{RunnClient, RunnConfig, TogglClient, TogglConfig};
use wiremock::matchers::{basic_auth, bearer_token, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TOGGL_TOKEN: &str = "toggl-token";
pub const WORKSPACE: &str = "5411215";
pub const CONTACT: &str = "ops@example.com";
pub const RUNN_KEY: &str = "runn-key";

pub fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 6).expect("date")
}

pub fn toggl(server: &MockServer) -> TogglClient {
    TogglClient::new(
        TogglConfig {
            base_url: server.uri(),
            api_token: TOGGL_TOKEN.to_string(),
            workspace_id: WORKSPACE.to_string(),
            user_agent: CONTACT.to_string(),
        },
        None,
    )
    .expect("toggl client")
}

pub fn runn(server: &MockServer) -> RunnClient {
    RunnClient::new(
        RunnConfig {
            base_url: format!("{}/", server.uri()),
            api_key: RUNN_KEY.to_string(),
        },
        None,
    )
    .expect("runn client")
}

/// Report with one project (pid 100) and the given `(uid, ms)` people.
pub fn report_body(people: &[(u64, i64)]) -> Value {
    let details: Vec<Value> = people
        .iter()
        .map(|(uid, ms)| {
            json!({
                "uid": uid,
                "title": {"user": format!("user-{uid}")},
                "totals": [null, null, null, null, null, null, null, ms]
            })
        })
        .collect();
    json!({"data": [{"pid": 100, "title": {"project": "Website"}, "details": details}]})
}

pub fn people_body() -> Value {
    json!([
        {"id": "p1", "name": "Grace", "role_id": "r1", "role": {"name": "Engineer"},
         "references": {"Custom1": {"external_id": "55"}}},
        {"id": "p2", "name": "Linus", "role_id": "r2", "role": {"name": "Designer"},
         "references": {"Custom1": {"external_id": "56"}}}
    ])
}

pub fn projects_body() -> Value {
    json!([
        {"id": "proj1", "name": "Website", "references": {"Custom1": {"external_id": "100"}}}
    ])
}

pub async fn mount_toggl_report(server: &MockServer, body: Value) {
    let since = day().format("%Y-%m-%d").to_string();
    Mock::given(method("GET"))
        .and(path("/reports/api/v2/weekly"))
        .and(basic_auth(TOGGL_TOKEN, "api_token"))
        .and(query_param("workspace_id", WORKSPACE))
        .and(query_param("user_agent", CONTACT))
        .and(query_param("since", since.as_str()))
        .and(query_param("until", since.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

pub async fn mount_runn_directories(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/v0/people"))
        .and(bearer_token(RUNN_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(people_body()))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v0/projects"))
        .and(bearer_token(RUNN_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(projects_body()))
        .mount(server)
        .await;
}

/// JSON bodies of every `POST /v0/actuals` the server saw.
pub async fn posted_actuals(server: &MockServer) -> Vec<Value> {
    server
        .received_requests()
        .await
        .expect("request recording enabled")
        .into_iter()
        .filter(|r| r.method.as_str() == "POST" && r.url.path() == "/v0/actuals")
        .map(|r| serde_json::from_slice(&r.body).expect("json body"))
        .collect()
}
