//! Fake Launchpad API served by axum for integration tests

#![allow(dead_code)]

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub const OWNER: &str = "purple-vk-plugin";
pub const PPA: &str = "dev";

/// Collection pages hold one entry so every listing with two records paginates
const PAGE_SIZE: usize = 1;

/// One binary publication served by the fake
#[derive(Debug, Clone)]
pub struct FakeBinary {
    /// `series/arch`
    pub target: &'static str,
    pub name: &'static str,
    pub version: &'static str,
    pub status: &'static str,
    pub count: u64,
    pub daily: Vec<(String, u64)>,
}

impl FakeBinary {
    pub fn published(
        target: &'static str,
        name: &'static str,
        version: &'static str,
        count: u64,
        daily: &[(&str, u64)],
    ) -> Self {
        Self {
            target,
            name,
            version,
            status: "Published",
            count,
            daily: daily.iter().map(|(d, c)| (d.to_string(), *c)).collect(),
        }
    }
}

struct FakeState {
    base: String,
    binaries: Vec<FakeBinary>,
    reject_login: bool,
    requests: Mutex<Vec<String>>,
    unsigned_requests: Mutex<usize>,
}

/// Handle on a running fake server
pub struct FakeLaunchpad {
    pub base: String,
    state: Arc<FakeState>,
}

impl FakeLaunchpad {
    /// Requests seen so far as `path?query`
    pub fn requests(&self) -> Vec<String> {
        self.state.requests.lock().unwrap().clone()
    }

    /// Requests that arrived without anonymous OAuth credentials
    pub fn unsigned_requests(&self) -> usize {
        *self.state.unsigned_requests.lock().unwrap()
    }

    pub fn archive_link(&self) -> String {
        format!("{}/devel/~{}/+archive/ubuntu/{}", self.base, OWNER, PPA)
    }
}

/// Binaries used by most tests
pub fn sample_binaries() -> Vec<FakeBinary> {
    let nine_days: Vec<(String, u64)> = (1..=9)
        .map(|d| (format!("2013-11-{:02}", d), d as u64))
        .collect();
    let nine_days: Vec<(&str, u64)> = nine_days.iter().map(|(d, c)| (d.as_str(), *c)).collect();

    vec![
        FakeBinary::published(
            "precise/i386",
            "purple-vk-plugin",
            "0.9-1~precise",
            3,
            &[("2013-11-02", 2), ("2013-11-01", 1)],
        ),
        FakeBinary::published(
            "precise/amd64",
            "purple-vk-plugin",
            "0.9-1~precise",
            0,
            &[("2013-11-05", 1)],
        ),
        FakeBinary::published("saucy/amd64", "purple-vk-plugin", "0.9-1~saucy", 12, &nine_days),
        FakeBinary::published("saucy/amd64", "purple-vk-plugin-dbg", "0.9-1~saucy", 1, &[]),
        FakeBinary {
            target: "saucy/amd64",
            name: "purple-vk-plugin",
            version: "0.8-1~saucy",
            status: "Superseded",
            count: 40,
            daily: vec![("2013-10-01".to_string(), 40)],
        },
    ]
}

/// Stdout the report prints for [`sample_binaries`] with the default query space
pub fn sample_report() -> String {
    let mut lines = vec![
        "purple-vk-plugin: 0.9-1~precise i386: 3".to_string(),
        "2013-11-01: 1".to_string(),
        "2013-11-02: 2".to_string(),
        "2013-11-05: 1".to_string(),
        "purple-vk-plugin: 0.9-1~saucy amd64: 12".to_string(),
    ];
    lines.extend((3..=9).map(|d| format!("2013-11-{:02}: {}", d, d)));
    lines.push("purple-vk-plugin-dbg: 0.9-1~saucy amd64: 1".to_string());

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Bind on an ephemeral port and serve in the background
pub async fn start_fake_launchpad(binaries: Vec<FakeBinary>, reject_login: bool) -> FakeLaunchpad {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());

    let state = Arc::new(FakeState {
        base: base.clone(),
        binaries,
        reject_login,
        requests: Mutex::new(Vec::new()),
        unsigned_requests: Mutex::new(0),
    });

    let app = Router::new().fallback(handle).with_state(state.clone());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    FakeLaunchpad { base, state }
}

async fn handle(
    State(state): State<Arc<FakeState>>,
    headers: HeaderMap,
    uri: Uri,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let path = uri.path().to_string();
    state
        .requests
        .lock()
        .unwrap()
        .push(format!("{}?{}", path, uri.query().unwrap_or("")));

    let signed = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.starts_with("OAuth ") && v.contains("oauth_consumer_key="))
        .unwrap_or(false);
    if !signed {
        *state.unsigned_requests.lock().unwrap() += 1;
    }

    if state.reject_login {
        return (StatusCode::UNAUTHORIZED, "Unknown consumer").into_response();
    }

    let op = query.get("ws.op").map(String::as_str);
    let archive_path = format!("/devel/~{}/+archive/ubuntu/{}", OWNER, PPA);

    match (path.as_str(), op) {
        ("/devel/", None) => Json(json!({
            "resource_type_link": format!("{}/devel/#service-root", state.base),
            "people_collection_link": format!("{}/devel/people", state.base),
            "distributions_collection_link": format!("{}/devel/distros", state.base),
        }))
        .into_response(),
        (p, Some("getPPAByName")) if p == format!("/devel/~{}", OWNER) => {
            if query.get("name").map(String::as_str) == Some(PPA) {
                Json(json!({
                    "self_link": format!("{}{}", state.base, archive_path),
                    "displayname": "PPA for purple-vk-plugin",
                }))
                .into_response()
            } else {
                (StatusCode::BAD_REQUEST, "No such ppa").into_response()
            }
        }
        (p, Some(_)) if p.starts_with("/devel/~") && !p.starts_with(archive_path.as_str()) => {
            (StatusCode::NOT_FOUND, "Object: None").into_response()
        }
        (p, Some("getPublishedBinaries")) if p == archive_path => {
            published_binaries(&state, &archive_path, &query)
        }
        (p, Some(op)) if p.starts_with(&format!("{}/+binarypub/", archive_path)) => {
            let index: Option<usize> = p.rsplit('/').next().and_then(|i| i.parse().ok());
            match index.and_then(|i| state.binaries.get(i)) {
                Some(binary) if op == "getDownloadCount" => Json(json!(binary.count)).into_response(),
                Some(binary) if op == "getDailyDownloadTotals" => {
                    let daily: Map<String, Value> = binary
                        .daily
                        .iter()
                        .map(|(d, c)| (d.clone(), json!(c)))
                        .collect();
                    Json(Value::Object(daily)).into_response()
                }
                _ => StatusCode::NOT_FOUND.into_response(),
            }
        }
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

fn published_binaries(
    state: &FakeState,
    archive_path: &str,
    query: &HashMap<String, String>,
) -> Response {
    let das_prefix = format!("{}/devel/ubuntu/", state.base);
    let target = match query
        .get("distro_arch_series")
        .and_then(|das| das.strip_prefix(das_prefix.as_str()))
    {
        Some(target) => target.to_string(),
        None => return (StatusCode::BAD_REQUEST, "bad distro_arch_series").into_response(),
    };
    let status = query.get("status").cloned().unwrap_or_default();
    let start: usize = query
        .get("ws.start")
        .and_then(|s| s.parse().ok())
        .unwrap_or(0);

    let matching: Vec<(usize, &FakeBinary)> = state
        .binaries
        .iter()
        .enumerate()
        .filter(|(_, b)| b.target == target && b.status == status)
        .collect();

    let entries: Vec<Value> = matching
        .iter()
        .skip(start)
        .take(PAGE_SIZE)
        .map(|(i, b)| {
            json!({
                "self_link": format!("{}{}/+binarypub/{}", state.base, archive_path, i),
                "binary_package_name": b.name,
                "binary_package_version": b.version,
                "status": b.status,
            })
        })
        .collect();

    let mut page = json!({
        "start": start,
        "total_size": matching.len(),
        "entries": entries,
    });
    if start + PAGE_SIZE < matching.len() {
        page["next_collection_link"] = json!(format!(
            "{}{}?ws.op=getPublishedBinaries&status={}&distro_arch_series={}&ws.start={}",
            state.base,
            archive_path,
            urlencoding::encode(&status),
            urlencoding::encode(&format!("{}{}", das_prefix, target)),
            start + PAGE_SIZE
        ));
    }

    Json(page).into_response()
}
