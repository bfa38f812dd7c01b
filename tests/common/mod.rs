#![allow(dead_code)]

use axum::{extract::State, http::StatusCode, routing::get, Router};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
pub struct Reply {
    pub status: u16,
    pub body: String,
}

impl Reply {
    pub fn ok(body: Value) -> Self {
        Self {
            status: 200,
            body: body.to_string(),
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: "upstream exploded".to_string(),
        }
    }
}

/// Scriptable stand-in for the two statistics endpoints.
#[derive(Clone)]
pub struct MockUpstream {
    pub trend: Arc<Mutex<Reply>>,
    pub area: Arc<Mutex<Reply>>,
}

impl MockUpstream {
    pub fn new() -> Self {
        Self {
            trend: Arc::new(Mutex::new(Reply::ok(trend_payload()))),
            area: Arc::new(Mutex::new(Reply::ok(area_payload()))),
        }
    }

    pub fn set_trend(&self, reply: Reply) {
        *self.trend.lock().unwrap() = reply;
    }

    pub fn set_area(&self, reply: Reply) {
        *self.area.lock().unwrap() = reply;
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/trend", get(serve_trend))
            .route("/area", get(serve_area))
            .with_state(self.clone())
    }
}

fn respond(reply: &Mutex<Reply>) -> (StatusCode, String) {
    let reply = reply.lock().unwrap().clone();
    (
        StatusCode::from_u16(reply.status).unwrap(),
        reply.body,
    )
}

async fn serve_trend(State(mock): State<MockUpstream>) -> (StatusCode, String) {
    respond(&mock.trend)
}

async fn serve_area(State(mock): State<MockUpstream>) -> (StatusCode, String) {
    respond(&mock.area)
}

/// Serves `router` on a random local port inside the current runtime.
pub async fn serve(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

pub fn unique_path(tag: &str, ext: &str) -> PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("ncov_{tag}_{}_{nanos}.{ext}", std::process::id()));
    path
}

pub fn trend_payload() -> Value {
    json!({
        "data": {
            "wuwei_ww_cn_day_counts": [
                {"date": "1/24", "confirm": 830, "suspect": 1072, "dead": 25, "heal": 34},
                {"date": "1/23", "confirm": 100, "suspect": 50, "dead": 2, "heal": 5},
                {"date": "1/9", "confirm": 41, "suspect": 0, "dead": 1, "heal": 0}
            ],
            "wuwei_ww_global_vars": [
                {
                    "confirmCount": 17238,
                    "suspectCount": 21558,
                    "deadCount": 361,
                    "cure": 475,
                    "update_time": "2020-02-03 08:50:12"
                }
            ]
        }
    })
}

pub fn area_payload() -> Value {
    json!({
        "data": {
            "getAreaStat": [
                {
                    "provinceName": "湖北省",
                    "provinceShortName": "湖北",
                    "confirmedCount": 1000,
                    "suspectedCount": 0,
                    "curedCount": 30,
                    "deadCount": 40,
                    "cities": [
                        {"cityName": "武汉", "confirmedCount": 800, "suspectedCount": 0, "curedCount": 25, "deadCount": 38},
                        {"cityName": "孝感", "confirmedCount": 200, "suspectedCount": 0, "curedCount": 5, "deadCount": 2}
                    ]
                },
                {
                    "provinceName": "北京市",
                    "provinceShortName": "北京",
                    "confirmedCount": 212,
                    "suspectedCount": 0,
                    "curedCount": 12,
                    "deadCount": 1,
                    "cities": [
                        {"cityName": "朝阳区", "confirmedCount": 40, "suspectedCount": 0, "curedCount": 0, "deadCount": 0}
                    ]
                },
                {
                    "provinceName": "西藏自治区",
                    "provinceShortName": "西藏",
                    "confirmedCount": 1,
                    "suspectedCount": 0,
                    "curedCount": 0,
                    "deadCount": 0
                }
            ]
        }
    })
}
