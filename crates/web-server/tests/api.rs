use analytics::{SensorReport, Thresholds};
use chrono::{NaiveDate, NaiveDateTime};
use configuration::Config;
use core_types::{NewGasReading, NewReading, SensorKind};
use database::{MemoryStore, SensorStore};
use renderer::{DocumentRenderer, RenderError};
use reqwest::StatusCode;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use std::sync::Arc;
use web_server::AppState;

fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
}

fn at(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

async fn spawn(state: AppState<MemoryStore>) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = web_server::router(Arc::new(state));
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/api")
}

async fn seeded_store() -> MemoryStore {
    let store = MemoryStore::new();
    let lpg = [(14, 18, 950), (12, 9, 400), (15, 7, 800), (12, 21, 812), (14, 6, 300), (1, 6, 999)];
    for (day, hour, value) in lpg {
        store
            .insert(NewReading::Gas(NewGasReading {
                timestamp: at(day, hour),
                lpg: Decimal::from(value),
                co: Decimal::from(20),
                smoke: Decimal::from(120),
                system_id: "1".to_string(),
            }))
            .await
            .unwrap();
    }
    store
}

fn state(store: MemoryStore) -> AppState<MemoryStore> {
    AppState::new(store, Config::default()).with_reference_date(reference_date())
}

#[tokio::test]
async fn health_reports_ok() {
    let base = spawn(state(MemoryStore::new())).await;
    let body: Value = reqwest::get(format!("{base}/health"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn readings_can_be_ingested_and_listed() {
    let base = spawn(state(MemoryStore::new())).await;
    let client = reqwest::Client::new();

    let created = client
        .post(format!("{base}/sensors/motion"))
        .json(&json!({
            "timestamp": "2024-03-15T08:00:00",
            "motion_detected": true,
            "intensity": 6.5,
            "system_id": "1"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);
    let created: Value = created.json().await.unwrap();
    assert_eq!(created["intensity"], json!(6.5));

    let all: Vec<Value> = client
        .get(format!("{base}/sensors/motion/all"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0]["id"], created["id"]);

    let latest: Value = client
        .get(format!("{base}/latest/motion"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(latest["id"], created["id"]);

    let missing = client.get(format!("{base}/latest/gas")).send().await.unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_payloads_and_dangling_references_are_rejected() {
    let base = spawn(state(MemoryStore::new())).await;
    let client = reqwest::Client::new();

    let wrong_shape = client
        .post(format!("{base}/sensors/particle"))
        .json(&json!({ "timestamp": "2024-03-15T08:00:00", "lpg": 1.0, "system_id": "1" }))
        .send()
        .await
        .unwrap();
    assert_eq!(wrong_shape.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let dangling = client
        .post(format!("{base}/sensors/camera"))
        .json(&json!({
            "timestamp": "2024-03-15T08:00:00",
            "image_path": "/uploads/img_1.jpg",
            "motion_id": "00000000-0000-0000-0000-000000000000",
            "latency_ms": 120,
            "system_id": "1"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(dangling.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let unknown = client.get(format!("{base}/sensors/sonar/all")).send().await.unwrap();
    assert_eq!(unknown.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn report_covers_the_last_seven_days() {
    let base = spawn(state(seeded_store().await)).await;

    let report: Value = reqwest::get(format!("{base}/sensors/gas/report/last7"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(report["label"], "09/03/2024 – 15/03/2024");
    assert_eq!(report["count"], 5);
    assert_eq!(report["risk"]["lpg"], json!(0.4));
    assert_eq!(report["risk"]["co"], json!(0.0));
    assert_eq!(report["stats"]["lpg"]["max"], json!(950.0));

    let ys: Vec<f64> = report["series"]["lpg"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["y"].as_f64().unwrap())
        .collect();
    assert_eq!(ys, vec![400.0, 812.0, 300.0, 950.0, 800.0]);
}

#[tokio::test]
async fn statistics_tolerate_empty_periods_but_reports_do_not() {
    let base = spawn(state(MemoryStore::new())).await;
    let client = reqwest::Client::new();

    let stats = client
        .get(format!("{base}/sensors/particle/statistics/today"))
        .send()
        .await
        .unwrap();
    assert_eq!(stats.status(), StatusCode::OK);
    let stats: Value = stats.json().await.unwrap();
    assert_eq!(stats["label"], "15/03/2024");
    assert_eq!(stats["stats"]["count"], 0);
    assert_eq!(stats["stats"]["pm2_5"]["mean"], Value::Null);

    let report = client
        .get(format!("{base}/sensors/particle/report/today"))
        .send()
        .await
        .unwrap();
    assert_eq!(report.status(), StatusCode::NOT_FOUND);

    let invalid = client
        .get(format!("{base}/sensors/particle/report/yesterday"))
        .send()
        .await
        .unwrap();
    assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn pdf_is_served_as_an_attachment() {
    let base = spawn(state(seeded_store().await)).await;

    let response = reqwest::get(format!("{base}/sensors/gas/pdf/month"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "application/pdf");
    assert_eq!(
        response.headers()["content-disposition"],
        "attachment; filename=gas_report_month.pdf"
    );
    let bytes = response.bytes().await.unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

struct BrokenRenderer;

impl DocumentRenderer for BrokenRenderer {
    fn render(
        &self,
        _kind: SensorKind,
        _report: &SensorReport,
        _thresholds: Option<&Thresholds>,
    ) -> Result<Vec<u8>, RenderError> {
        Err(RenderError::Pdf("out of paper".to_string()))
    }

    fn content_type(&self) -> &'static str {
        "application/pdf"
    }

    fn extension(&self) -> &'static str {
        "pdf"
    }
}

#[tokio::test]
async fn render_failures_do_not_take_the_server_down() {
    let state = state(seeded_store().await).with_renderer(Arc::new(BrokenRenderer));
    let base = spawn(state).await;

    let failed = reqwest::get(format!("{base}/sensors/gas/pdf/today")).await.unwrap();
    assert_eq!(failed.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let healthy = reqwest::get(format!("{base}/health")).await.unwrap();
    assert_eq!(healthy.status(), StatusCode::OK);
}
