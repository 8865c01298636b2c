//! HTTP-level tests for the report endpoints.

use actix_web::{App, test};
use attendance_analytics::{config::Config, routes};
use serde_json::{Value, json};

fn test_config() -> Config {
    Config {
        server_addr: "127.0.0.1:0".to_string(),
        rate_reports_per_min: 1000,
        api_prefix: "/api/v1".to_string(),
    }
}

fn peer() -> std::net::SocketAddr {
    "127.0.0.1:40000".parse().unwrap()
}

fn sample_records() -> Value {
    json!({
        "records": [
            {
                "employee_code": "EMP-101",
                "employee_name": "Alice",
                "attendance_date": "2025-07-01",
                "start_day_time": "2025-07-01 09:00:00",
                "start_diff_meters": 50,
                "reason_start": "",
                "reason_end": ""
            },
            {
                "employee_code": "EMP-102",
                "employee_name": "Bob",
                "attendance_date": "2025-07-01",
                "start_day_time": "2025-07-01 09:30:00",
                "start_diff_meters": 50,
                "reason_start": "Outstation visit",
                "reason_end": ""
            }
        ]
    })
}

#[actix_web::test]
async fn full_report_happy_path() {
    let app = test::init_service(
        App::new().configure(|cfg| routes::configure(cfg, test_config())),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/reports")
        .peer_addr(peer())
        .set_json(sample_records())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["meta"]["record_count"], json!(2));
    assert_eq!(body["meta"]["employee_count"], json!(2));
    assert_eq!(body["classified"][0]["status"], json!("present"));
    assert_eq!(body["classified"][1]["status"], json!("outstation_late"));
    assert_eq!(body["calendar"]["columns"], json!(["01 Tue"]));
    assert_eq!(body["summaries"][0]["attendance_percent"], json!(100.0));
    assert_eq!(body["ranking"][0]["employee_code"], json!("EMP-101"));
    assert_eq!(body["dashboard"]["metrics"]["total_employees"], json!(2));
}

#[actix_web::test]
async fn missing_columns_are_rejected_by_name() {
    let app = test::init_service(
        App::new().configure(|cfg| routes::configure(cfg, test_config())),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/reports")
        .peer_addr(peer())
        .set_json(json!({
            "records": [
                { "employee_code": "EMP-101", "attendance_date": "2025-07-01" }
            ]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("missing required column"));
    assert!(message.contains("start_diff_meters"));
}

#[actix_web::test]
async fn csv_intake_produces_the_same_report_shape() {
    let app = test::init_service(
        App::new().configure(|cfg| routes::configure(cfg, test_config())),
    )
    .await;

    let csv = "\
employee_code,employee_name,attendance_date,start_day_time,start_diff_meters,reason_start,reason_end
EMP-101,Alice,2025-07-01,2025-07-01 09:00:00,50,,
EMP-102,Bob,2025-07-01,2025-07-01 08:00:00,Other Location,,
";
    let req = test::TestRequest::post()
        .uri("/api/v1/reports/csv")
        .peer_addr(peer())
        .insert_header(("content-type", "text/csv"))
        .set_payload(csv)
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["meta"]["record_count"], json!(2));
    assert_eq!(body["classified"][1]["status"], json!("late"));
    assert_eq!(
        body["classified"][1]["start_diff_meters"],
        json!("Other Location")
    );
}

#[actix_web::test]
async fn calendar_strategy_override_switches_the_tie_break() {
    let app = test::init_service(
        App::new().configure(|cfg| routes::configure(cfg, test_config())),
    )
    .await;

    let duplicate_day = json!({
        "records": [
            {
                "employee_code": "EMP-101",
                "employee_name": "Alice",
                "attendance_date": "2025-07-01",
                "start_day_time": "2025-07-01 10:00:00",
                "start_diff_meters": 50,
                "reason_start": "",
                "reason_end": ""
            },
            {
                "employee_code": "EMP-101",
                "employee_name": "Alice",
                "attendance_date": "2025-07-01",
                "start_day_time": "2025-07-01 09:00:00",
                "start_diff_meters": 50,
                "reason_start": "",
                "reason_end": ""
            }
        ]
    });

    let req = test::TestRequest::post()
        .uri("/api/v1/reports/calendar")
        .peer_addr(peer())
        .set_json(duplicate_day.clone())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["rows"][0]["cells"], json!(["late"]));

    let req = test::TestRequest::post()
        .uri("/api/v1/reports/calendar?strategy=last_wins")
        .peer_addr(peer())
        .set_json(duplicate_day)
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["rows"][0]["cells"], json!(["present"]));
}

#[actix_web::test]
async fn empty_batch_is_valid_input() {
    let app = test::init_service(
        App::new().configure(|cfg| routes::configure(cfg, test_config())),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/reports")
        .peer_addr(peer())
        .set_json(json!({ "records": [] }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["meta"]["record_count"], json!(0));
    assert_eq!(
        body["dashboard"]["metrics"]["overall_attendance_rate"],
        json!(null)
    );
}

#[actix_web::test]
async fn dashboard_endpoint_returns_metrics_and_daily_trend() {
    let app = test::init_service(
        App::new().configure(|cfg| routes::configure(cfg, test_config())),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/reports/dashboard")
        .peer_addr(peer())
        .set_json(sample_records())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["metrics"]["total_present_days"], json!(1));
    assert_eq!(body["metrics"]["total_late_days"], json!(1));
    assert_eq!(body["daily"][0]["date"], json!("2025-07-01"));
    assert_eq!(body["daily"][0]["present"], json!(1));
    assert_eq!(body["daily"][0]["outstation_late"], json!(1));
}
