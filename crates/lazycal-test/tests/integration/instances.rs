#![allow(unused_must_use)]
//! The instance query: recurrence expansion through the HTTP API.

use chrono::{NaiveDate, Utc};
use salvo::http::StatusCode;

use super::helpers::*;
use lazycal_test::core::model::{
    EventDate, NewEvent, RecurrenceRule, WeekPosition,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

async fn post(app: &TestApp, event: serde_json::Value) {
    app.send(TestRequest::post("/api/events").json_body(event))
        .await
        .assert_status(StatusCode::CREATED);
}

/// ## Summary
/// Events created over HTTP come back as one date-sorted instance list.
#[test_log::test(tokio::test)]
async fn month_view_merges_all_events() {
    let app = TestApp::new();
    post(
        &app,
        json!({ "title": "dentist", "date": { "mode": "exact", "start": "2024-03-20" } }),
    )
    .await;
    post(
        &app,
        json!({
            "title": "rent",
            "date": { "mode": "exact", "start": "2023-11-05" },
            "recurrence": { "frequency": "monthly" }
        }),
    )
    .await;
    post(
        &app,
        json!({
            "title": "book club",
            "date": { "mode": "timeOfMonth", "weekPosition": "second", "weekdays": ["tuesday"] },
            "recurrence": { "frequency": "monthly" }
        }),
    )
    .await;

    let response = app
        .send(TestRequest::get("/api/instances?year=2024&month=3"))
        .await
        .assert_status(StatusCode::OK);

    assert_eq!(
        response.instance_dates(),
        ["2024-03-05", "2024-03-12", "2024-03-20"]
    );
    let instances: Vec<serde_json::Value> = response.json();
    assert_eq!(instances[1]["event"]["title"], "book club");
    assert_eq!(instances[1]["event"]["date"]["mode"], "timeOfMonth");
}

/// ## Summary
/// Multi-day events report their shifted end on every instance.
#[test_log::test(tokio::test)]
async fn spanning_event_carries_instance_end() {
    let app = TestApp::new();
    post(
        &app,
        json!({
            "title": "retreat",
            "date": { "mode": "exact", "start": "2024-01-30", "end": "2024-02-02" },
            "recurrence": { "frequency": "yearly" }
        }),
    )
    .await;

    let instances: Vec<serde_json::Value> = app
        .send(TestRequest::get(
            "/api/instances?start=2024-01-01&end=2025-12-31",
        ))
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(instances.len(), 2);
    assert_eq!(instances[0]["instanceDate"], "2024-01-30");
    assert_eq!(instances[0]["instanceEnd"], "2024-02-02");
    assert_eq!(instances[1]["instanceDate"], "2025-01-30");
    assert_eq!(instances[1]["instanceEnd"], "2025-02-02");
}

/// ## Summary
/// Stored records the generator cannot expand are skipped without failing
/// the query.
#[test_log::test(tokio::test)]
async fn malformed_records_are_skipped() {
    let now = Utc::now();
    let no_weekdays = NewEvent::new(
        "broken",
        EventDate::time_of_month(WeekPosition::Fourth, Vec::new()),
    )
    .with_recurrence(RecurrenceRule::monthly());
    let legacy = NewEvent::new(
        "legacy",
        EventDate::Exact {
            start: None,
            end: None,
        },
    );
    let good = NewEvent::new("good", EventDate::on(date(2024, 6, 14)));

    let app = TestApp::seeded(vec![
        no_weekdays.into_event(now),
        legacy.into_event(now),
        good.into_event(now),
    ]);

    let response = app
        .send(TestRequest::get("/api/instances?year=2024&month=6"))
        .await
        .assert_status(StatusCode::OK);
    assert_eq!(response.instance_dates(), ["2024-06-14"]);
}

/// ## Summary
/// Editing a recurring event changes every future query; nothing is cached.
#[test_log::test(tokio::test)]
async fn edits_are_visible_on_next_query() {
    let app = TestApp::new();
    let created: serde_json::Value = app
        .send(TestRequest::post("/api/events").json_body(json!({
            "title": "standup",
            "date": { "mode": "timeOfMonth", "weekPosition": "first", "weekdays": ["monday"] },
            "recurrence": { "frequency": "monthly" }
        })))
        .await
        .json();
    let id = created["id"].as_str().expect("id is a string").to_string();

    let before = app
        .send(TestRequest::get("/api/instances?year=2024&month=7"))
        .await;
    assert_eq!(before.instance_dates(), ["2024-07-01"]);

    app.send(
        TestRequest::patch(&format!("/api/events/{id}")).json_body(json!({
            "date": { "mode": "timeOfMonth", "weekPosition": "fourth", "weekdays": ["monday"] }
        })),
    )
    .await
    .assert_status(StatusCode::OK);

    let after = app
        .send(TestRequest::get("/api/instances?year=2024&month=7"))
        .await;
    assert_eq!(after.instance_dates(), ["2024-07-22"]);

    app.send(TestRequest::delete(&format!("/api/events/{id}")))
        .await
        .assert_status(StatusCode::NO_CONTENT);
    let gone = app
        .send(TestRequest::get("/api/instances?year=2024&month=7"))
        .await;
    assert!(gone.instance_dates().is_empty());
}

/// ## Summary
/// A yearly pattern without a pinned month repeats in the month the query
/// window starts in.
#[test_log::test(tokio::test)]
async fn yearly_pattern_without_month() {
    let app = TestApp::new();
    post(
        &app,
        json!({
            "title": "festival",
            "date": { "mode": "timeOfMonth", "weekPosition": "third", "weekdays": ["friday"] },
            "recurrence": { "frequency": "yearly" }
        }),
    )
    .await;

    let response = app
        .send(TestRequest::get(
            "/api/instances?start=2024-06-01&end=2026-12-31",
        ))
        .await
        .assert_status(StatusCode::OK);
    assert_eq!(
        response.instance_dates(),
        ["2024-06-21", "2025-06-20", "2026-06-19"]
    );
}

#[test_log::test(tokio::test)]
async fn bad_window_parameters() {
    let app = TestApp::new();
    for path in [
        "/api/instances",
        "/api/instances?end=2024-01-31",
        "/api/instances?start=2024-02-30&end=2024-03-31",
        "/api/instances?year=2024&month=0",
    ] {
        app.send(TestRequest::get(path))
            .await
            .assert_status(StatusCode::BAD_REQUEST)
            .assert_body_contains("\"error\"");
    }
}
