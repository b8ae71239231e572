#![allow(unused_must_use)]
//! Event CRUD through the HTTP API.

use salvo::http::StatusCode;

use super::helpers::*;
use lazycal_test::core::model::Event;

fn book_club() -> serde_json::Value {
    json!({
        "title": "Book club",
        "description": "Bring snacks",
        "location": { "name": "Library" },
        "date": {
            "mode": "timeOfMonth",
            "weekPosition": "second",
            "weekdays": ["tuesday"]
        },
        "recurrence": { "frequency": "monthly" }
    })
}

/// ## Summary
/// A created event is listed, fetchable by id, and carries store-assigned
/// metadata.
#[test_log::test(tokio::test)]
async fn create_list_and_fetch() {
    let app = TestApp::new();

    let created: Event = app
        .send(TestRequest::post("/api/events").json_body(book_club()))
        .await
        .assert_status(StatusCode::CREATED)
        .json();
    assert_eq!(created.title, "Book club");
    assert_eq!(created.created_at, created.updated_at);

    let listed: Vec<Event> = app
        .send(TestRequest::get("/api/events"))
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(listed, vec![created.clone()]);

    let fetched: Event = app
        .send(TestRequest::get(&format!("/api/events/{}", created.id)))
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(fetched, created);
}

/// ## Summary
/// Listing preserves insertion order.
#[test_log::test(tokio::test)]
async fn list_keeps_insertion_order() {
    let app = TestApp::new();
    for title in ["first", "second", "third"] {
        app
            .send(TestRequest::post("/api/events").json_body(json!({
                "title": title,
                "date": { "mode": "exact", "start": "2024-05-01" }
            })))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let titles: Vec<String> = app
        .send(TestRequest::get("/api/events"))
        .await
        .json::<Vec<Event>>()
        .into_iter()
        .map(|event| event.title)
        .collect();
    assert_eq!(titles, ["first", "second", "third"]);
}

/// ## Summary
/// Events the generator could not expand are refused at the door.
#[test_log::test(tokio::test)]
async fn invalid_events_are_rejected() {
    let app = TestApp::new();

    for body in [
        json!({ "title": "", "date": { "mode": "exact", "start": "2024-05-01" } }),
        json!({
            "title": "no weekdays",
            "date": { "mode": "timeOfMonth", "weekPosition": "first", "weekdays": [] }
        }),
        json!({
            "title": "month out of range",
            "date": { "mode": "timeOfMonth", "weekPosition": "fourth", "weekdays": ["monday"] },
            "recurrence": { "frequency": "yearly", "month": 13 }
        }),
    ] {
        app
            .send(TestRequest::post("/api/events").json_body(body))
            .await
            .assert_status(StatusCode::BAD_REQUEST)
            .assert_body_contains("\"error\"");
    }

    let listed: Vec<Event> = app.send(TestRequest::get("/api/events")).await.json();
    assert!(listed.is_empty());
}

/// ## Summary
/// Records the generator can still expand are stored as given: an exact end
/// before its start, and a yearly pattern with no pinned month.
#[test_log::test(tokio::test)]
async fn unusual_but_expandable_events_are_accepted() {
    let app = TestApp::new();

    for body in [
        json!({
            "title": "backwards",
            "date": { "mode": "exact", "start": "2024-05-03", "end": "2024-05-01" }
        }),
        json!({
            "title": "yearly without month",
            "date": { "mode": "timeOfMonth", "weekPosition": "fourth", "weekdays": ["monday"] },
            "recurrence": { "frequency": "yearly" }
        }),
    ] {
        app.send(TestRequest::post("/api/events").json_body(body))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let listed: Vec<Event> = app.send(TestRequest::get("/api/events")).await.json();
    assert_eq!(listed.len(), 2);
}

/// ## Summary
/// PATCH changes only the named fields, clears on `null`, and keeps
/// `createdAt`.
#[test_log::test(tokio::test)]
async fn patch_updates_and_clears() {
    let app = TestApp::new();
    let created: Event = app
        .send(TestRequest::post("/api/events").json_body(book_club()))
        .await
        .json();

    let updated: Event = app
        .send(
            TestRequest::patch(&format!("/api/events/{}", created.id))
                .json_body(json!({ "description": null, "recurrence": null })),
        )
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.title, created.title);
    assert_eq!(updated.location, created.location);
    assert_eq!(updated.description, None);
    assert_eq!(updated.recurrence, None);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at >= created.updated_at);
}

/// ## Summary
/// A patch that would leave the event invalid is rejected and not stored.
#[test_log::test(tokio::test)]
async fn invalid_patch_is_rejected() {
    let app = TestApp::new();
    let created: Event = app
        .send(TestRequest::post("/api/events").json_body(book_club()))
        .await
        .json();

    app
        .send(
            TestRequest::patch(&format!("/api/events/{}", created.id))
                .json_body(json!({ "title": "   " })),
        )
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let fetched: Event = app
        .send(TestRequest::get(&format!("/api/events/{}", created.id)))
        .await
        .json();
    assert_eq!(fetched.title, "Book club");
}

/// ## Summary
/// Deleting twice reports 204 then 404.
#[test_log::test(tokio::test)]
async fn delete_is_reported_once() {
    let app = TestApp::new();
    let created: Event = app
        .send(TestRequest::post("/api/events").json_body(book_club()))
        .await
        .json();
    let path = format!("/api/events/{}", created.id);

    app
        .send(TestRequest::delete(&path))
        .await
        .assert_status(StatusCode::NO_CONTENT);
    app
        .send(TestRequest::delete(&path))
        .await
        .assert_status(StatusCode::NOT_FOUND);
    app
        .send(TestRequest::get(&path))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[test_log::test(tokio::test)]
async fn healthcheck() {
    TestApp::new()
        .send(TestRequest::get("/api/app/healthcheck"))
        .await
        .assert_status(StatusCode::OK)
        .assert_body_contains("OK");
}
