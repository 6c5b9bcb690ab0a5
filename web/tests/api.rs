//! HTTP round-trip tests for the ledger surface.

#![allow(clippy::unwrap_used)]

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::{Value, json};
use ticketline_web::{AppState, router};
use uuid::Uuid;

fn server() -> TestServer {
    TestServer::new(router(AppState::new())).unwrap()
}

fn caller(id: Uuid) -> (HeaderName, HeaderValue) {
    (
        HeaderName::from_static("x-caller-id"),
        HeaderValue::from_str(&id.to_string()).unwrap(),
    )
}

async fn create_event(server: &TestServer, organizer: Uuid, price: u64, total: u32) -> u64 {
    let (name, value) = caller(organizer);
    let response = server
        .post("/api/events")
        .add_header(name, value)
        .json(&json!({
            "name": "Rust Meetup",
            "price": price,
            "total_tickets": total,
            "metadata_cid": "QmMeetup",
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()["event_id"].as_u64().unwrap()
}

#[tokio::test]
async fn health_is_alive() {
    let server = server();
    let response = server.get("/health").await;
    response.assert_status(StatusCode::OK);
}

#[tokio::test]
async fn create_buy_and_query_roundtrip() {
    let server = server();
    let organizer = Uuid::new_v4();
    let buyer = Uuid::new_v4();

    let event_id = create_event(&server, organizer, 5000, 2).await;

    let (name, value) = caller(buyer);
    let bought = server
        .post(&format!("/api/events/{event_id}/tickets"))
        .add_header(name, value)
        .json(&json!({ "payment": 5000 }))
        .await;
    bought.assert_status(StatusCode::CREATED);
    let ticket_id = bought.json::<Value>()["ticket_id"].as_u64().unwrap();

    let event = server.get(&format!("/api/events/{event_id}")).await;
    event.assert_status(StatusCode::OK);
    let event = event.json::<Value>();
    assert_eq!(event["available_tickets"], 1);
    assert_eq!(event["escrowed_balance"], 5000);

    let ticket = server.get(&format!("/api/tickets/{ticket_id}")).await;
    ticket.assert_status(StatusCode::OK);
    let ticket = ticket.json::<Value>();
    assert_eq!(ticket["owner"], buyer.to_string());
    assert_eq!(ticket["is_used"], false);

    let (name, value) = caller(buyer);
    let mine = server.get("/api/my/tickets").add_header(name, value).await;
    assert_eq!(mine.json::<Value>()["ticket_ids"], json!([ticket_id]));
}

#[tokio::test]
async fn payment_mismatch_maps_to_402() {
    let server = server();
    let organizer = Uuid::new_v4();
    let buyer = Uuid::new_v4();
    let event_id = create_event(&server, organizer, 5000, 2).await;

    let (name, value) = caller(buyer);
    let response = server
        .post(&format!("/api/events/{event_id}/tickets"))
        .add_header(name, value)
        .json(&json!({ "payment": 4900 }))
        .await;
    response.assert_status(StatusCode::PAYMENT_REQUIRED);
    assert_eq!(response.json::<Value>()["code"], "PAYMENT_MISMATCH");
}

#[tokio::test]
async fn missing_caller_header_is_rejected() {
    let server = server();
    let response = server
        .post("/api/events")
        .json(&json!({
            "name": "No Caller",
            "price": 100,
            "total_tickets": 1,
            "metadata_cid": "QmNobody",
        }))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<Value>()["code"], "UNAUTHENTICATED");
}

#[tokio::test]
async fn non_organizer_cannot_cancel() {
    let server = server();
    let organizer = Uuid::new_v4();
    let intruder = Uuid::new_v4();
    let event_id = create_event(&server, organizer, 100, 5).await;

    let (name, value) = caller(intruder);
    let response = server
        .post(&format!("/api/events/{event_id}/cancel"))
        .add_header(name, value)
        .await;
    response.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(response.json::<Value>()["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn unknown_records_map_to_404() {
    let server = server();
    server
        .get("/api/events/999")
        .await
        .assert_status(StatusCode::NOT_FOUND);
    server
        .get("/api/tickets/999")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn cancel_refund_flow_over_http() {
    let server = server();
    let organizer = Uuid::new_v4();
    let holder = Uuid::new_v4();
    let event_id = create_event(&server, organizer, 50, 2).await;

    let (name, value) = caller(holder);
    let bought = server
        .post(&format!("/api/events/{event_id}/tickets"))
        .add_header(name, value)
        .json(&json!({ "payment": 50 }))
        .await;
    let ticket_id = bought.json::<Value>()["ticket_id"].as_u64().unwrap();

    let (name, value) = caller(organizer);
    server
        .post(&format!("/api/events/{event_id}/cancel"))
        .add_header(name, value)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let (name, value) = caller(holder);
    let refunded = server
        .post(&format!("/api/tickets/{ticket_id}/refund"))
        .add_header(name, value)
        .await;
    refunded.assert_status(StatusCode::OK);
    assert_eq!(refunded.json::<Value>()["refund"], 50);

    // A second claim conflicts
    let (name, value) = caller(holder);
    let again = server
        .post(&format!("/api/tickets/{ticket_id}/refund"))
        .add_header(name, value)
        .await;
    again.assert_status(StatusCode::CONFLICT);
    assert_eq!(again.json::<Value>()["code"], "INVALID_STATE");
}

#[tokio::test]
async fn seeded_ledger_serves_injected_timestamps() {
    let (ledger, _organizer, event_id) = ticketline_testing::fixtures::seeded(500, 3);
    let server = TestServer::new(router(AppState::with_ledger(ledger))).unwrap();

    let response = server
        .get(&format!("/api/events/{}", event_id.value()))
        .await;
    response.assert_status(StatusCode::OK);
    let event = response.json::<Value>();
    assert_eq!(event["name"], "Fixture Event");
    assert_eq!(event["price"], 500);

    let created_at = event["created_at"]
        .as_str()
        .unwrap()
        .parse::<chrono::DateTime<chrono::Utc>>()
        .unwrap();
    assert_eq!(created_at, ticketline_testing::fixtures::base_time());
}

#[tokio::test]
async fn journal_feed_pages_by_offset() {
    let server = server();
    let organizer = Uuid::new_v4();
    let buyer = Uuid::new_v4();
    let event_id = create_event(&server, organizer, 100, 3).await;

    let (name, value) = caller(buyer);
    server
        .post(&format!("/api/events/{event_id}/tickets"))
        .add_header(name, value)
        .json(&json!({ "payment": 100 }))
        .await
        .assert_status(StatusCode::CREATED);

    let full = server.get("/api/journal").await.json::<Value>();
    assert_eq!(full.as_array().unwrap().len(), 2);

    let tail = server.get("/api/journal?since=1").await.json::<Value>();
    let tail = tail.as_array().unwrap();
    assert_eq!(tail.len(), 1);
    assert!(tail[0].get("TicketPurchased").is_some());

    let stats = server.get("/api/stats").await.json::<Value>();
    assert_eq!(stats["event_count"], 1);
    assert_eq!(stats["ticket_count"], 1);
}
