use axum::{
    extract::State,
    http::{Method, StatusCode},
    response::IntoResponse,
};
use serde_json::json;
use test_utils::{builder::TestBuilder, factory};

use super::*;
use crate::{
    model::event::{CommentPayloadDto, EventPayloadDto, RatingPayloadDto},
    server::{
        controller::{
            activity, event,
            extract::{JsonBody, PathParam},
        },
        error::AppError,
    },
};

fn payload(name: &str) -> EventPayloadDto {
    EventPayloadDto {
        name: name.to_string(),
        description: "Dim sum in Central".to_string(),
        time: "2017-01-18 15:00:00".to_string(),
        duration: json!(48),
        fee: json!("1000"),
        status: "upcoming".to_string(),
    }
}

/// Tests creating an event through the handler and reading the hosted list.
///
/// Expected: 201 with one formatted event hosted by the caller
#[tokio::test]
async fn creates_event_for_caller() -> Result<(), AppError> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let state = test_state(db, None);

    let host = factory::user::create_user(db).await?;

    let response = event::create_event(
        State(state.clone()),
        auth_headers(&state, host.id),
        Method::POST,
        PathParam(host.id),
        JsonBody(payload("Lunch")),
    )
    .await?
    .into_response();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    let events = body["events"].as_array().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["name"], "Lunch");
    assert_eq!(events[0]["time"], "Wednesday, January 18th 2017, 3:00:00 pm");
    assert_eq!(events[0]["duration"], "2 days");
    assert_eq!(events[0]["fee"], "HKD 1,000");
    assert_eq!(events[0]["hosts"][0]["id"], host.id);

    Ok(())
}

/// Tests that a member who does not host the event cannot edit it.
///
/// Expected: 403
#[tokio::test]
async fn forbids_update_by_non_host() -> Result<(), AppError> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let state = test_state(db, None);

    let host = factory::user::create_user(db).await?;
    let other = factory::user::create_user(db).await?;
    let created = factory::event::create_event(db, host.id).await?;

    let response = match event::update_event(
        State(state.clone()),
        auth_headers(&state, other.id),
        Method::PATCH,
        PathParam((other.id, created.id)),
        JsonBody(payload("Hijacked")),
    )
    .await
    {
        Ok(_) => panic!("non host updated the event"),
        Err(error) => error.into_response(),
    };

    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    Ok(())
}

/// Tests the public event listing.
///
/// Expected: 200 with every event
#[tokio::test]
async fn finds_all_events() -> Result<(), AppError> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let state = test_state(db, None);

    let host = factory::user::create_user(db).await?;
    factory::event::create_event(db, host.id).await?;
    factory::event::create_event(db, host.id).await?;

    let response = event::find_events(State(state)).await?.into_response();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["events"].as_array().map(Vec::len), Some(2));

    Ok(())
}

/// Tests joining twice, commenting and rating through the handlers.
///
/// Expected: second join refused, comment id returned, rating aggregate of one vote
#[tokio::test]
async fn joins_comments_and_rates() -> Result<(), AppError> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let state = test_state(db, None);

    let host = factory::user::create_user(db).await?;
    let guest = factory::user::create_user(db).await?;
    let created = factory::event::create_event(db, host.id).await?;

    let joined = activity::join_event(
        State(state.clone()),
        auth_headers(&state, guest.id),
        Method::POST,
        PathParam(created.id),
    )
    .await?
    .into_response();
    let body = body_json(joined).await;
    assert_eq!(body["eventId"], created.id);
    assert_eq!(body["userId"], guest.id);

    let again = activity::join_event(
        State(state.clone()),
        auth_headers(&state, guest.id),
        Method::POST,
        PathParam(created.id),
    )
    .await;
    assert!(matches!(again, Err(AppError::BadRequest(msg)) if msg == "You have already joined"));

    let commented = activity::create_comment(
        State(state.clone()),
        auth_headers(&state, guest.id),
        Method::POST,
        PathParam(created.id),
        JsonBody(CommentPayloadDto {
            title: None,
            comment: "See you there".to_string(),
        }),
    )
    .await?
    .into_response();
    assert_eq!(commented.status(), StatusCode::CREATED);
    assert!(body_json(commented).await["commentId"].is_i64());

    let rated = activity::rate_event(
        State(state.clone()),
        auth_headers(&state, guest.id),
        Method::POST,
        PathParam(created.id),
        JsonBody(RatingPayloadDto { rating: json!(4) }),
    )
    .await?
    .into_response();
    let body = body_json(rated).await;
    assert_eq!(body["rating"]["count"], 1);
    assert_eq!(body["rating"]["overall"], 4.0);

    Ok(())
}
