use crate::e2e::helpers;

use helpers::assertions::{assert_item_response, assert_progress};
use helpers::{items, row, TestContext};
use hyper::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_start_with_an_empty_batch(ctx: &TestContext) {
    let response = ctx.client.get("/api/batch").await.unwrap();

    response.assert_status(StatusCode::OK);
    let body = response.body.as_ref().unwrap();
    assert!(items(body).is_empty());
    assert_progress(body, 0, 0, 0, 0);
    assert_eq!(body.pointer("/run/running"), Some(&json!(false)));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_load_valid_rows_and_skip_incomplete_ones(ctx: &TestContext) {
    let response = ctx
        .client
        .post(
            "/api/batch",
            &json!([
                row("1", "Neo", "v1", "Hello"),
                row("2", "", "v1", "No speaker"),
                row("3", "Trinity", "", "No voice"),
                row("4", "Morpheus", "v2", "   "),
                row("5", "Trinity", "v2", "Follow the white rabbit"),
            ]),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::CREATED);
    let body = response.body.as_ref().unwrap();
    assert_eq!(body.get("accepted"), Some(&json!(2)));
    assert_eq!(body.get("skipped"), Some(&json!(3)));

    let batch = ctx.client.get("/api/batch").await.unwrap();
    let batch = batch.body.as_ref().unwrap();
    let items = items(batch);
    assert_eq!(items.len(), 2);
    assert_item_response(&items[0], "Neo", "pending");
    assert_item_response(&items[1], "Trinity", "pending");
    assert_eq!(items[0].get("position"), Some(&json!(0)));
    assert_eq!(items[1].get("shot"), Some(&json!("5")));
    assert_progress(batch, 2, 0, 0, 2);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_keep_optional_emotion_and_ignore_unknown_columns(ctx: &TestContext) {
    ctx.load(&[json!({
        "Shot Number": "7",
        "Character": "Oracle",
        "voice_id": "v9",
        "text": "Cookie?",
        "emotion": "warm",
        "Notes": "ignored"
    })])
    .await;

    let batch = ctx.client.get("/api/batch").await.unwrap();
    let item = &items(batch.body.as_ref().unwrap())[0];
    assert_eq!(item.get("emotion"), Some(&json!("warm")));
    assert!(item.get("Notes").is_none());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_a_script_without_valid_rows(ctx: &TestContext) {
    ctx.load(&[row("1", "Neo", "v1", "Hello")]).await;

    let response = ctx
        .client
        .post("/api/batch", &json!([row("1", "", "", "")]))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("no valid rows");

    // The previous batch survives
    let batch = ctx.client.get("/api/batch").await.unwrap();
    assert_eq!(items(batch.body.as_ref().unwrap()).len(), 1);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_a_body_that_is_not_a_list_of_records(ctx: &TestContext) {
    let response = ctx
        .client
        .post("/api/batch", &json!({"Character": "Neo"}))
        .await
        .unwrap();

    assert!(response.status.is_client_error());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_replace_the_batch_on_a_new_script(ctx: &TestContext) {
    ctx.load(&[row("1", "Neo", "v1", "Hello")]).await;
    ctx.run_to_completion().await;
    assert_eq!(ctx.audio.live_count(), 1);

    ctx.load(&[
        row("1", "Smith", "v3", "Mister Anderson"),
        row("2", "Neo", "v1", "My name is Neo"),
    ])
    .await;

    let batch = ctx.client.get("/api/batch").await.unwrap();
    let batch = batch.body.as_ref().unwrap();
    assert_progress(batch, 2, 0, 0, 2);
    assert_item_response(&items(batch)[0], "Smith", "pending");
    assert_eq!(ctx.audio.live_count(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_clear_the_batch_and_release_audio(ctx: &TestContext) {
    ctx.load(&[row("1", "Neo", "v1", "Hello")]).await;
    ctx.run_to_completion().await;

    let response = ctx.client.delete("/api/batch").await.unwrap();
    response.assert_status(StatusCode::NO_CONTENT);

    let batch = ctx.client.get("/api/batch").await.unwrap();
    assert!(items(batch.body.as_ref().unwrap()).is_empty());
    assert_eq!(ctx.audio.live_count(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_not_found_for_unknown_item_audio(ctx: &TestContext) {
    let response = ctx
        .client
        .get("/api/batch/items/00000000-0000-0000-0000-000000000000/audio")
        .await
        .unwrap();

    response
        .assert_status(StatusCode::NOT_FOUND)
        .assert_error_message("not found");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_not_found_for_pending_item_audio(ctx: &TestContext) {
    ctx.load(&[row("1", "Neo", "v1", "Hello")]).await;

    let batch = ctx.client.get("/api/batch").await.unwrap();
    let id = items(batch.body.as_ref().unwrap())[0]
        .get("id")
        .and_then(|v| v.as_str())
        .unwrap()
        .to_string();

    let response = ctx
        .client
        .get(&format!("/api/batch/items/{}/audio", id))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::NOT_FOUND)
        .assert_error_message("no audio");
}
