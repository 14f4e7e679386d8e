use crate::app_context;
use crate::cli::tests::fake_args;
use crate::cli::Args;
use crate::commands::consts::{USAGE_MESSAGE, WAIT_MESSAGE};
use crate::commands::requests::SlashCommand;
use crate::commands::responses::{
    SlashCommandResponse, VerificationError, VerificationFailureReason,
};
use crate::commands::signature;
use crate::commands::tests::command;
use crate::http::{self, router};
use crate::jobs::broker::{self, JobBroker, JobConsumer};
use crate::jobs::models::Job;
use axum::body::Bytes;
use axum::http::header::{HeaderName, HeaderValue};
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use axum_test::{TestRequest, TestServer};
use std::time::Duration;
use std::time::{SystemTime, UNIX_EPOCH};
use url::form_urlencoded;

const SIGNING_SECRET: &str = "testSigningSecret";

pub fn test_server_with(args: Args) -> (TestServer, JobConsumer, JobBroker) {
    let (broker, consumer) = broker::channel(args.job_queue_capacity);
    let app_context = app_context::init(&args, broker.clone());
    let router = router::new(&args, app_context);
    let server = TestServer::new(router).expect("Failed to run test server.");
    (server, consumer, broker)
}

pub fn test_server() -> (TestServer, JobConsumer, JobBroker) {
    test_server_with(fake_args())
}

fn signed_server() -> (TestServer, JobConsumer, JobBroker) {
    let mut args = fake_args();
    args.signing_secret = Some(String::from(SIGNING_SECRET));
    test_server_with(args)
}

fn form_body(command: &SlashCommand) -> Bytes {
    let mut form = form_urlencoded::Serializer::new(String::new());
    form.append_pair("token", &command.token)
        .append_pair("command", &command.command)
        .append_pair("text", &command.text)
        .append_pair("user_id", &command.user_id)
        .append_pair("response_url", &command.response_url);
    Bytes::from(form.finish())
}

fn post_command(server: &TestServer, body: Bytes) -> TestRequest {
    server
        .post("/slack/commands")
        .content_type("application/x-www-form-urlencoded")
        .bytes(body)
}

fn header(name: &'static str, value: &str) -> (HeaderName, HeaderValue) {
    (
        HeaderName::from_static(name),
        HeaderValue::from_str(value).unwrap(),
    )
}

fn now() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs()
        .to_string()
}

fn rejection(reason: VerificationFailureReason) -> VerificationError {
    VerificationError {
        error: true,
        reason,
    }
}

#[tokio::test]
async fn test_help_is_answered_with_usage() {
    let (server, mut consumer, _broker) = test_server();

    let response = server.post("/slack/commands").form(&command("help")).await;

    response.assert_status_ok();
    response.assert_json(&SlashCommandResponse::ephemeral(USAGE_MESSAGE));
    assert!(consumer.try_consume_job().is_none());
}

#[tokio::test]
async fn test_keyword_is_deferred() {
    let (server, mut consumer, _broker) = test_server();

    let response = server.post("/slack/commands").form(&command("cute cat")).await;

    response.assert_status_ok();
    response.assert_json(&serde_json::json!({
        "response_type": "ephemeral",
        "text": WAIT_MESSAGE,
    }));
    match consumer.try_consume_job() {
        Some(Job::GenerateLgtm { command: queued, .. }) => assert_eq!(queued.text, "cute cat"),
        other => panic!("unexpected job: {other:?}"),
    }
}

#[tokio::test]
async fn test_wrong_token_is_rejected() {
    let (server, mut consumer, _broker) = test_server();
    let mut forged = command("cat");
    forged.token = String::from("forged");

    let response = server.post("/slack/commands").form(&forged).await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    response.assert_json(&rejection(VerificationFailureReason::InvalidToken));
    assert!(consumer.try_consume_job().is_none());
}

#[tokio::test]
async fn test_unknown_command_is_rejected() {
    let (server, _consumer, _broker) = test_server();
    let mut other = command("cat");
    other.command = String::from("/shipit");

    let response = server.post("/slack/commands").form(&other).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&rejection(VerificationFailureReason::UnknownCommand));
}

#[tokio::test]
async fn test_malformed_body_is_rejected() {
    let (server, _consumer, _broker) = test_server();

    let response = post_command(&server, Bytes::from_static(b"token=verification-token")).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&rejection(VerificationFailureReason::MalformedBody));
}

#[tokio::test]
async fn test_retry_is_a_no_op() {
    let (server, mut consumer, _broker) = test_server();
    let (name, value) = header("x-slack-retry-num", "1");

    let response = server
        .post("/slack/commands")
        .add_header(name, value)
        .form(&command("cat"))
        .await;

    response.assert_status_ok();
    response.assert_text("");
    assert!(consumer.try_consume_job().is_none());
}

#[tokio::test]
async fn test_signed_request_is_accepted() {
    let (server, mut consumer, _broker) = signed_server();
    let body = form_body(&command("cat"));
    let timestamp = now();
    let sent = signature::sign(SIGNING_SECRET, &timestamp, &body);
    let (ts_name, ts_value) = header("x-slack-request-timestamp", &timestamp);
    let (sig_name, sig_value) = header("x-slack-signature", &sent);

    let response = post_command(&server, body)
        .add_header(ts_name, ts_value)
        .add_header(sig_name, sig_value)
        .await;

    response.assert_status_ok();
    assert!(consumer.try_consume_job().is_some());
}

#[tokio::test]
async fn test_unsigned_request_is_rejected_when_a_secret_is_set() {
    let (server, mut consumer, _broker) = signed_server();

    let response = post_command(&server, form_body(&command("cat"))).await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    response.assert_json(&rejection(VerificationFailureReason::MissingSignature));
    assert!(consumer.try_consume_job().is_none());
}

#[tokio::test]
async fn test_bad_signature_is_rejected() {
    let (server, _consumer, _broker) = signed_server();
    let timestamp = now();
    let sent = signature::sign("someOtherSecret", &timestamp, &form_body(&command("cat")));
    let (ts_name, ts_value) = header("x-slack-request-timestamp", &timestamp);
    let (sig_name, sig_value) = header("x-slack-signature", &sent);

    let response = post_command(&server, form_body(&command("cat")))
        .add_header(ts_name, ts_value)
        .add_header(sig_name, sig_value)
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    response.assert_json(&rejection(VerificationFailureReason::InvalidSignature));
}

#[tokio::test]
async fn test_replayed_request_is_rejected() {
    let (server, _consumer, _broker) = signed_server();
    let body = form_body(&command("cat"));
    let sent = signature::sign(SIGNING_SECRET, "1531420618", &body);
    let (ts_name, ts_value) = header("x-slack-request-timestamp", "1531420618");
    let (sig_name, sig_value) = header("x-slack-signature", &sent);

    let response = post_command(&server, body)
        .add_header(ts_name, ts_value)
        .add_header(sig_name, sig_value)
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    response.assert_json(&rejection(VerificationFailureReason::StaleRequest));
}

#[tokio::test]
async fn test_full_queue_still_answers() {
    let mut args = fake_args();
    args.job_queue_capacity = 1;
    let (server, _consumer, _broker) = test_server_with(args);

    server.post("/slack/commands").form(&command("cat")).await.assert_status_ok();
    let response = server.post("/slack/commands").form(&command("dog")).await;

    response.assert_status_ok();
    let answer: SlashCommandResponse = response.json();
    assert_ne!(answer.text, WAIT_MESSAGE);
}

#[tokio::test]
async fn test_slow_handler_times_out() {
    let mut args = fake_args();
    args.ack_timeout_ms = 20;
    let router = Router::new()
        .route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "late"
            }),
        )
        .layer(http::init(&args));
    let server = TestServer::new(router).expect("Failed to run test server.");

    let response = server.get("/slow").await;

    response.assert_status(StatusCode::REQUEST_TIMEOUT);
}
