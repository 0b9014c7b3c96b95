//! Wire-level tests against a mock LORIS endpoint.

use httpmock::prelude::*;
use lorimir_api::records::CandidateList;
use lorimir_api::{Credentials, Error, Session};
use serde_json::json;

fn credentials() -> Credentials {
    Credentials {
        username: "alice".into(),
        password: "sesame".into(),
    }
}

async fn login(server: &MockServer) -> Session {
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/login")
            .json_body(json!({"username": "alice", "password": "sesame"}));
        then.status(200).json_body(json!({"token": "tok-1"}));
    });
    let session = Session::login(&server.url(""), &credentials())
        .await
        .unwrap();
    mock.assert();
    session
}

#[tokio::test]
async fn login_attaches_bearer_token_to_requests() {
    let server = MockServer::start();
    let session = login(&server).await;

    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/candidates")
            .header("authorization", "Bearer tok-1");
        then.status(200).json_body(json!({"Candidates": []}));
    });

    let listing: CandidateList = session.get_json("candidates").await.unwrap();
    assert!(listing.candidates.is_empty());
    mock.assert();
}

#[tokio::test]
async fn rejected_login_carries_the_response_body() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/login");
        then.status(401).body("{\"error\":\"Unacceptable JWT key\"}");
    });

    let err = Session::login(&server.url(""), &credentials())
        .await
        .unwrap_err();
    match err {
        Error::LoginRejected { status, body } => {
            assert_eq!(status.as_u16(), 401);
            assert!(body.contains("Unacceptable JWT key"));
        }
        other => panic!("expected LoginRejected, got {other:?}"),
    }
}

#[tokio::test]
async fn conditional_fetch_downloads_without_previous_tag() {
    let server = MockServer::start();
    let session = login(&server).await;

    let mock = server.mock(|when, then| {
        when.method(GET).path("/candidates/1/V1/images/scan.mnc");
        then.status(200).header("etag", "\"r1\"").body("minc bytes");
    });

    let fetch = session
        .get_conditional("candidates/1/V1/images/scan.mnc", "")
        .await
        .unwrap();
    assert!(fetch.modified());
    assert_eq!(fetch.etag, "\"r1\"");
    assert_eq!(fetch.body.as_deref(), Some(&b"minc bytes"[..]));
    mock.assert();
}

#[tokio::test]
async fn conditional_fetch_honors_not_modified() {
    let server = MockServer::start();
    let session = login(&server).await;

    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/candidates/1/V1/images/scan.mnc")
            .header("if-none-match", "\"r1\"");
        then.status(304).header("etag", "\"r1\"");
    });

    let fetch = session
        .get_conditional("candidates/1/V1/images/scan.mnc", "\"r1\"")
        .await
        .unwrap();
    assert!(!fetch.modified());
    assert_eq!(fetch.etag, "\"r1\"");
    mock.assert();
}

#[tokio::test]
async fn missing_etag_header_reads_back_empty() {
    let server = MockServer::start();
    let session = login(&server).await;

    server.mock(|when, then| {
        when.method(GET).path("/untagged.bin");
        then.status(200).body("payload");
    });

    let fetch = session.get_conditional("untagged.bin", "").await.unwrap();
    assert!(fetch.modified());
    assert_eq!(fetch.etag, "");
}

#[tokio::test]
async fn unexpected_status_is_an_error() {
    let server = MockServer::start();
    let session = login(&server).await;

    server.mock(|when, then| {
        when.method(GET).path("/candidates");
        then.status(500).body("boom");
    });

    let err = session
        .get_json::<CandidateList>("candidates")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::UnexpectedStatus { status, .. } if status.as_u16() == 500));
}
