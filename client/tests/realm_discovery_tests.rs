//! Integration tests for realm discovery and Digest authentication
//!
//! A client built with credentials must learn the server's realm from an
//! unauthenticated 401 before it can authenticate any operation.

mod common;

use common::fixtures::*;
use mgmt_client::errors::{HttpError, SetupError};
use mgmt_client::{ClientError, ManagementClient};

#[test]
fn test_realm_is_discovered_and_used_for_digest() {
    let mut mock = MockManagementServer::start();
    // Realm probe + first unauthenticated attempt of the operation
    let challenge = mock.mock_digest_challenge("X").expect(2).create();
    let authenticated = mock
        .mock_authenticated(USERNAME, "X", 200, &success_envelope())
        .expect(1)
        .create();

    let connection = mock.connection().with_credentials(USERNAME, PASSWORD);
    let client = ManagementClient::new(&connection).unwrap();
    assert_eq!(client.realm(), Some("X"));

    let response = client.execute(&read_server_state()).unwrap();
    assert_eq!(response, success_envelope());

    challenge.assert();
    authenticated.assert();
}

#[test]
fn test_authenticated_failure_envelope_is_returned() {
    let mut mock = MockManagementServer::start();
    mock.mock_digest_challenge(REALM).create();
    mock.mock_authenticated(USERNAME, REALM, 500, &failed_envelope()).create();

    let connection = mock.connection().with_credentials(USERNAME, PASSWORD);
    let client = ManagementClient::new(&connection).unwrap();

    assert_eq!(client.execute(&read_server_state()).unwrap(), failed_envelope());
}

#[test]
fn test_challenge_for_other_realm_is_not_answered() {
    let mut mock = MockManagementServer::start();
    mock.mock_probe_challenge(REALM).create();
    mock.mock_operation_challenge("ApplicationRealm").create();
    let authenticated = mock
        .mock_authenticated(USERNAME, "ApplicationRealm", 200, &success_envelope())
        .expect(0)
        .create();

    let connection = mock.connection().with_credentials(USERNAME, PASSWORD);
    let client = ManagementClient::new(&connection).unwrap();
    let err = client.execute(&read_server_state()).unwrap_err();

    assert!(matches!(
        err,
        ClientError::Http(HttpError::UnexpectedStatus { status: 401, .. })
    ));
    authenticated.assert();
}

#[test]
fn test_probe_answered_with_ok_fails_construction() {
    let mut mock = MockManagementServer::start();
    mock.mock_probe(200, &[("content-type", "application/json")], r#"{"outcome":"success"}"#)
        .create();

    let connection = mock.connection().with_credentials(USERNAME, PASSWORD);
    let err = ManagementClient::new(&connection).unwrap_err();

    match err {
        ClientError::Setup(SetupError::UnexpectedStatus { status, body }) => {
            assert_eq!(status, 200);
            assert!(body.contains("success"));
        }
        other => panic!("expected setup error, got {:?}", other),
    }
}

#[test]
fn test_probe_answered_with_internal_error_reports_disabled_auth() {
    let mut mock = MockManagementServer::start();
    mock.mock_probe(500, &[], r#"{"outcome":"failed"}"#).create();

    let connection = mock.connection().with_credentials(USERNAME, PASSWORD);
    let err = ManagementClient::new(&connection).unwrap_err();

    assert!(matches!(
        err,
        ClientError::Setup(SetupError::AuthenticationDisabled { .. })
    ));
    assert!(err.to_string().contains("authentication turned off"));
}

#[test]
fn test_unauthorized_without_challenge_header_fails() {
    let mut mock = MockManagementServer::start();
    mock.mock_probe(401, &[], "").create();

    let connection = mock.connection().with_credentials(USERNAME, PASSWORD);
    let err = ManagementClient::new(&connection).unwrap_err();

    assert!(matches!(err, ClientError::Setup(SetupError::MissingChallengeHeader)));
    assert!(err.to_string().contains("WWW-Authenticate"));
}

#[test]
fn test_challenge_without_digest_realm_fails() {
    let mut mock = MockManagementServer::start();
    mock.mock_probe(401, &[("www-authenticate", r#"Basic realm="ManagementRealm""#)], "")
        .create();

    let connection = mock.connection().with_credentials(USERNAME, PASSWORD);
    let err = ManagementClient::new(&connection).unwrap_err();

    assert!(matches!(err, ClientError::Setup(SetupError::RealmNotFound)));
}

#[test]
fn test_no_credentials_means_no_probe() {
    let mut mock = MockManagementServer::start();
    let probe = mock.mock_probe_challenge(REALM).expect(0).create();

    let client = ManagementClient::new(&mock.connection()).unwrap();
    assert!(client.realm().is_none());

    probe.assert();
}

#[test]
fn test_each_client_runs_its_own_probe() {
    let mut mock = MockManagementServer::start();
    let probe = mock.mock_probe_challenge(REALM).expect(2).create();

    let connection = mock.connection().with_credentials(USERNAME, PASSWORD);
    let first = ManagementClient::new(&connection).unwrap();
    first.close();
    let second = ManagementClient::new(&connection).unwrap();
    assert_eq!(second.realm(), Some(REALM));

    probe.assert();
}
