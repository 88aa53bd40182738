//! End-to-end tests for the account service client.
//!
//! These tests run the client against a wiremock double of the account
//! service and pin the behavior of the HTTP surface: the permission
//! filtering pipeline, the token error mapping, the no-token short circuit,
//! and the quota reads.

use std::collections::HashSet;
use std::time::Duration;

use account_client::{AccountClient, AccountEndpoint, AccountError};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Test fixture providing a mock account service.
struct TestFixture {
    /// Mock account service.
    server: MockServer,
    /// Client pointed at the mock, holding `tok-123`.
    client: AccountClient,
}

impl TestFixture {
    /// Create a new test fixture with a mock server and an authenticated client.
    async fn new() -> Self {
        let server = MockServer::start().await;
        let endpoint = AccountEndpoint::new(server.uri()).with_token("tok-123");
        let client = AccountClient::new(endpoint, Duration::from_secs(5));

        Self { server, client }
    }

    /// Mount the permissions endpoint for `tok-123` with the standard tree.
    async fn mount_permissions(&self, times: u64) {
        Mock::given(method("GET"))
            .and(path("/tokens/tok-123/permissions"))
            .and(header("Authorization", "Bearer tok-123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(permissions_body()))
            .expect(times)
            .mount(&self.server)
            .await;
    }

    /// Mount the permissions endpoint responding with an error status.
    async fn mount_permissions_error(&self, status: u16) {
        Mock::given(method("GET"))
            .and(path("/tokens/tok-123/permissions"))
            .respond_with(ResponseTemplate::new(status))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Mount the quotas endpoint for `org-1`.
    async fn mount_quotas(&self) {
        Mock::given(method("GET"))
            .and(path("/organizations/org-1/quotas"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "quotas": {
                    "servers": 10,
                    "volumes": 2
                }
            })))
            .mount(&self.server)
            .await;
    }
}

/// The permission tree the mock service grants `tok-123`.
fn permissions_body() -> serde_json::Value {
    serde_json::json!({
        "permissions": {
            "compute": {
                "servers:read": ["srv-1", "srv-2"],
                "servers:write": ["srv-1"]
            },
            "storage": {
                "volumes:*": ["vol-1"]
            }
        }
    })
}

fn set_of(items: &[&str]) -> HashSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// =============================================================================
// Permission reads
// =============================================================================

#[tokio::test]
async fn get_resources_without_filters_collects_all() {
    let fixture = TestFixture::new().await;
    fixture.mount_permissions(1).await;

    let resources = fixture.client.get_resources(None, None, None).await.unwrap();

    // srv-1 appears under two permission names but is returned once.
    assert_eq!(resources, set_of(&["srv-1", "srv-2", "vol-1"]));
}

#[tokio::test]
async fn get_resources_filters_by_service() {
    let fixture = TestFixture::new().await;

    Mock::given(method("GET"))
        .and(path("/tokens/tok-123/permissions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "permissions": {
                "x": { "read": ["r1", "r2"] },
                "y": { "read": ["r3"] }
            }
        })))
        .expect(1)
        .mount(&fixture.server)
        .await;

    let resources = fixture
        .client
        .get_resources(Some("x"), None, None)
        .await
        .unwrap();

    assert_eq!(resources, set_of(&["r1", "r2"]));
}

#[tokio::test]
async fn get_resources_filters_by_name_through_granted_wildcard() {
    let fixture = TestFixture::new().await;
    fixture.mount_permissions(1).await;

    // "volumes:attach" is only covered by the granted "volumes:*".
    let resources = fixture
        .client
        .get_resources(None, Some("volumes:attach"), None)
        .await
        .unwrap();

    assert_eq!(resources, set_of(&["vol-1"]));
}

#[tokio::test]
async fn get_resources_filters_by_resource() {
    let fixture = TestFixture::new().await;
    fixture.mount_permissions(1).await;

    let resources = fixture
        .client
        .get_resources(Some("compute"), None, Some("srv-2"))
        .await
        .unwrap();

    assert_eq!(resources, set_of(&["srv-2"]));
}

#[tokio::test]
async fn has_permission_reflects_filtered_resources() {
    let fixture = TestFixture::new().await;
    fixture.mount_permissions(2).await;

    assert!(fixture
        .client
        .has_permission(Some("compute"), Some("servers:read"), None)
        .await
        .unwrap());
    assert!(!fixture
        .client
        .has_permission(Some("compute"), Some("volumes:read"), None)
        .await
        .unwrap());
}

#[tokio::test]
async fn repeated_reads_return_the_same_set() {
    let fixture = TestFixture::new().await;
    fixture.mount_permissions(2).await;

    let first = fixture.client.get_resources(None, None, None).await.unwrap();
    let second = fixture.client.get_resources(None, None, None).await.unwrap();

    // Two live reads against an unchanged backend, no hidden caching.
    assert_eq!(first, second);
}

#[tokio::test]
async fn missing_token_short_circuits_without_a_request() {
    let server = MockServer::start().await;

    // The mock fails verification on drop if anything reaches the service.
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = AccountClient::new(AccountEndpoint::new(server.uri()), Duration::from_secs(5));

    let resources = client.get_resources(None, None, None).await.unwrap();
    assert!(resources.is_empty());

    assert!(!client.has_permission(None, None, None).await.unwrap());
}

// =============================================================================
// Token error mapping
// =============================================================================

#[tokio::test]
async fn unknown_token_maps_to_bad_token() {
    let fixture = TestFixture::new().await;
    fixture.mount_permissions_error(404).await;

    let err = fixture
        .client
        .get_resources(None, None, None)
        .await
        .unwrap_err();

    assert!(matches!(err, AccountError::BadToken));
    assert!(err.is_invalid_token());
}

#[tokio::test]
async fn gone_token_maps_to_expired_token() {
    let fixture = TestFixture::new().await;
    fixture.mount_permissions_error(410).await;

    let err = fixture
        .client
        .has_permission(None, None, None)
        .await
        .unwrap_err();

    assert!(matches!(err, AccountError::ExpiredToken));
    assert!(err.is_invalid_token());
}

#[tokio::test]
async fn other_statuses_pass_through_untranslated() {
    let fixture = TestFixture::new().await;
    fixture.mount_permissions_error(500).await;

    let err = fixture
        .client
        .get_resources(None, None, None)
        .await
        .unwrap_err();

    assert!(matches!(err, AccountError::Api { status: 500, .. }));
    assert!(!err.is_invalid_token());
}

// =============================================================================
// Quota reads
// =============================================================================

#[tokio::test]
async fn get_quotas_returns_the_quota_map() {
    let fixture = TestFixture::new().await;
    fixture.mount_quotas().await;

    let quotas = fixture.client.get_quotas("org-1").await.unwrap();

    assert_eq!(quotas.len(), 2);
    assert_eq!(quotas.get("servers"), Some(&10));
    assert_eq!(quotas.get("volumes"), Some(&2));
}

#[tokio::test]
async fn get_quota_looks_up_one_resource() {
    let fixture = TestFixture::new().await;
    fixture.mount_quotas().await;

    assert_eq!(fixture.client.get_quota("org-1", "servers").await.unwrap(), Some(10));
    assert_eq!(fixture.client.get_quota("org-1", "snapshots").await.unwrap(), None);
}

#[tokio::test]
async fn has_quota_compares_usage_against_the_limit() {
    let fixture = TestFixture::new().await;
    fixture.mount_quotas().await;

    assert!(fixture.client.has_quota("org-1", "servers", 5).await.unwrap());
    assert!(!fixture.client.has_quota("org-1", "servers", 10).await.unwrap());

    // An unknown resource has no quota to consume.
    assert!(!fixture.client.has_quota("org-1", "snapshots", 0).await.unwrap());
}

#[tokio::test]
async fn quota_errors_are_not_token_errors() {
    let fixture = TestFixture::new().await;

    Mock::given(method("GET"))
        .and(path("/organizations/org-404/quotas"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such organization"))
        .expect(1)
        .mount(&fixture.server)
        .await;

    let err = fixture.client.get_quotas("org-404").await.unwrap_err();

    assert!(matches!(err, AccountError::Api { status: 404, .. }));
    assert!(!err.is_invalid_token());
}
