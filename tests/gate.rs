use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;
use update_gate::config::GateConfig;
use update_gate::{GateVerdict, SemanticVersion, UpdateCoordinator};

async fn remote_config_server(latest: &str, min_required: &str) -> ServerGuard {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/update-info")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "latestVersion": latest,
                "minRequiredVersion": min_required,
            })
            .to_string(),
        )
        .create_async()
        .await;
    server
}

fn config_with_remote(installed: &str, endpoint_base: &str) -> GateConfig {
    serde_json::from_value(json!({
        "installedVersion": installed,
        "sources": {
            "remoteConfig": {
                "endpoint": format!("{endpoint_base}/update-info")
            }
        }
    }))
    .unwrap()
}

#[tokio::test]
async fn outdated_install_is_forced_to_update() {
    let server = remote_config_server("3.0.0", "2.0.0").await;
    let config = config_with_remote("1.0.0", &server.url());

    let gate = UpdateCoordinator::from_config(&config);

    assert_eq!(
        gate.check_now(false).await,
        GateVerdict::ForcedUpdate {
            min_required: SemanticVersion::parse("2.0.0")
        }
    );
}

#[tokio::test]
async fn supported_but_stale_install_gets_an_optional_update() {
    let server = remote_config_server("3.0.0", "2.0.0").await;
    let config = config_with_remote("2.5.0", &server.url());

    let gate = UpdateCoordinator::from_config(&config);

    assert_eq!(
        gate.check_now(false).await,
        GateVerdict::OptionalUpdate {
            latest: SemanticVersion::parse("3.0.0")
        }
    );
}

#[tokio::test]
async fn current_install_proceeds() {
    let server = remote_config_server("3.0.0", "2.0.0").await;
    let config = config_with_remote("3.0.0", &server.url());

    let gate = UpdateCoordinator::from_config(&config);

    assert_eq!(gate.check_now(false).await, GateVerdict::Proceed);
}

#[tokio::test]
async fn store_catalog_and_remote_config_agree_on_one_policy() {
    let mut store = Server::new_async().await;
    store
        .mock("GET", "/lookup")
        .match_query(Matcher::UrlEncoded(
            "bundleId".into(),
            "com.example.app".into(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"resultCount": 1, "results": [{"version": "3.5.0"}]}"#)
        .create_async()
        .await;

    let remote = remote_config_server("3.0.0", "2.0.0").await;

    let config: GateConfig = serde_json::from_value(json!({
        "installedVersion": "3.1.0",
        "sources": {
            "appStore": {
                "baseUrl": store.url(),
                "bundleId": "com.example.app",
                "appId": 1451513467u64
            },
            "remoteConfig": {
                "endpoint": format!("{}/update-info", remote.url())
            }
        }
    }))
    .unwrap();

    let gate = UpdateCoordinator::from_config(&config);

    // The catalog's newer latest wins; the remote minimum no longer applies.
    assert_eq!(
        gate.check_now(false).await,
        GateVerdict::OptionalUpdate {
            latest: SemanticVersion::parse("3.5.0")
        }
    );
}

#[tokio::test]
async fn empty_catalog_result_is_tolerated_when_another_source_answers() {
    let mut store = Server::new_async().await;
    store
        .mock("GET", "/lookup")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"resultCount": 0, "results": []}"#)
        .create_async()
        .await;

    let remote = remote_config_server("3.0.0", "2.0.0").await;

    let config: GateConfig = serde_json::from_value(json!({
        "installedVersion": "1.0.0",
        "sources": {
            "appStore": {
                "baseUrl": store.url(),
                "bundleId": "com.example.unknown"
            },
            "remoteConfig": {
                "endpoint": format!("{}/update-info", remote.url())
            }
        }
    }))
    .unwrap();

    let gate = UpdateCoordinator::from_config(&config);

    assert_eq!(
        gate.check_now(false).await,
        GateVerdict::ForcedUpdate {
            min_required: SemanticVersion::parse("2.0.0")
        }
    );
}

#[tokio::test]
async fn unreachable_sources_fail_open() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/update-info")
        .with_status(500)
        .create_async()
        .await;

    let config = config_with_remote("1.0.0", &server.url());
    let gate = UpdateCoordinator::from_config(&config);

    assert_eq!(gate.check_now(false).await, GateVerdict::Proceed);
}

#[tokio::test]
async fn repeated_checks_within_ttl_hit_the_endpoint_once() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/update-info")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"latestVersion": "3.0.0", "minRequiredVersion": "2.0.0"}"#)
        .expect(1)
        .create_async()
        .await;

    let config = config_with_remote("2.5.0", &server.url());
    let gate = UpdateCoordinator::from_config(&config);

    let first = gate.check_now(false).await;
    let second = gate.check_now(false).await;

    mock.assert_async().await;
    assert_eq!(first, second);
}
