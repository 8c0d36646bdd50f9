use serde_json::{json, Value};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;

fn graphql_api(server: &MockServer, page: &str, token: &str) -> GraphQLApi {
    let settings = Settings {
        graphql_endpoint: format!("{}/graphql", server.uri()),
        ..Settings::default()
    };
    let url = Url::parse(&format!("https://github.com{page}")).unwrap();
    GraphQLApi::new(&url, token.to_string(), &settings).unwrap()
}

async fn mount_response(server: &MockServer, body: Value) {
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

fn parse_entry(value: Value) -> GraphQLEntry {
    serde_json::from_value(value).unwrap()
}

#[test]
fn test_sum_nested_folder() {
    let entry = parse_entry(json!({
        "name": "dir",
        "object": { "entries": [
            { "name": "f1", "object": { "byteSize": 7 } },
            { "name": "f2", "object": { "byteSize": 3 } }
        ]}
    }));

    assert_eq!(sum_entry_bytesizes(&entry), 10);
}

#[test]
fn test_sum_deeply_nested_and_truncated_levels() {
    let entry = parse_entry(json!({
        "name": "src",
        "object": { "entries": [
            { "name": "main.rs", "object": { "byteSize": 100 } },
            { "name": "api", "object": { "entries": [
                { "name": "mod.rs", "object": { "byteSize": 20 } },
                { "name": "deeper", "object": {} }
            ]}},
            { "name": "submodule", "object": null }
        ]}
    }));

    assert_eq!(sum_entry_bytesizes(&entry), 120);
}

#[tokio::test]
async fn test_get_folder_size_info_sends_variables_and_sums() {
    let server = MockServer::start().await;
    mount_response(
        &server,
        json!({ "data": { "repository": { "name": "b", "object": { "entries": [
            { "name": "README.md", "object": { "byteSize": 11 } },
            { "name": "dir", "object": { "entries": [
                { "name": "f1", "object": { "byteSize": 7 } },
                { "name": "f2", "object": { "byteSize": 3 } }
            ]}}
        ]}}}}),
    )
    .await;
    let api = graphql_api(&server, "/a/b/tree/dev", "tok");

    let sizes = api
        .get_folder_size_info("//./docs", FolderSizeOptions::with_depth(2))
        .await
        .unwrap();

    assert_eq!(
        sizes,
        vec![
            EntrySizeInfo { name: "README.md".to_string(), size: 11 },
            EntrySizeInfo { name: "dir".to_string(), size: 10 },
        ]
    );

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].headers.get("authorization").unwrap().to_str().unwrap(),
        "bearer tok"
    );
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["query"], Value::String(create_recursive_query(2).to_string()));
    assert_eq!(
        body["variables"],
        json!({ "owner": "a", "repo": "b", "branch_colon_path": "dev:docs" })
    );
}

#[tokio::test]
async fn test_empty_token_is_sent_as_empty_bearer() {
    let server = MockServer::start().await;
    mount_response(&server, json!({ "data": { "repository": { "diskUsage": 1 } } })).await;
    let api = graphql_api(&server, "/a/b", "");

    api.get_diskspace().await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let auth = requests[0].headers.get("authorization").unwrap().to_str().unwrap();
    assert_eq!(auth.trim_end(), "bearer");
}

#[tokio::test]
async fn test_graphql_errors_fail_with_every_message() {
    let server = MockServer::start().await;
    mount_response(
        &server,
        json!({
            "data": { "repository": { "object": { "entries": [] } } },
            "errors": [
                { "message": "Could not resolve to a Repository" },
                { "message": "Something else broke" }
            ]
        }),
    )
    .await;
    let api = graphql_api(&server, "/a/b", "tok");

    let err = api
        .get_folder_size_info("", FolderSizeOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::GraphQL(_)));
    let text = err.to_string();
    assert!(text.contains("Could not resolve to a Repository"));
    assert!(text.contains("Something else broke"));
}

#[tokio::test]
async fn test_missing_object_is_an_error() {
    let server = MockServer::start().await;
    mount_response(&server, json!({ "data": { "repository": { "object": null } } })).await;
    let api = graphql_api(&server, "/a/b", "tok");

    let err = api
        .get_folder_size_info("nope", FolderSizeOptions::default())
        .await
        .unwrap_err();

    assert!(err.to_string().contains("HEAD:nope"));
}

#[tokio::test]
async fn test_get_diskspace_converts_kilobytes() {
    let server = MockServer::start().await;
    mount_response(&server, json!({ "data": { "repository": { "diskUsage": 2048 } } })).await;
    let api = graphql_api(&server, "/a/b", "tok");

    assert_eq!(api.get_diskspace().await.unwrap(), 2048 * 1024);

    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["variables"], json!({ "owner": "a", "repo": "b" }));
    assert!(body["query"].as_str().unwrap().contains("diskUsage"));
}

#[tokio::test]
async fn test_get_diskspace_errors_fail() {
    let server = MockServer::start().await;
    mount_response(&server, json!({ "errors": [{ "message": "Bad credentials" }] })).await;
    let api = graphql_api(&server, "/a/b", "bad");

    let err = api.get_diskspace().await.unwrap_err();

    assert!(err.to_string().contains("Bad credentials"));
}

#[tokio::test]
async fn test_empty_errors_array_is_still_fatal() {
    let server = MockServer::start().await;
    mount_response(
        &server,
        json!({ "data": { "repository": { "diskUsage": 5 } }, "errors": [] }),
    )
    .await;
    let api = graphql_api(&server, "/a/b", "tok");

    let err = api.get_diskspace().await.unwrap_err();

    assert!(matches!(err, Error::GraphQL(_)));
}

#[tokio::test]
async fn test_percent_encoded_page_builds_plain_branch_colon_path() {
    let server = MockServer::start().await;
    mount_response(
        &server,
        json!({ "data": { "repository": { "object": { "entries": [] } } } }),
    )
    .await;
    let api = graphql_api(&server, "/a/b/tree/main/my%20dir", "tok");
    let page = Url::parse("https://github.com/a/b/tree/main/my%20dir").unwrap();

    let folder = api.parse_entry_path(&page).unwrap();
    api.get_folder_size_info(&folder, FolderSizeOptions::default())
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["variables"]["branch_colon_path"], "main:my dir");
}
