mod common;

use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use common::{closed_port_url, Upstream};
use pretty_assertions::assert_eq;
use rest_graphql_gateway::{
    Error, GraphQLClient, GraphQLExecutor, GraphQLRequest, TransportError,
};
use serde_json::json;

fn client(upstream: &Upstream) -> GraphQLClient {
    GraphQLClient::builder(upstream.graphql_url())
        .store("b2c_10010_vi")
        .build()
        .expect("client builds")
}

#[tokio::test]
async fn execute_posts_query_and_variables() {
    let upstream = Upstream::ok(json!({ "data": { "ok": true } })).await;
    let variables = json!({ "sku": "S1" }).as_object().cloned();

    let reply = client(&upstream)
        .execute("query Q($sku: String!) { ok }", variables, None)
        .await
        .expect("upstream reachable");

    assert_eq!(reply, json!({ "data": { "ok": true } }));
    let requests = upstream.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].body,
        json!({ "query": "query Q($sku: String!) { ok }", "variables": { "sku": "S1" } })
    );
    assert_eq!(requests[0].headers["store"], "b2c_10010_vi");
    assert_eq!(requests[0].headers[header::CONTENT_TYPE], "application/json");
}

#[tokio::test]
async fn variables_key_is_absent_without_variables() {
    let upstream = Upstream::ok(json!({})).await;

    client(&upstream)
        .execute("mutation { createGuestCart { cart { id } } }", None, None)
        .await
        .unwrap();

    let body = &upstream.requests()[0].body;
    assert!(body.get("variables").is_none(), "got {body}");
}

#[tokio::test]
async fn extra_headers_override_base_headers() {
    let upstream = Upstream::ok(json!({})).await;
    let mut extra = HeaderMap::new();
    extra.insert("store", HeaderValue::from_static("other_store"));
    extra.insert("x-trace", HeaderValue::from_static("1"));

    client(&upstream)
        .execute("{ ok }", None, Some(&extra))
        .await
        .unwrap();

    let headers = &upstream.requests()[0].headers;
    assert_eq!(headers["store"], "other_store");
    assert_eq!(headers["x-trace"], "1");
    assert_eq!(headers.get_all("store").iter().count(), 1);
}

#[tokio::test]
async fn instance_token_is_sent_until_cleared() {
    let upstream = Upstream::ok(json!({})).await;
    let mut client = client(&upstream);

    client.set_auth_token(Some("x")).unwrap();
    client.execute("{ ok }", None, None).await.unwrap();
    client.set_auth_token(None).unwrap();
    client.execute("{ ok }", None, None).await.unwrap();

    let requests = upstream.requests();
    assert_eq!(requests[0].headers[header::AUTHORIZATION], "Bearer x");
    assert!(requests[1].headers.get(header::AUTHORIZATION).is_none());
}

#[tokio::test]
async fn per_call_token_does_not_leak_between_calls() {
    let upstream = Upstream::ok(json!({})).await;
    let client = client(&upstream);
    let request = GraphQLRequest::new("{ ok }");

    GraphQLExecutor::execute(&client, &request, Some("tok123"))
        .await
        .unwrap();
    GraphQLExecutor::execute(&client, &request, None).await.unwrap();

    let requests = upstream.requests();
    assert_eq!(requests[0].headers[header::AUTHORIZATION], "Bearer tok123");
    assert!(requests[1].headers.get(header::AUTHORIZATION).is_none());
    assert!(!client.headers().contains_key(header::AUTHORIZATION));
}

#[tokio::test]
async fn graphql_errors_are_returned_verbatim() {
    let reply = json!({
        "errors": [{ "message": "The account sign-in was incorrect" }],
        "data": { "generateCustomerToken": null }
    });
    let upstream = Upstream::ok(reply.clone()).await;

    let result = client(&upstream).execute("{ ok }", None, None).await;

    assert_eq!(result.unwrap(), reply);
}

#[tokio::test]
async fn non_success_status_is_transport_error() {
    let upstream =
        Upstream::spawn(StatusCode::INTERNAL_SERVER_ERROR, json!({ "message": "boom" })).await;

    let err = client(&upstream)
        .execute("{ ok }", None, None)
        .await
        .unwrap_err();

    match err {
        Error::Transport(TransportError::Status { status, body }) => {
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert!(body.contains("boom"), "body was {body}");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_upstream_is_transport_error() {
    let client = GraphQLClient::new(closed_port_url().await).unwrap();

    let err = client.execute("{ ok }", None, None).await.unwrap_err();

    assert!(matches!(err, Error::Transport(TransportError::Request(_))));
}
