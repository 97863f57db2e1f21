use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use netroute::web::server::{build_app, ServerConfig};
use serde_json::{json, Value};
use tower::ServiceExt;

const LAB: &str = "[host]
pc1,192.168.1.10,R1
pc2,192.168.2.10,R4
[device]
R1,10.0.0.1
R2,10.0.0.2
R3,10.0.0.3
R4,10.0.0.4
[route]
R1->R2,1
R1->R3,1
R2->R4,1
R3->R4,1
";

// Test helper sending one request and decoding the JSON reply
async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn upload_lab(app: &Router) -> String {
    let (status, body) = send(app, "POST", "/api/networks", Some(json!({ "description": LAB }))).await;
    assert_eq!(status, StatusCode::OK, "upload failed: {}", body);
    body["id"].as_str().expect("session id").to_string()
}

#[tokio::test]
async fn test_health_check() {
    let app = build_app(&ServerConfig::default());
    let (status, body) = send(&app, "GET", "/api/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "netroute");
}

#[tokio::test]
async fn test_upload_and_fetch_network() {
    let app = build_app(&ServerConfig::default());
    let id = upload_lab(&app).await;

    let (status, body) = send(&app, "GET", &format!("/api/networks/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id.as_str());
    assert_eq!(body["devices"].as_array().map(Vec::len), Some(4));
    assert_eq!(body["hosts"].as_array().map(Vec::len), Some(2));
    assert_eq!(body["links"][0]["from"], "R1");
    assert_eq!(body["links"][0]["weight"], 1);

    let (status, sessions) = send(&app, "GET", "/api/sessions", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(sessions.as_array().map(Vec::len), Some(1));
    assert_eq!(sessions[0]["device_count"], 4);
    assert_eq!(sessions[0]["link_count"], 4);
}

#[tokio::test]
async fn test_compute_routes() {
    let app = build_app(&ServerConfig::default());
    let id = upload_lab(&app).await;
    let uri = format!("/api/networks/{}/routes", id);

    let (status, body) = send(&app, "POST", &uri, Some(json!({ "source": "R1" }))).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["source"], "R1");
    assert_eq!(body["tie_break"], "name");
    assert_eq!(body["engine"], "marking");

    let routes = body["routes"].as_array().expect("routes array");
    assert_eq!(routes.len(), 3);
    let to_r4 = routes
        .iter()
        .find(|route| route["destination"] == "R4")
        .expect("route to R4");
    assert_eq!(to_r4["cost"], 2);
    assert_eq!(to_r4["hops"], json!(["R1", "R2", "R4"]));

    let (status, body) = send(
        &app,
        "POST",
        &uri,
        Some(json!({ "source": "R1", "tie_break": "name-desc", "engine": "heap" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["engine"], "heap");
    let to_r4 = body["routes"]
        .as_array()
        .and_then(|routes| routes.iter().find(|route| route["destination"] == "R4"))
        .expect("route to R4");
    assert_eq!(to_r4["hops"], json!(["R1", "R3", "R4"]));

    // R4 has no way back
    let (status, body) = send(&app, "POST", &uri, Some(json!({ "source": "R4" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["routes"]
        .as_array()
        .map_or(false, |routes| routes.iter().all(|route| route["cost"].is_null())));
}

#[tokio::test]
async fn test_host_route() {
    let app = build_app(&ServerConfig::default());
    let id = upload_lab(&app).await;
    let uri = format!("/api/networks/{}/hosts/route", id);

    let (status, body) = send(&app, "POST", &uri, Some(json!({ "from": "pc1", "to": "pc2" }))).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["source"], "R1");
    assert_eq!(body["destination"], "R4");
    assert_eq!(body["cost"], 2);

    let (status, body) = send(&app, "POST", &uri, Some(json!({ "from": "pc1", "to": "pc7" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "unknown_host");
}

#[tokio::test]
async fn test_error_responses() {
    let app = build_app(&ServerConfig::default());

    let (status, body) = send(
        &app,
        "POST",
        "/api/networks",
        Some(json!({ "description": "[device]\nR1,999.0.0.1\n" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_network");
    assert!(body["message"].as_str().map_or(false, |m| m.starts_with("Line 2")));

    let missing = format!("/api/networks/{}", uuid::Uuid::new_v4());
    let (status, body) = send(&app, "GET", &missing, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "session_not_found");

    let id = upload_lab(&app).await;
    let uri = format!("/api/networks/{}/routes", id);
    let (status, body) = send(&app, "POST", &uri, Some(json!({ "source": "R9" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "unknown_device");
}

#[tokio::test]
async fn test_invalid_parameters_are_bad_requests() {
    let app = build_app(&ServerConfig::default());
    let id = upload_lab(&app).await;
    let routes = format!("/api/networks/{}/routes", id);
    let host_route = format!("/api/networks/{}/hosts/route", id);

    let cases = [
        (&routes, json!({ "source": "R1", "tie_break": "cheapest" }), "cheapest"),
        (&routes, json!({ "source": "R1", "engine": "bellman" }), "bellman"),
        (&host_route, json!({ "from": "pc1", "to": "pc2", "tie_break": "random" }), "random"),
    ];

    for (uri, body, bad_value) in cases {
        let (status, reply) = send(&app, "POST", uri, Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "reply for {}: {}", bad_value, reply);
        assert_eq!(reply["error"], "invalid_parameter");
        assert!(
            reply["message"].as_str().map_or(false, |m| m.contains(bad_value)),
            "message should name {}: {}",
            bad_value,
            reply
        );
    }
}

#[tokio::test]
async fn test_session_limit() {
    let config = ServerConfig {
        max_sessions: 1,
        ..ServerConfig::default()
    };
    let app = build_app(&config);

    upload_lab(&app).await;
    let (status, body) = send(&app, "POST", "/api/networks", Some(json!({ "description": LAB }))).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "session_limit");
}

#[tokio::test]
async fn test_configured_default_tie_break() {
    let config = ServerConfig {
        default_tie_break: "name-desc".parse().unwrap(),
        ..ServerConfig::default()
    };
    let app = build_app(&config);
    let id = upload_lab(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/networks/{}/hosts/route", id),
        Some(json!({ "from": "pc1", "to": "pc2" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["hops"], json!(["R1", "R3", "R4"]));
}
