mod common;

use axum::http::{Method, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use common::TestApp;

async fn seed_lookups(app: &TestApp) -> (i64, i64, i64) {
    let sport = app
        .create("/api/v1/admin/sports", json!({ "name": "Running", "coefficient": 1.0 }))
        .await;
    let issue = app
        .create(
            "/api/v1/admin/health-issues",
            json!({ "name": "Achilles", "traumatologic": true }),
        )
        .await;
    let label = app
        .create("/api/v1/admin/labels", json!({ "name": "Intervals", "color": "#00ff00" }))
        .await;

    (
        sport["id"].as_i64().unwrap(),
        issue["id"].as_i64().unwrap(),
        label["id"].as_i64().unwrap(),
    )
}

#[tokio::test]
async fn test_health_check_endpoint() {
    let app = TestApp::new().await;

    let (status, body) = app.send_with_token(Method::GET, "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "training-log");
}

#[tokio::test]
async fn test_admin_requires_token() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send_with_token(Method::GET, "/api/v1/admin/sessions", None, None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error_code"], "missing_auth_header");

    let (status, _) = app
        .send_with_token(Method::GET, "/api/v1/admin/sessions", None, Some("not-a-jwt"))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_rejects_non_staff_users() {
    let app = TestApp::new().await;
    app.create(
        "/api/v1/admin/users",
        json!({ "email": "runner@example.com", "password": "runner-password" }),
    )
    .await;

    let token = app.login("runner@example.com", "runner-password").await;
    let (status, body) = app
        .send_with_token(Method::GET, "/api/v1/admin/sports", None, Some(&token))
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error_code"], "staff_required");
}

#[tokio::test]
async fn test_session_crud_with_inlines() {
    let app = TestApp::new().await;
    let (sport_id, issue_id, label_id) = seed_lookups(&app).await;

    let created = app
        .create(
            "/api/v1/admin/sessions",
            json!({
                "start_time": "2024-05-01T18:00:00Z",
                "name": "Track",
                "difficulty": 8,
                "labels": [label_id],
                "activities": [
                    {
                        "sport_id": sport_id,
                        "duration_seconds": 3600,
                        "high_intensity_seconds": 900,
                        "intervals": "10x400m"
                    }
                ],
                "health_monitorings": [
                    { "health_issue_id": issue_id, "pain": 4, "incident": true }
                ]
            }),
        )
        .await;

    let session_id = created["id"].as_i64().unwrap();
    // Records without a runner go to the placeholder runner
    assert_eq!(created["runner_id"], app.admin.id);
    assert_eq!(created["labels"], json!([label_id]));
    assert_eq!(created["activities"][0]["high_intensity_seconds"], 900);
    assert_eq!(created["activities"][0]["medium_intensity_seconds"], 0);
    assert_eq!(created["health_monitorings"][0]["incident"], true);

    let uri = format!("/api/v1/admin/sessions/{}", session_id);
    let (status, detail) = app.send(Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail, created);

    let (status, listed) = app.send(Method::GET, "/api/v1/admin/sessions", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let (status, body) = app.send(Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, body) = app.send(Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error_code"], "not_found");
    assert_eq!(body["message"], "Session not found");

    let (status, activities) = app.send(Method::GET, "/api/v1/admin/activities", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(activities, json!([]));
}

#[tokio::test]
async fn test_session_put_of_fetched_detail_keeps_inline_rows() {
    let app = TestApp::new().await;
    let (sport_id, issue_id, _) = seed_lookups(&app).await;

    let created = app
        .create(
            "/api/v1/admin/sessions",
            json!({
                "start_time": "2024-05-01T18:00:00Z",
                "difficulty": 8,
                "activities": [{ "sport_id": sport_id, "duration_seconds": 3600 }],
                "health_monitorings": [{ "health_issue_id": issue_id, "pain": 4 }]
            }),
        )
        .await;
    let uri = format!("/api/v1/admin/sessions/{}", created["id"]);

    let (_, mut detail) = app.send(Method::GET, &uri, None).await;
    detail["difficulty"] = json!(5);
    let (status, updated) = app.send(Method::PUT, &uri, Some(detail)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["difficulty"], 5);
    assert_eq!(updated["activities"].as_array().unwrap().len(), 1);
    assert_eq!(updated["activities"][0]["id"], created["activities"][0]["id"]);
    assert_eq!(updated["health_monitorings"].as_array().unwrap().len(), 1);
    assert_eq!(updated["health_monitorings"][0]["id"], created["health_monitorings"][0]["id"]);
    assert_eq!(updated["health_monitorings"][0]["pain"], 4);

    // A child id from nowhere is a field error and nothing is saved
    let mut body = updated.clone();
    body["difficulty"] = json!(1);
    body["health_monitorings"][0]["id"] = json!(4242);
    let (status, error) = app.send(Method::PUT, &uri, Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error_code"], "validation_error");
    assert!(error["details"]["health_monitorings[0].id"].is_array());

    let (_, reloaded) = app.send(Method::GET, &uri, None).await;
    assert_eq!(reloaded, updated);
}

#[tokio::test]
async fn test_score_bounds_are_reported_per_field() {
    let app = TestApp::new().await;
    let (sport_id, issue_id, _) = seed_lookups(&app).await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/v1/admin/sessions",
            Some(json!({
                "start_time": "2024-05-01T18:00:00Z",
                "difficulty": 11,
                "activities": [
                    { "sport_id": sport_id, "duration_seconds": 60, "intervals": "way too long" }
                ],
                "health_monitorings": [{ "health_issue_id": issue_id, "pain": -1 }]
            })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "validation_error");
    assert_eq!(
        body["details"]["difficulty"],
        json!(["Ensure this value is less than or equal to 10."])
    );
    assert_eq!(
        body["details"]["health_monitorings[0].pain"],
        json!(["Ensure this value is greater than or equal to 0."])
    );
    assert!(body["details"]["activities[0].intervals"].is_array());

    let (status, body) = app
        .send(
            Method::POST,
            "/api/v1/admin/daily-monitorings",
            Some(json!({ "feeling": 12 })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["details"]["feeling"],
        json!(["Ensure this value is less than or equal to 10."])
    );

    let (status, sessions) = app.send(Method::GET, "/api/v1/admin/sessions", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(sessions, json!([]));
}

#[tokio::test]
async fn test_unknown_reference_is_a_client_error() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/v1/admin/exercises",
            Some(json!({ "sport_id": 4242, "name": "Hill sprints" })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "invalid_reference");
}

#[tokio::test]
async fn test_pagination_parameters_are_validated() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send(Method::GET, "/api/v1/admin/sports?limit=0&offset=-1", None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"]["limit"].is_array());
    assert!(body["details"]["offset"].is_array());

    for name in ["Rowing", "Cycling", "Running"] {
        app.create("/api/v1/admin/sports", json!({ "name": name })).await;
    }
    let (status, body) = app
        .send(Method::GET, "/api/v1/admin/sports?limit=2&offset=1", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Rowing", "Running"]);
}

#[tokio::test]
async fn test_daily_monitoring_with_inline_health() {
    let app = TestApp::new().await;
    let (_, issue_id, _) = seed_lookups(&app).await;

    let created = app
        .create(
            "/api/v1/admin/daily-monitorings",
            json!({
                "date": "2024-05-02",
                "feeling": 6,
                "health_monitorings": [{ "health_issue_id": issue_id, "pain": 2 }]
            }),
        )
        .await;
    assert_eq!(created["date"], "2024-05-02");
    assert_eq!(created["health_monitorings"][0]["pain"], 2);

    let daily_id = created["id"].as_i64().unwrap();
    let (status, listed) = app
        .send(
            Method::GET,
            &format!("/api/v1/admin/daily-health-monitorings?daily_monitoring_id={}", daily_id),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let (status, updated) = app
        .send(
            Method::PUT,
            &format!("/api/v1/admin/daily-monitorings/{}", daily_id),
            Some(json!({ "feeling": 3 })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["feeling"], 3);
    assert_eq!(updated["date"], "2024-05-02");
}

#[tokio::test]
async fn test_user_management() {
    let app = TestApp::new().await;

    let user = app
        .create(
            "/api/v1/admin/users",
            json!({ "email": "coach@example.com", "password": "coach-password" }),
        )
        .await;
    assert_eq!(user["is_staff"], false);
    assert!(user.get("password_hash").is_none());

    let (status, body) = app
        .send(
            Method::POST,
            "/api/v1/admin/users",
            Some(json!({ "email": "coach@example.com", "password": "coach-password" })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error_code"], "conflict");

    let (status, _) = app
        .send(Method::DELETE, &format!("/api/v1/admin/users/{}", app.admin.id), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .send(Method::DELETE, &format!("/api/v1/admin/users/{}", user["id"]), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}
