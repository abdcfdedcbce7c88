//! Handler tests for the course endpoints over the in-memory catalogue.

use std::time::Duration;

use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{StatusCode, header};
use actix_web::{App, test as actix_test, web};
use chrono::DateTime;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use super::*;
use crate::inbound::http::cookie_config::AUTH_COOKIE;
use crate::inbound::http::{json_config, query_config};
use crate::test_support::app::TestCatalogue;

const MISSING_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

#[fixture]
fn cache_ttl() -> Duration {
    Duration::ZERO
}

async fn harness(
    cache_ttl: Duration,
) -> (
    TestCatalogue,
    impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    String,
) {
    let catalogue = TestCatalogue::seeded(cache_ttl).await;
    let token = catalogue.token_for("admin");
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(catalogue.state.clone()))
            .app_data(json_config())
            .app_data(query_config())
            .service(
                web::scope("/api")
                    .service(get_courses)
                    .service(create_course)
                    .service(update_course)
                    .service(delete_course)
                    .service(download_brochure),
            ),
    )
    .await;
    (catalogue, app, token)
}

fn authed(request: actix_test::TestRequest, token: &str) -> actix_test::TestRequest {
    request.cookie(Cookie::new(AUTH_COOKIE, token.to_owned()))
}

async fn json_body(response: ServiceResponse) -> Value {
    actix_test::read_body_json(response).await
}

fn net101() -> Value {
    json!({ "name": "Net101", "description": "Networking basics" })
}

async fn create(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    token: &str,
    body: Value,
) -> Value {
    let request = authed(actix_test::TestRequest::post().uri("/api/courses"), token)
        .set_json(&body)
        .to_request();
    let response = actix_test::call_service(app, request).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response).await["data"].clone()
}

#[rstest]
#[actix_web::test]
async fn listing_requires_a_token(cache_ttl: Duration) {
    let (_catalogue, app, _token) = harness(cache_ttl).await;
    let request = actix_test::TestRequest::get().uri("/api/courses").to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(response).await;
    assert_eq!(body["success"], json!(false));
}

#[rstest]
#[actix_web::test]
async fn create_applies_defaults_and_lists_newest_first(cache_ttl: Duration) {
    let (catalogue, app, token) = harness(cache_ttl).await;

    let first = create(&app, &token, net101()).await;
    catalogue.clock.advance_seconds(1);
    let second = create(
        &app,
        &token,
        json!({ "name": "Sec201", "description": "Security", "duration": "6 weeks" }),
    )
    .await;

    assert_eq!(first["duration"], json!("3 months"));
    assert_eq!(first["brochureFileName"], json!("brochure.pdf"));
    assert_eq!(first["imageData"], json!(""));
    assert_eq!(first["createdAt"], first["updatedAt"]);
    assert_eq!(second["duration"], json!("6 weeks"));

    let request = authed(actix_test::TestRequest::get().uri("/api/courses"), &token).to_request();
    let body = json_body(actix_test::call_service(&app, request).await).await;
    assert_eq!(body["success"], json!(true));
    let names: Vec<&str> = body["data"]
        .as_array()
        .expect("course array")
        .iter()
        .filter_map(|course| course["name"].as_str())
        .collect();
    assert_eq!(names, vec!["Sec201", "Net101"]);
}

#[rstest]
#[case::missing_description(json!({ "name": "Net101" }))]
#[case::blank_name(json!({ "name": "  ", "description": "Networking basics" }))]
#[actix_web::test]
async fn create_requires_name_and_description(cache_ttl: Duration, #[case] body: Value) {
    let (_catalogue, app, token) = harness(cache_ttl).await;
    let request = authed(actix_test::TestRequest::post().uri("/api/courses"), &token)
        .set_json(&body)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], json!("Name and description are required"));
}

#[rstest]
#[actix_web::test]
async fn create_rejects_unknown_fields(cache_ttl: Duration) {
    let (_catalogue, app, token) = harness(cache_ttl).await;
    let request = authed(actix_test::TestRequest::post().uri("/api/courses"), &token)
        .set_json(&json!({ "name": "Net101", "description": "Basics", "price": 10 }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["details"]["code"], json!("invalid_payload"));
}

#[rstest]
#[case::unknown(MISSING_ID, StatusCode::NOT_FOUND, "Course not found")]
#[case::malformed("nope", StatusCode::BAD_REQUEST, "id must be a valid UUID")]
#[actix_web::test]
async fn get_by_id_reports_bad_ids(
    cache_ttl: Duration,
    #[case] id: &str,
    #[case] status: StatusCode,
    #[case] message: &str,
) {
    let (_catalogue, app, token) = harness(cache_ttl).await;
    let request = authed(
        actix_test::TestRequest::get().uri(&format!("/api/courses?id={id}")),
        &token,
    )
    .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), status);
    assert_eq!(json_body(response).await["error"], json!(message));
}

#[rstest]
#[actix_web::test]
async fn update_merges_fields_and_refreshes_timestamp(cache_ttl: Duration) {
    let (catalogue, app, token) = harness(cache_ttl).await;
    let created = create(&app, &token, net101()).await;
    let id = created["id"].as_str().expect("course id").to_owned();
    catalogue.clock.advance_seconds(30);

    let request = authed(
        actix_test::TestRequest::put().uri(&format!("/api/courses?id={id}")),
        &token,
    )
    .set_json(&json!({ "duration": "6 weeks" }))
    .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = json_body(response).await["data"].clone();

    assert_eq!(updated["name"], json!("Net101"));
    assert_eq!(updated["duration"], json!("6 weeks"));
    assert_eq!(updated["createdAt"], created["createdAt"]);
    let created_at = DateTime::parse_from_rfc3339(updated["createdAt"].as_str().expect("createdAt"))
        .expect("rfc3339 createdAt");
    let updated_at = DateTime::parse_from_rfc3339(updated["updatedAt"].as_str().expect("updatedAt"))
        .expect("rfc3339 updatedAt");
    assert!(updated_at > created_at);
}

#[rstest]
#[case::missing_id("/api/courses", StatusCode::BAD_REQUEST, "Course ID is required")]
#[case::unknown_id(
    "/api/courses?id=3fa85f64-5717-4562-b3fc-2c963f66afa6",
    StatusCode::NOT_FOUND,
    "Course not found"
)]
#[actix_web::test]
async fn update_reports_bad_targets(
    cache_ttl: Duration,
    #[case] uri: &str,
    #[case] status: StatusCode,
    #[case] message: &str,
) {
    let (_catalogue, app, token) = harness(cache_ttl).await;
    let request = authed(actix_test::TestRequest::put().uri(uri), &token)
        .set_json(&json!({ "duration": "6 weeks" }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), status);
    assert_eq!(json_body(response).await["error"], json!(message));
}

#[rstest]
#[actix_web::test]
async fn delete_removes_course_then_reports_not_found(cache_ttl: Duration) {
    let (_catalogue, app, token) = harness(cache_ttl).await;
    let created = create(&app, &token, net101()).await;
    let uri = format!("/api/courses?id={}", created["id"].as_str().expect("id"));

    let first = actix_test::call_service(
        &app,
        authed(actix_test::TestRequest::delete().uri(&uri), &token).to_request(),
    )
    .await;
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(
        json_body(first).await,
        json!({ "success": true, "message": "Course deleted successfully" })
    );

    let second = actix_test::call_service(
        &app,
        authed(actix_test::TestRequest::delete().uri(&uri), &token).to_request(),
    )
    .await;
    assert_eq!(second.status(), StatusCode::NOT_FOUND);
}

async fn download(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    token: &str,
    id: &str,
) -> ServiceResponse {
    let request = authed(
        actix_test::TestRequest::get().uri(&format!("/api/courses/{id}/download")),
        token,
    )
    .to_request();
    actix_test::call_service(app, request).await
}

fn header_value<'a>(response: &'a ServiceResponse, name: header::HeaderName) -> &'a str {
    response
        .headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

#[rstest]
#[case::base64_pdf(
    "JVBERi0xLjQgYnJvY2h1cmU=",
    "application/pdf",
    b"%PDF-1.4 brochure".to_vec()
)]
#[case::data_url(
    "data:application/pdf;base64,JVBERi0xLjQgYnJvY2h1cmU=",
    "application/pdf",
    b"%PDF-1.4 brochure".to_vec()
)]
#[case::plain_text(
    "Course outline: week 1",
    "text/plain; charset=utf-8",
    b"Course outline: week 1".to_vec()
)]
#[case::placeholder(
    "file-uploaded",
    "text/plain; charset=utf-8",
    b"file-uploaded".to_vec()
)]
#[case::base64_shaped_text(
    "Syllabus",
    "text/plain; charset=utf-8",
    b"Syllabus".to_vec()
)]
#[actix_web::test]
async fn download_serves_brochure_as_attachment(
    cache_ttl: Duration,
    #[case] brochure: &str,
    #[case] content_type: &str,
    #[case] bytes: Vec<u8>,
) {
    let (_catalogue, app, token) = harness(cache_ttl).await;
    let created = create(
        &app,
        &token,
        json!({
            "name": "Net101",
            "description": "Networking basics",
            "brochureData": brochure,
            "brochureFileName": "net101.pdf",
        }),
    )
    .await;

    let response = download(&app, &token, created["id"].as_str().expect("id")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header_value(&response, header::CONTENT_TYPE), content_type);
    assert_eq!(
        header_value(&response, header::CONTENT_DISPOSITION),
        "attachment; filename=\"net101.pdf\""
    );
    let body = actix_test::read_body(response).await;
    assert_eq!(body.as_ref(), bytes.as_slice());
}

#[rstest]
#[case::empty("")]
#[case::blank("   ")]
#[actix_web::test]
async fn download_without_brochure_is_not_found(cache_ttl: Duration, #[case] brochure: &str) {
    let (_catalogue, app, token) = harness(cache_ttl).await;
    let created = create(
        &app,
        &token,
        json!({ "name": "Net101", "description": "Basics", "brochureData": brochure }),
    )
    .await;

    let response = download(&app, &token, created["id"].as_str().expect("id")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        json_body(response).await["error"],
        json!("No brochure available")
    );
}

#[rstest]
#[actix_web::test]
async fn listing_inside_cache_window_sees_writes() {
    let (catalogue, app, token) = harness(Duration::from_secs(10)).await;
    let list = || authed(actix_test::TestRequest::get().uri("/api/courses"), &token).to_request();

    let empty = json_body(actix_test::call_service(&app, list()).await).await;
    assert_eq!(empty["data"], json!([]));

    create(&app, &token, net101()).await;
    catalogue.clock.advance_seconds(1);
    let after = json_body(actix_test::call_service(&app, list()).await).await;
    assert_eq!(after["data"].as_array().map(Vec::len), Some(1));
}
