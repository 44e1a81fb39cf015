//! In-process HTTP tests: the router is driven with `tower::ServiceExt::oneshot` against the
//! in-memory metadata repository, no sockets or redis involved.

use std::sync::Arc;

use axum::body::{Body, Bytes};
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use jsonwebtoken::{encode, EncodingKey, Header};
use paseo_api::middleware::AdminClaims;
use paseo_api::{app, AppState, AuthConfig};
use paseo_checkout::CheckoutRules;
use paseo_core::{MetaValue, OrderMetaRepository};
use paseo_order::InMemoryMetaRepository;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

const SECRET: &str = "test-secret";

fn make_app(repo: Arc<InMemoryMetaRepository>) -> axum::Router {
    let state = AppState::new(
        repo,
        CheckoutRules::default(),
        AuthConfig {
            secret: SECRET.to_string(),
        },
    );
    app(state)
}

fn token(role: &str) -> String {
    let claims = AdminClaims {
        sub: "staff-1".to_string(),
        email: "staff@example.com".to_string(),
        role: role.to_string(),
        exp: (chrono::Utc::now().timestamp() + 3600) as usize,
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(SECRET.as_bytes())).unwrap()
}

async fn call(router: axum::Router, req: Request<Body>) -> (StatusCode, Bytes) {
    let resp = router.oneshot(req).await.unwrap();
    let status = resp.status();
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    (status, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn admin_get(uri: &str, bearer: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(bearer) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", bearer));
    }
    builder.body(Body::empty()).unwrap()
}

fn excursion_cart() -> Value {
    json!({ "lines": [{ "product_id": 10, "categories": [{ "id": 44, "slug": "excursiones" }] }] })
}

fn other_cart() -> Value {
    json!({ "lines": [{ "product_id": 11, "categories": [{ "id": 3, "slug": "camisetas" }] }] })
}

fn full_submission() -> Value {
    json!({
        "tel": "555-1234",
        "fecha_llegada": "2025-06-01",
        "flight": "AB123",
        "pasajeros": "2",
        "hotel": "Hotel X",
        "terminos": "1",
        "nombre_pasajero_1": "Ana",
        "apellidos_pasajero_1": "García",
        "nacionalidad_pasajero_1": "Española",
        "fecha_nacimiento_pasajero_1": "1990-04-12",
        "documento_pasajero_1": "X1234567",
        "email_pasajero_1": "ana@example.com",
        "nombre_pasajero_2": "Luis",
        "apellidos_pasajero_2": "Pérez",
        "nacionalidad_pasajero_2": "Argentina",
        "fecha_nacimiento_pasajero_2": "1988-11-30",
        "documento_pasajero_2": "AR998877",
        "email_pasajero_2": "luis@example.com"
    })
}

fn parse_json(body: &[u8]) -> Value {
    serde_json::from_slice(body).unwrap()
}

#[tokio::test]
async fn health_returns_ok() {
    let router = make_app(Arc::new(InMemoryMetaRepository::new()));
    let (status, body) = call(router, admin_get("/health", None)).await;
    assert_eq!(status, StatusCode::OK);
    let json = parse_json(&body);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["service"], "paseo-api");
}

#[tokio::test]
async fn fields_are_empty_without_excursions() {
    let router = make_app(Arc::new(InMemoryMetaRepository::new()));
    let req = post_json("/checkout/fields", json!({ "cart": other_cart() }));
    let (status, body) = call(router, req).await;
    assert_eq!(status, StatusCode::OK);
    let json = parse_json(&body);
    assert_eq!(json["elements"], json!([]));
    assert!(json.get("script").is_none());
}

#[tokio::test]
async fn fields_prefill_previous_values() {
    let router = make_app(Arc::new(InMemoryMetaRepository::new()));
    let req = post_json(
        "/checkout/fields",
        json!({ "cart": excursion_cart(), "values": { "flight": "AB123" } }),
    );
    let (status, body) = call(router, req).await;
    assert_eq!(status, StatusCode::OK);
    let json = parse_json(&body);
    assert_eq!(json["elements"][2]["name"], "flight");
    assert_eq!(json["elements"][2]["value"], "AB123");
    assert!(json["script"].as_str().unwrap().contains("campos_pasajeros"));
}

#[tokio::test]
async fn fields_render_as_html() {
    let router = make_app(Arc::new(InMemoryMetaRepository::new()));
    let req = post_json("/checkout/fields?format=html", json!({ "cart": excursion_cart() }));
    let (status, body) = call(router, req).await;
    assert_eq!(status, StatusCode::OK);
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.starts_with("<div id=\"campos_excursion\">"));
}

#[tokio::test]
async fn unknown_format_is_rejected() {
    let router = make_app(Arc::new(InMemoryMetaRepository::new()));
    let req = post_json("/checkout/fields?format=xml", json!({ "cart": excursion_cart() }));
    let (status, _) = call(router, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn passenger_groups_follow_count() {
    for (count, expected) in [(json!("3"), 3), (json!("0"), 0), (json!("abc"), 0), (Value::Null, 0)] {
        let router = make_app(Arc::new(InMemoryMetaRepository::new()));
        let req = post_json("/checkout/passengers", json!({ "count": count }));
        let (status, body) = call(router, req).await;
        assert_eq!(status, StatusCode::OK);
        let json = parse_json(&body);
        assert_eq!(json["count"], expected);
        let groups = json["groups"].as_array().unwrap();
        assert_eq!(groups.len(), expected);
        for (i, group) in groups.iter().enumerate() {
            assert_eq!(group["index"], i + 1);
            assert_eq!(group["inputs"].as_array().unwrap().len(), 6);
        }
    }
}

#[tokio::test]
async fn huge_count_is_rejected_without_building_groups() {
    let router = make_app(Arc::new(InMemoryMetaRepository::new()));
    let req = post_json("/checkout/passengers", json!({ "count": "4294967295" }));
    let (status, body) = call(router, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse_json(&body)["count"], 0);

    let repo = Arc::new(InMemoryMetaRepository::new());
    let order_id = Uuid::new_v4();
    let mut submission = full_submission();
    submission["pasajeros"] = json!("4294967295");
    let req = post_json(
        &format!("/orders/{}/excursion", order_id),
        json!({ "cart": excursion_cart(), "submission": submission }),
    );
    let (status, body) = call(make_app(repo.clone()), req).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        parse_json(&body)["notices"][0]["message"],
        "Por favor, ingrese una cantidad válida de pasajeros."
    );
    assert!(repo.snapshot(order_id).await.is_empty());
}

#[tokio::test]
async fn validate_accepts_complete_submission() {
    let router = make_app(Arc::new(InMemoryMetaRepository::new()));
    let req = post_json(
        "/checkout/validate",
        json!({ "cart": excursion_cart(), "submission": full_submission() }),
    );
    let (status, body) = call(router, req).await;
    assert_eq!(status, StatusCode::OK);
    let json = parse_json(&body);
    assert_eq!(json["valid"], true);
    assert_eq!(json["notices"], json!([]));
}

#[tokio::test]
async fn validate_skips_carts_without_excursions() {
    let router = make_app(Arc::new(InMemoryMetaRepository::new()));
    let req = post_json("/checkout/validate", json!({ "cart": other_cart(), "submission": {} }));
    let (_, body) = call(router, req).await;
    assert_eq!(parse_json(&body)["valid"], true);
}

#[tokio::test]
async fn missing_email_blocks_order() {
    let repo = Arc::new(InMemoryMetaRepository::new());
    let router = make_app(repo.clone());
    let order_id = Uuid::new_v4();

    let mut submission = full_submission();
    submission.as_object_mut().unwrap().remove("email_pasajero_2");

    let req = post_json(
        &format!("/orders/{}/excursion", order_id),
        json!({ "cart": excursion_cart(), "submission": submission }),
    );
    let (status, body) = call(router, req).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let json = parse_json(&body);
    let notices = json["notices"].as_array().unwrap();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0]["level"], "error");
    assert_eq!(notices[0]["message"], "Por favor, ingrese el email del pasajero 2.");
    assert!(repo.snapshot(order_id).await.is_empty());
}

#[tokio::test]
async fn place_order_then_admin_view() {
    let repo = Arc::new(InMemoryMetaRepository::new());
    let order_id = Uuid::new_v4();

    let req = post_json(
        &format!("/orders/{}/excursion", order_id),
        json!({ "cart": excursion_cart(), "submission": full_submission() }),
    );
    let (status, body) = call(make_app(repo.clone()), req).await;
    assert_eq!(status, StatusCode::CREATED);
    let report = parse_json(&body);
    assert_eq!(report["qualified"], true);
    assert_eq!(report["passengers_written"], 2);

    let uri = format!("/admin/orders/{}/excursion", order_id);
    let (status, body) = call(make_app(repo.clone()), admin_get(&uri, Some(&token("ADMIN")))).await;
    assert_eq!(status, StatusCode::OK);
    let view = parse_json(&body);
    assert_eq!(view["fields"][3]["label"], "Cantidad de pasajeros");
    assert_eq!(view["fields"][3]["value"], "2");
    assert_eq!(view["passengers"][1]["title"], "Pasajero 2");
    assert_eq!(view["passengers"][1]["lines"][0]["value"], "Luis Pérez");

    let html_uri = format!("{}?format=html", uri);
    let (status, body) = call(make_app(repo), admin_get(&html_uri, Some(&token("SUPER_ADMIN")))).await;
    assert_eq!(status, StatusCode::OK);
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains("<p><strong>Hotel o alojamiento:</strong> Hotel X</p>"));
}

#[tokio::test]
async fn order_without_excursions_stores_nothing() {
    let repo = Arc::new(InMemoryMetaRepository::new());
    let order_id = Uuid::new_v4();
    let req = post_json(
        &format!("/orders/{}/excursion", order_id),
        json!({ "cart": other_cart(), "submission": {} }),
    );
    let (status, body) = call(make_app(repo.clone()), req).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(parse_json(&body)["qualified"], false);
    assert!(repo.snapshot(order_id).await.is_empty());
}

#[tokio::test]
async fn admin_view_requires_staff_token() {
    let repo = Arc::new(InMemoryMetaRepository::new());
    let order_id = Uuid::new_v4();
    repo.set_meta(order_id, "tel", MetaValue::scalar("555")).await.unwrap();
    let uri = format!("/admin/orders/{}/excursion", order_id);

    let (status, _) = call(make_app(repo.clone()), admin_get(&uri, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = call(make_app(repo.clone()), admin_get(&uri, Some("garbage"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = call(make_app(repo), admin_get(&uri, Some(&token("CUSTOMER")))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admin_view_of_unknown_order_is_blank() {
    let router = make_app(Arc::new(InMemoryMetaRepository::new()));
    let uri = format!("/admin/orders/{}/excursion", Uuid::new_v4());
    let (status, body) = call(router, admin_get(&uri, Some(&token("ADMIN")))).await;
    assert_eq!(status, StatusCode::OK);
    let view = parse_json(&body);
    assert_eq!(view["fields"].as_array().unwrap().len(), 5);
    assert_eq!(view["passengers"], json!([]));
}
