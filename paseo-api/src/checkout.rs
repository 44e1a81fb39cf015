use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::post,
    Router,
};
use paseo_catalog::CartSnapshot;
use paseo_checkout::{CheckoutSubmission, FormValues, PassengerBlock, PassengerFieldGroup};
use paseo_core::{Notice, NoticeList};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;
use crate::ViewQuery;

#[derive(Debug, Deserialize)]
pub struct FieldsRequest {
    #[serde(default)]
    pub cart: CartSnapshot,
    /// Values entered before a failed submission
    #[serde(default)]
    pub values: FormValues,
}

#[derive(Debug, Deserialize)]
pub struct PassengersRequest {
    #[serde(default)]
    pub count: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PassengersResponse {
    pub count: usize,
    pub groups: Vec<PassengerFieldGroup>,
}

#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    #[serde(default)]
    pub cart: CartSnapshot,
    #[serde(default)]
    pub submission: FormValues,
}

#[derive(Debug, Serialize)]
pub struct ValidationResponse {
    pub valid: bool,
    pub notices: Vec<Notice>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/checkout/fields", post(render_fields))
        .route("/checkout/passengers", post(sync_passengers))
        .route("/checkout/validate", post(validate_checkout))
        .route("/orders/{order_id}/excursion", post(place_order))
}

async fn render_fields(
    State(state): State<AppState>,
    Query(query): Query<ViewQuery>,
    Json(req): Json<FieldsRequest>,
) -> Result<Response, AppError> {
    let fields = state.renderer.render(&req.cart, &req.values);
    if query.wants_html()? {
        return Ok(Html(fields.to_html()).into_response());
    }
    Ok(Json(fields).into_response())
}

async fn sync_passengers(
    State(state): State<AppState>,
    Json(req): Json<PassengersRequest>,
) -> Json<PassengersResponse> {
    let mut block = PassengerBlock::new(state.schema);
    block.on_count_change(req.count.as_deref());
    Json(PassengersResponse {
        count: block.len(),
        groups: block.groups().to_vec(),
    })
}

fn run_validation(state: &AppState, req: &CheckoutRequest) -> (CheckoutSubmission, NoticeList) {
    let submission = CheckoutSubmission::from_form(&req.submission, &state.schema);
    let mut notices = NoticeList::new();
    state.validator.validate_into(&req.cart, &submission, &mut notices);
    (submission, notices)
}

async fn validate_checkout(
    State(state): State<AppState>,
    Json(req): Json<CheckoutRequest>,
) -> Json<ValidationResponse> {
    let (_, notices) = run_validation(&state, &req);
    Json(ValidationResponse {
        valid: !notices.has_errors(),
        notices: notices.notices().to_vec(),
    })
}

/// Order placement as the host checkout drives it: validation notices abort the order, otherwise
/// the excursion details are stored against it.
async fn place_order(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
    Json(req): Json<CheckoutRequest>,
) -> Result<Response, AppError> {
    let (submission, notices) = run_validation(&state, &req);
    if notices.has_errors() {
        warn!(%order_id, errors = notices.error_count(), "checkout rejected");
        let body = ValidationResponse {
            valid: false,
            notices: notices.notices().to_vec(),
        };
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response());
    }

    let report = state.store.persist(order_id, &req.cart, &submission).await?;
    info!(%order_id, qualified = report.qualified, "order placed");

    Ok((StatusCode::CREATED, Json(report)).into_response())
}
