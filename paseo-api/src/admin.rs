use axum::{
    extract::{Extension, Path, Query, State},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tracing::debug;
use uuid::Uuid;

use crate::error::AppError;
use crate::middleware::{admin_auth_middleware, AdminClaims};
use crate::state::AppState;
use crate::ViewQuery;

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/admin/orders/{order_id}/excursion", get(order_excursion))
        .route_layer(axum::middleware::from_fn_with_state(state, admin_auth_middleware))
}

async fn order_excursion(
    State(state): State<AppState>,
    Extension(claims): Extension<AdminClaims>,
    Path(order_id): Path<Uuid>,
    Query(query): Query<ViewQuery>,
) -> Result<Response, AppError> {
    let view = state.presenter.render(order_id).await?;
    debug!(%order_id, staff = %claims.sub, passengers = view.passengers.len(), "order view");

    if query.wants_html()? {
        return Ok(Html(view.to_html()).into_response());
    }
    Ok(Json(view).into_response())
}
