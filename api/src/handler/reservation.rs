use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use garde::Validate;
use kernel::model::id::ReservationId;
use registry::AppRegistry;
use shared::error::AppResult;

use crate::{
    extractor::AuthorizedUser,
    model::{
        reservation::{
            AvailabilityResponse, CheckAvailabilityQuery, CreateReservationRequest, ListQuery,
            ReservationResponse, UpdateReservationRequest,
        },
        ApiSuccess,
    },
};

pub async fn register_reservation(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateReservationRequest>,
) -> AppResult<impl IntoResponse> {
    req.validate(&())?;
    let created = registry
        .reservation_service()
        .create(&user.user, req.into())
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiSuccess::new(ReservationResponse::from(created))),
    ))
}

pub async fn update_reservation(
    user: AuthorizedUser,
    Path(reservation_id): Path<ReservationId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateReservationRequest>,
) -> AppResult<Json<ApiSuccess<ReservationResponse>>> {
    req.validate(&())?;
    let updated = registry
        .reservation_service()
        .update(&user.user, reservation_id, req.into())
        .await?;
    Ok(Json(ApiSuccess::new(ReservationResponse::from(updated))))
}

pub async fn cancel_reservation(
    user: AuthorizedUser,
    Path(reservation_id): Path<ReservationId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<serde_json::Value>> {
    registry
        .reservation_service()
        .cancel(&user.user, reservation_id)
        .await?;
    Ok(Json(serde_json::json!({ "success": true })))
}

pub async fn show_reservation_list(
    user: AuthorizedUser,
    Query(query): Query<ListQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ApiSuccess<Vec<ReservationResponse>>>> {
    let reservations = registry
        .reservation_service()
        .list_for(&user.user, query.todas.unwrap_or(false))
        .await?;
    let items = reservations
        .into_iter()
        .map(ReservationResponse::from)
        .collect();
    Ok(Json(ApiSuccess::new(items)))
}

/// Public probe, no bearer token required.
pub async fn check_availability(
    Query(query): Query<CheckAvailabilityQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ApiSuccess<AvailabilityResponse>>> {
    let disponible = registry
        .reservation_service()
        .check_availability(
            query.espacio_id,
            query.fecha,
            query.hora_inicio,
            query.hora_fin,
        )
        .await?;
    Ok(Json(ApiSuccess::new(AvailabilityResponse { disponible })))
}
