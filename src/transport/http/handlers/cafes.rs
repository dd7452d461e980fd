use crate::domain::cafe::check_coffee_price;
use crate::domain::{CafeForm, CafeView, NewCafe};
use crate::transport::http::error::ApiError;
use crate::transport::http::types::{AppState, ErrorBody, QueryParams, SuccessBody};
use axum::extract::rejection::{FormRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::{Form, Json};

const EMPTY_TABLE: &str = "Sorry, there are no cafes in the database yet.";
const NO_CAFE_AT_LOCATION: &str = "Sorry we don't have a cafe at the location.";
const UNKNOWN_ID: &str = "Sorry a cafe with that id was not found in the database.";
const DELETE_REFUSED: &str = "Sorry that's not allow. make sure you have the correct api-key.";

type RawQuery = Result<Query<Vec<(String, String)>>, QueryRejection>;

/// An unparsable query string is treated as carrying no parameters.
fn query_params(query: RawQuery) -> QueryParams {
    match query {
        Ok(Query(pairs)) => QueryParams::from(pairs),
        Err(e) => {
            tracing::warn!(error = %e, "ignoring unparsable query string");
            QueryParams::default()
        }
    }
}

#[utoipa::path(
    get,
    path = "/random",
    responses(
        (status = 200, description = "A uniformly random cafe", body = CafeView),
        (status = 404, description = "There are no cafes", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    )
)]
pub async fn random_cafe_handler(
    State(state): State<AppState>,
) -> Result<Json<CafeView>, ApiError> {
    match state.service.random_cafe().await? {
        Some(cafe) => Ok(Json(cafe.into())),
        None => Err(ApiError::NotFound(EMPTY_TABLE.to_string())),
    }
}

#[utoipa::path(
    get,
    path = "/all",
    responses(
        (status = 200, description = "Every cafe", body = Vec<CafeView>),
        (status = 500, description = "Internal server error", body = ErrorBody)
    )
)]
pub async fn all_cafes_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<CafeView>>, ApiError> {
    let cafes = state.service.all_cafes().await?;
    Ok(Json(cafes.into_iter().map(CafeView::from).collect()))
}

/// A miss is answered with 200 and an error body, unlike the id-based routes.
#[utoipa::path(
    get,
    path = "/search",
    params(
        ("loc" = Option<String>, Query, description = "Exact, case-sensitive location")
    ),
    responses(
        (
            status = 200,
            description = "The matching cafe, or an error body when none matches",
            body = CafeView
        ),
        (status = 500, description = "Internal server error", body = ErrorBody)
    )
)]
pub async fn search_handler(
    State(state): State<AppState>,
    query: RawQuery,
) -> Result<Response, ApiError> {
    let params = query_params(query);
    let found = state.service.search(params.first("loc")).await?;
    Ok(match found {
        Some(cafe) => Json(CafeView::from(cafe)).into_response(),
        None => Json(ErrorBody::new("Not found", NO_CAFE_AT_LOCATION)).into_response(),
    })
}

#[utoipa::path(
    post,
    path = "/add",
    request_body(content = CafeForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Cafe added", body = SuccessBody),
        (status = 400, description = "Missing or malformed field", body = ErrorBody),
        (status = 409, description = "A cafe with that name already exists", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    )
)]
pub async fn add_cafe_handler(
    State(state): State<AppState>,
    form: Result<Form<CafeForm>, FormRejection>,
) -> Result<Json<SuccessBody>, ApiError> {
    let Form(form) = form.map_err(|e| ApiError::BadRequest(format!("Invalid form body: {}", e)))?;
    let cafe = NewCafe::try_from(form).map_err(|e| {
        tracing::warn!(error = %e, "rejected /add form");
        ApiError::from(e)
    })?;

    state.service.add(cafe).await?;
    Ok(Json(SuccessBody::new("Successfully add new data")))
}

#[utoipa::path(
    patch,
    path = "/update-price/{id}",
    params(
        ("id" = i32, Path, description = "Cafe id"),
        ("coffee_price" = Option<String>, Query, description = "New price; omitted clears it")
    ),
    responses(
        (status = 200, description = "Price updated", body = SuccessBody),
        (status = 400, description = "Price too long", body = ErrorBody),
        (status = 404, description = "No cafe with that id", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    )
)]
pub async fn update_price_handler(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    query: RawQuery,
) -> Result<Json<SuccessBody>, ApiError> {
    let Ok(Path(id)) = id else {
        return Err(ApiError::NotFound(UNKNOWN_ID.to_string()));
    };
    let coffee_price = query_params(query).first("coffee_price").map(str::to_string);
    if let Some(price) = &coffee_price {
        check_coffee_price(price)?;
    }

    state
        .service
        .update_price(id, coffee_price)
        .await
        .map_err(|e| ApiError::from_store(e, UNKNOWN_ID))?;
    Ok(Json(SuccessBody::new("Successfully updated the price.")))
}

/// A wrong api key and an unknown id get the same 404.
#[utoipa::path(
    delete,
    path = "/report-closed/{id}",
    params(
        ("id" = i32, Path, description = "Cafe id"),
        ("api-key" = String, Query, description = "Shared secret")
    ),
    responses(
        (status = 200, description = "Cafe deleted", body = SuccessBody),
        (status = 404, description = "No such cafe, or wrong api key", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    )
)]
pub async fn report_closed_handler(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    query: RawQuery,
) -> Result<Json<SuccessBody>, ApiError> {
    let Ok(Path(id)) = id else {
        return Err(ApiError::NotFound(DELETE_REFUSED.to_string()));
    };
    let params = query_params(query);

    state
        .service
        .report_closed(id, params.first("api-key"))
        .await
        .map_err(|e| ApiError::from_store(e, DELETE_REFUSED))?;
    Ok(Json(SuccessBody::new("Cafe successfully deleted.")))
}
