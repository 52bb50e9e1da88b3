//! Master-data endpoints: materials, products and operators.

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use super::common::{created_response, deleted_response, success_response, validate_input};
use super::AppState;
use crate::errors::ServiceError;
use crate::models::{Material, Operator, Product};
use crate::services::master_data::{
    MaterialUpdate, NewMaterial, NewOperator, NewProduct, OperatorUpdate, ProductUpdate,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/materials", get(list_materials).post(create_material))
        .route(
            "/materials/:id",
            axum::routing::put(update_material).delete(delete_material),
        )
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/:id",
            axum::routing::put(update_product).delete(delete_product),
        )
        .route("/operators", get(list_operators).post(create_operator))
        .route(
            "/operators/:id",
            axum::routing::put(update_operator).delete(delete_operator),
        )
}

/// List registered raw materials.
#[utoipa::path(
    get,
    path = "/api/v1/master/materials",
    responses((status = 200, description = "Materials", body = [Material])),
    tag = "master-data"
)]
pub async fn list_materials(State(state): State<AppState>) -> Json<Vec<Material>> {
    Json(state.master_data.list_materials().await)
}

/// Register a raw material.
#[utoipa::path(
    post,
    path = "/api/v1/master/materials",
    request_body = NewMaterial,
    responses(
        (status = 201, description = "Material created", body = Material),
        (status = 400, description = "Invalid payload", body = crate::errors::ErrorResponse)
    ),
    tag = "master-data"
)]
pub async fn create_material(
    State(state): State<AppState>,
    Json(payload): Json<NewMaterial>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_input(&payload)?;
    let material = state.master_data.create_material(payload).await?;
    Ok(created_response(material))
}

/// Update a material; only provided fields change.
#[utoipa::path(
    put,
    path = "/api/v1/master/materials/{id}",
    params(("id" = String, Path, description = "Material id")),
    request_body = MaterialUpdate,
    responses(
        (status = 200, description = "Material updated", body = Material),
        (status = 404, description = "Unknown id", body = crate::errors::ErrorResponse)
    ),
    tag = "master-data"
)]
pub async fn update_material(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<MaterialUpdate>,
) -> Result<impl IntoResponse, ServiceError> {
    let material = state.master_data.update_material(&id, payload).await?;
    Ok(success_response(material))
}

/// Delete a material.
#[utoipa::path(
    delete,
    path = "/api/v1/master/materials/{id}",
    params(("id" = String, Path, description = "Material id")),
    responses(
        (status = 200, description = "Material deleted"),
        (status = 404, description = "Unknown id", body = crate::errors::ErrorResponse)
    ),
    tag = "master-data"
)]
pub async fn delete_material(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ServiceError> {
    state.master_data.delete_material(&id).await?;
    Ok(deleted_response())
}

/// List registered products.
#[utoipa::path(
    get,
    path = "/api/v1/master/products",
    responses((status = 200, description = "Products", body = [Product])),
    tag = "master-data"
)]
pub async fn list_products(State(state): State<AppState>) -> Json<Vec<Product>> {
    Json(state.master_data.list_products().await)
}

/// Register a product.
#[utoipa::path(
    post,
    path = "/api/v1/master/products",
    request_body = NewProduct,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 400, description = "Invalid payload", body = crate::errors::ErrorResponse)
    ),
    tag = "master-data"
)]
pub async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<NewProduct>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_input(&payload)?;
    let product = state.master_data.create_product(payload).await?;
    Ok(created_response(product))
}

/// Update a product; only provided fields change.
#[utoipa::path(
    put,
    path = "/api/v1/master/products/{id}",
    params(("id" = String, Path, description = "Product id")),
    request_body = ProductUpdate,
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 404, description = "Unknown id", body = crate::errors::ErrorResponse)
    ),
    tag = "master-data"
)]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<ProductUpdate>,
) -> Result<impl IntoResponse, ServiceError> {
    let product = state.master_data.update_product(&id, payload).await?;
    Ok(success_response(product))
}

/// Delete a product.
#[utoipa::path(
    delete,
    path = "/api/v1/master/products/{id}",
    params(("id" = String, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product deleted"),
        (status = 404, description = "Unknown id", body = crate::errors::ErrorResponse)
    ),
    tag = "master-data"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ServiceError> {
    state.master_data.delete_product(&id).await?;
    Ok(deleted_response())
}

/// List registered operators.
#[utoipa::path(
    get,
    path = "/api/v1/master/operators",
    responses((status = 200, description = "Operators", body = [Operator])),
    tag = "master-data"
)]
pub async fn list_operators(State(state): State<AppState>) -> Json<Vec<Operator>> {
    Json(state.master_data.list_operators().await)
}

/// Register an operator.
#[utoipa::path(
    post,
    path = "/api/v1/master/operators",
    request_body = NewOperator,
    responses(
        (status = 201, description = "Operator created", body = Operator),
        (status = 400, description = "Invalid payload", body = crate::errors::ErrorResponse)
    ),
    tag = "master-data"
)]
pub async fn create_operator(
    State(state): State<AppState>,
    Json(payload): Json<NewOperator>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_input(&payload)?;
    let operator = state.master_data.create_operator(payload).await?;
    Ok(created_response(operator))
}

/// Rename an operator.
#[utoipa::path(
    put,
    path = "/api/v1/master/operators/{id}",
    params(("id" = String, Path, description = "Operator id")),
    request_body = OperatorUpdate,
    responses(
        (status = 200, description = "Operator updated", body = Operator),
        (status = 404, description = "Unknown id", body = crate::errors::ErrorResponse)
    ),
    tag = "master-data"
)]
pub async fn update_operator(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<OperatorUpdate>,
) -> Result<impl IntoResponse, ServiceError> {
    let operator = state.master_data.update_operator(&id, payload).await?;
    Ok(success_response(operator))
}

/// Delete an operator.
#[utoipa::path(
    delete,
    path = "/api/v1/master/operators/{id}",
    params(("id" = String, Path, description = "Operator id")),
    responses(
        (status = 200, description = "Operator deleted"),
        (status = 404, description = "Unknown id", body = crate::errors::ErrorResponse)
    ),
    tag = "master-data"
)]
pub async fn delete_operator(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ServiceError> {
    state.master_data.delete_operator(&id).await?;
    Ok(deleted_response())
}
