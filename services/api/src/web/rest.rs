//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the catalog, purchase and admin endpoints and
//! the master definition for the OpenAPI specification.

use crate::error::{ApiError, ErrorResponse};
use crate::web::auth::{
    self, AuthResponse, CurrentUserResponse, LoginRequest, RegisterRequest, UserResponse,
};
use crate::web::extract::{lenient_id, JsonBody};
use crate::web::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use chrono::{DateTime, Utc};
use course_shop_core::domain::{Course, Purchase, PurchaseWithCourse, Stats, User};
use course_shop_core::service::ShopError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};
use utoipa::{IntoParams, OpenApi, ToSchema};

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        health_handler,
        list_courses_handler,
        get_course_handler,
        auth::register_handler,
        auth::login_handler,
        auth::current_user_handler,
        purchase_handler,
        list_purchases_handler,
        stats_handler,
    ),
    components(
        schemas(
            HealthResponse,
            CourseResponse,
            PurchaseRequest,
            PurchaseResponse,
            PurchaseCreatedResponse,
            PurchaseWithCourseResponse,
            StatsResponse,
            RegisterRequest,
            LoginRequest,
            AuthResponse,
            UserResponse,
            CurrentUserResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Course Shop API", description = "Course catalog, accounts and purchases.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Response and Payload Structs
//=========================================================================================

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    message: String,
}

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CourseQuery {
    /// Only return courses in this category (exact match).
    #[serde(alias = "categoria")]
    category: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseResponse {
    id: u32,
    name: String,
    description: String,
    price: f64,
    category: String,
    image_url: String,
    lessons: u32,
    hours: u32,
    students: u32,
}

impl From<Course> for CourseResponse {
    fn from(course: Course) -> Self {
        Self {
            id: course.id,
            name: course.name,
            description: course.description,
            price: course.price,
            category: course.category,
            image_url: course.image_url,
            lessons: course.lessons,
            hours: course.hours,
            students: course.students,
        }
    }
}

// Anything that is not a valid course id (a string, a negative number...)
// reads as absent and ends up as "course not found".
#[derive(Deserialize, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRequest {
    #[serde(default, alias = "cursoId", deserialize_with = "lenient_id")]
    course_id: Option<u32>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseResponse {
    id: u32,
    user_id: u32,
    course_id: u32,
    course_name: String,
    price: f64,
    purchased_at: DateTime<Utc>,
    #[schema(example = "approved")]
    status: String,
}

impl From<Purchase> for PurchaseResponse {
    fn from(purchase: Purchase) -> Self {
        Self {
            id: purchase.id,
            user_id: purchase.user_id,
            course_id: purchase.course_id,
            course_name: purchase.course_name,
            price: purchase.price,
            purchased_at: purchase.purchased_at,
            status: purchase.status.as_str().to_string(),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct PurchaseCreatedResponse {
    message: String,
    purchase: PurchaseResponse,
}

/// A purchase with the current catalog entry for its course.
#[derive(Serialize, ToSchema)]
pub struct PurchaseWithCourseResponse {
    #[serde(flatten)]
    purchase: PurchaseResponse,
    course: Option<CourseResponse>,
}

impl From<PurchaseWithCourse> for PurchaseWithCourseResponse {
    fn from(item: PurchaseWithCourse) -> Self {
        Self {
            purchase: item.purchase.into(),
            course: item.course.map(Into::into),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct StatsResponse {
    #[serde(rename = "totalUsuarios")]
    total_users: usize,
    #[serde(rename = "totalCursos")]
    total_courses: usize,
    #[serde(rename = "totalVendas")]
    total_purchases: usize,
    #[serde(rename = "faturamento")]
    revenue: f64,
}

impl From<Stats> for StatsResponse {
    fn from(stats: Stats) -> Self {
        Self {
            total_users: stats.total_users,
            total_courses: stats.total_courses,
            total_purchases: stats.total_purchases,
            revenue: stats.revenue,
        }
    }
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// Liveness message.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "The API is up", body = HealthResponse))
)]
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        message: "Course Shop API is running!".to_string(),
    })
}

/// List the catalog, optionally filtered by category.
#[utoipa::path(
    get,
    path = "/api/cursos",
    params(CourseQuery),
    responses((status = 200, description = "Courses", body = [CourseResponse]))
)]
pub async fn list_courses_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CourseQuery>,
) -> Result<Json<Vec<CourseResponse>>, ApiError> {
    let courses = state.shop.list_courses(query.category.as_deref()).await?;
    Ok(Json(courses.into_iter().map(Into::into).collect()))
}

/// Fetch one course.
///
/// Ids that are not numbers are reported as not found.
#[utoipa::path(
    get,
    path = "/api/cursos/{id}",
    params(("id" = u32, Path, description = "Course id")),
    responses(
        (status = 200, description = "The course", body = CourseResponse),
        (status = 404, description = "No such course", body = ErrorResponse)
    )
)]
pub async fn get_course_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<CourseResponse>, ApiError> {
    let course_id = id
        .trim()
        .parse::<u32>()
        .map_err(|_| ShopError::CourseNotFound)?;
    let course = state.shop.get_course(course_id).await?;
    Ok(Json(course.into()))
}

/// Buy a course for the authenticated user.
#[utoipa::path(
    post,
    path = "/api/compras",
    request_body = PurchaseRequest,
    responses(
        (status = 201, description = "Purchase recorded", body = PurchaseCreatedResponse),
        (status = 400, description = "Course already purchased or malformed JSON", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "No such course", body = ErrorResponse)
    ),
    params(
        ("Authorization" = String, Header, description = "The session token, sent as-is.")
    )
)]
pub async fn purchase_handler(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    JsonBody(req): JsonBody<PurchaseRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let course_id = req.course_id.ok_or(ShopError::CourseNotFound)?;
    let purchase = state
        .shop
        .purchase(&user, course_id)
        .await
        .inspect_err(|e| warn!("Purchase by user {} rejected: {}", user.id, e))?;

    info!(
        "User {} purchased course {} (purchase {})",
        user.id, purchase.course_id, purchase.id
    );

    let response = PurchaseCreatedResponse {
        message: "Purchase completed successfully".to_string(),
        purchase: purchase.into(),
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// List the authenticated user's purchases.
#[utoipa::path(
    get,
    path = "/api/compras",
    responses(
        (status = 200, description = "Purchases with course details", body = [PurchaseWithCourseResponse]),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    params(
        ("Authorization" = String, Header, description = "The session token, sent as-is.")
    )
)]
pub async fn list_purchases_handler(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
) -> Result<Json<Vec<PurchaseWithCourseResponse>>, ApiError> {
    let purchases = state.shop.list_purchases(&user).await?;
    Ok(Json(purchases.into_iter().map(Into::into).collect()))
}

/// Sales figures. Admins only.
#[utoipa::path(
    get,
    path = "/api/admin/stats",
    responses(
        (status = 200, description = "Totals and revenue", body = StatsResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Not an admin", body = ErrorResponse)
    ),
    params(
        ("Authorization" = String, Header, description = "The session token, sent as-is.")
    )
)]
pub async fn stats_handler(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
) -> Result<Json<StatsResponse>, ApiError> {
    let stats = state.shop.stats(&user).await?;
    Ok(Json(stats.into()))
}
