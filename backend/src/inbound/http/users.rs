//! Users API handlers.
//!
//! ```text
//! POST /api/users {"user_name":"apple","password":"aadsi8d!!%%s78dSd","full_name":"Apples Apples"}
//! GET /api/users/1
//! ```

use actix_web::{HttpResponse, get, http::header, post, web};
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::domain::{Error, RegistrationParts, RegistrationRequest, USER_NOT_FOUND_MESSAGE, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, UserViewSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::map_registration_validation_error;

/// Registration request body for `POST /api/users`.
///
/// Every field is optional at the JSON level so absent keys reach the
/// required-field check and get a field-specific message.
#[derive(Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct RegisterUserRequest {
    /// Requested username.
    #[schema(example = "apple")]
    pub user_name: Option<String>,
    /// Plaintext password, 8 to 71 bytes.
    #[schema(example = "aadsi8d!!%%s78dSd")]
    pub password: Option<String>,
    /// Display name.
    #[schema(example = "Apples Apples")]
    pub full_name: Option<String>,
    /// Optional nickname. `nick_name` is accepted as an alias.
    #[serde(default, alias = "nick_name", skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
}

impl Drop for RegisterUserRequest {
    fn drop(&mut self) {
        if let Some(password) = self.password.as_mut() {
            password.zeroize();
        }
    }
}

impl RegisterUserRequest {
    fn to_domain(&self) -> Result<RegistrationRequest, Error> {
        RegistrationRequest::try_from_parts(RegistrationParts {
            user_name: self.user_name.as_deref().unwrap_or_default(),
            password: self.password.as_deref().unwrap_or_default(),
            full_name: self.full_name.as_deref().unwrap_or_default(),
            nick_name: self.nickname.as_deref(),
        })
        .map_err(map_registration_validation_error)
    }
}

/// Register a new user.
///
/// Checks required fields, then the password policy and username uniqueness,
/// before hashing and storing. Responds with the sanitised user view.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = RegisterUserRequest,
    responses(
        (status = 201, description = "User registered", body = UserViewSchema,
            headers(("Location" = String, description = "URL of the new user"))),
        (status = 400, description = "Missing field, weak password, taken username or malformed JSON", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "registerUser"
)]
#[post("/users")]
pub async fn register_user(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterUserRequest>,
) -> ApiResult<HttpResponse> {
    let request = payload.to_domain()?;
    drop(payload);

    let view = state.registration.register(request).await?;
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/api/users/{}", view.id)))
        .json(view))
}

/// Fetch a registered user by id.
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = i32, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = UserViewSchema),
        (status = 404, description = "User doesn't exist", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = path
        .parse::<i32>()
        .map(UserId::new)
        .map_err(|_| Error::not_found(USER_NOT_FOUND_MESSAGE))?;

    let view = state.registration.find_user(id).await?;
    Ok(HttpResponse::Ok().json(view))
}
