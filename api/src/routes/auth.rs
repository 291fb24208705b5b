//! Authentication routes.

use actix_web::{web, HttpResponse};
use validator::Validate;

use ss_core::domain::value_objects::auth::LoginOutcome;
use ss_core::services::auth::RegisterInput;
use ss_shared::types::ApiResponse;

use crate::dto::auth::{
    ConfirmEmailRequest, ForgotPasswordRequest, LoginRequest, LoginResponse, MessageResponse,
    RefreshTokenRequest, RegisterRequest, ResetPasswordRequest, TwoFactorSendRequest,
    TwoFactorVerifyRequest,
};
use crate::error::{to_response, validation_response};
use crate::middleware::AuthContext;
use crate::state::AppState;

/// POST /api/v1/auth/register
pub async fn register(
    state: web::Data<AppState>,
    request: web::Json<RegisterRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return validation_response(&errors);
    }

    let request = request.into_inner();
    let input = RegisterInput {
        username: request.username,
        email: request.email,
        password: request.password,
        first_name: request.first_name,
        last_name: request.last_name,
        company_name: request.company_name,
    };

    match state.auth.register(input).await {
        Ok(tokens) => {
            HttpResponse::Created().json(ApiResponse::success(LoginResponse::Success { tokens }))
        }
        Err(err) => to_response(&err),
    }
}

/// POST /api/v1/auth/login
pub async fn login(state: web::Data<AppState>, request: web::Json<LoginRequest>) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return validation_response(&errors);
    }

    match state.auth.login(&request.username, &request.password).await {
        Ok(LoginOutcome::Success(tokens)) => {
            HttpResponse::Ok().json(ApiResponse::success(LoginResponse::Success { tokens }))
        }
        Ok(LoginOutcome::TwoFactorRequired { user_id }) => HttpResponse::Ok().json(
            ApiResponse::success(LoginResponse::TwoFactorRequired { user_id }),
        ),
        Err(err) => to_response(&err),
    }
}

/// POST /api/v1/auth/two-factor/send
pub async fn send_two_factor(
    state: web::Data<AppState>,
    request: web::Json<TwoFactorSendRequest>,
) -> HttpResponse {
    match state.auth.send_two_factor_code(request.user_id).await {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::success(MessageResponse::new(
            "security code sent",
        ))),
        Err(err) => to_response(&err),
    }
}

/// POST /api/v1/auth/two-factor/verify
pub async fn verify_two_factor(
    state: web::Data<AppState>,
    request: web::Json<TwoFactorVerifyRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return validation_response(&errors);
    }

    match state
        .auth
        .verify_two_factor(request.user_id, &request.code)
        .await
    {
        Ok(tokens) => {
            HttpResponse::Ok().json(ApiResponse::success(LoginResponse::Success { tokens }))
        }
        Err(err) => to_response(&err),
    }
}

/// POST /api/v1/auth/confirm-email
pub async fn confirm_email(
    state: web::Data<AppState>,
    auth: AuthContext,
    request: web::Json<ConfirmEmailRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return validation_response(&errors);
    }

    match state.auth.confirm_email(auth.user_id, &request.code).await {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::success(MessageResponse::new(
            "email confirmed",
        ))),
        Err(err) => to_response(&err),
    }
}

/// POST /api/v1/auth/confirm-email/resend
pub async fn resend_confirmation(state: web::Data<AppState>, auth: AuthContext) -> HttpResponse {
    match state.auth.resend_confirmation(auth.user_id).await {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::success(MessageResponse::new(
            "confirmation email sent",
        ))),
        Err(err) => to_response(&err),
    }
}

/// POST /api/v1/auth/forgot-password
pub async fn forgot_password(
    state: web::Data<AppState>,
    request: web::Json<ForgotPasswordRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return validation_response(&errors);
    }

    // Deliberately indistinguishable for known and unknown addresses
    match state.auth.forgot_password(&request.email).await {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::success(MessageResponse::new(
            "if the address is registered, a reset email is on its way",
        ))),
        Err(err) => to_response(&err),
    }
}

/// POST /api/v1/auth/reset-password
pub async fn reset_password(
    state: web::Data<AppState>,
    request: web::Json<ResetPasswordRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return validation_response(&errors);
    }

    match state
        .auth
        .reset_password(&request.username, &request.code, &request.new_password)
        .await
    {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::success(MessageResponse::new(
            "password reset",
        ))),
        Err(err) => to_response(&err),
    }
}

/// POST /api/v1/auth/refresh
pub async fn refresh(
    state: web::Data<AppState>,
    request: web::Json<RefreshTokenRequest>,
) -> HttpResponse {
    match state.auth.refresh_tokens(&request.refresh_token).await {
        Ok(tokens) => {
            HttpResponse::Ok().json(ApiResponse::success(LoginResponse::Success { tokens }))
        }
        Err(err) => to_response(&err),
    }
}

/// POST /api/v1/auth/logout
pub async fn logout(state: web::Data<AppState>, auth: AuthContext) -> HttpResponse {
    match state.auth.logout(auth.user_id).await {
        Ok(()) => {
            HttpResponse::Ok().json(ApiResponse::success(MessageResponse::new("logged out")))
        }
        Err(err) => to_response(&err),
    }
}
