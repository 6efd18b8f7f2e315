use crate::core::application::ApplicationServices;
use crate::domain::auth::{AuthService, ServiceAuthenticateParams};
use crate::errors::AppError;
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use http::header::AUTHORIZATION;

pub async fn auth<S: ApplicationServices>(
    State(state): State<S>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_service = state.auth_service();
    let authorization = req
        .headers()
        .get(AUTHORIZATION)
        .map(|value| value.to_str().map(str::to_string))
        .transpose()
        .map_err(|_| AppError::Unauthorized(Some("malformed authorization header".to_string())))?;

    let user = auth_service
        .authenticate(ServiceAuthenticateParams { authorization })
        .await
        .map_err(|e| AppError::Unauthorized(Some(e.to_string())))?;

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}
