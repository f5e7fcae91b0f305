//! Gives every error response the JSON error body with the request path.

use axum::{
    extract::Request,
    http::header::CONTENT_TYPE,
    middleware::Next,
    response::{IntoResponse, Response},
};

use common::ErrorResponse;

/// Fill the path into pending error bodies and replace bare framework
/// rejections (empty or plain-text 4xx/5xx) with the JSON body.
pub async fn attach_request_path(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_owned();
    let response = next.run(request).await;

    if let Some(payload) = response.extensions().get::<ErrorResponse>() {
        if !payload.path.is_empty() {
            return response;
        }
        return payload.clone().with_path(path).into_response();
    }

    let status = response.status();
    if !(status.is_client_error() || status.is_server_error()) || !is_bare(&response) {
        return response;
    }

    let message = status.canonical_reason().unwrap_or("Request failed");
    ErrorResponse::new(status, vec![message.to_string()], path).into_response()
}

fn is_bare(response: &Response) -> bool {
    match response.headers().get(CONTENT_TYPE) {
        None => true,
        Some(value) => value
            .to_str()
            .map(|ct| ct.starts_with("text/plain"))
            .unwrap_or(false),
    }
}
