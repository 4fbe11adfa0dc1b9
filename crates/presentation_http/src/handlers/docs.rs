//! Root redirect to the interactive documentation

use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

/// Redirect `/` to the interactive docs with a plain 302
pub async fn root_redirect() -> Response {
    (StatusCode::FOUND, [(header::LOCATION, "/docs")]).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn root_redirects_to_docs() {
        let response = root_redirect().await;
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/docs"
        );
    }
}
