//! The page to display when a route or resource does not exist.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::html::error_view;

pub async fn get_404_not_found() -> Response {
    get_404_not_found_response()
}

pub fn get_404_not_found_response() -> Response {
    (
        StatusCode::NOT_FOUND,
        Html(
            error_view(
                "Not Found",
                "404",
                "Something's missing.",
                "Sorry, we can't find that page. You'll find lots to explore on the home page.",
            )
            .into_string(),
        ),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::test_utils::{assert_valid_html, parse_html_document};

    use super::get_404_not_found;

    #[tokio::test]
    async fn responds_with_not_found_page() {
        let response = get_404_not_found().await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
    }
}
