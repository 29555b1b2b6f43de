//! Alert fragments for displaying error messages to users.
//!
//! Alerts are returned by failed form actions and swapped into the page's alert container by htmx.

use maud::{Markup, html};

/// A dismissable error message shown at the bottom of the page, optionally listing the values
/// the user submitted.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub message: String,
    pub submitted: Vec<(&'static str, String)>,
}

impl Alert {
    pub fn into_html(self) -> Markup {
        let Alert { message, submitted } = self;

        html! {
            div
                role="alert"
                class="p-4 mb-4 text-sm text-red-800 rounded-lg bg-red-50
                    dark:bg-gray-800 dark:text-red-400"
                onclick="this.remove()"
            {
                p class="font-medium" { (message) }

                @if !submitted.is_empty() {
                    dl class="mt-2 grid grid-cols-2 gap-x-4"
                    {
                        @for (label, value) in &submitted {
                            dt class="font-semibold" { (label) }
                            dd { (value) }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};
    use scraper::Selector;

    use crate::test_utils::{assert_valid_html, parse_html_fragment};

    use super::Alert;

    #[tokio::test]
    async fn alert_renders_message() {
        let alert = Alert {
            message: "Name is required".to_owned(),
            submitted: Vec::new(),
        };

        let response = (StatusCode::BAD_REQUEST, alert.into_html()).into_response();
        let html = parse_html_fragment(response).await;

        assert_valid_html(&html);
        let paragraph = html
            .select(&Selector::parse("div[role='alert'] p").unwrap())
            .next()
            .expect("No alert message found");
        assert_eq!(paragraph.text().collect::<String>(), "Name is required");
        assert!(html.select(&Selector::parse("dl").unwrap()).next().is_none());
    }

    #[tokio::test]
    async fn error_alert_lists_submitted_values() {
        let alert = Alert {
            message: "Amount must be a valid number".to_owned(),
            submitted: vec![("Amount", "abc".to_owned())],
        };

        let response = (StatusCode::BAD_REQUEST, alert.into_html()).into_response();
        let html = parse_html_fragment(response).await;

        let dt = html
            .select(&Selector::parse("dt").unwrap())
            .next()
            .expect("No submitted field label found");
        let dd = html
            .select(&Selector::parse("dd").unwrap())
            .next()
            .expect("No submitted field value found");
        assert_eq!(dt.text().collect::<String>(), "Amount");
        assert_eq!(dd.text().collect::<String>(), "abc");
    }
}
