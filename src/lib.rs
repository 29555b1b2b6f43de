//! Ledgerlight is a web app for tracking personal spending and a wishlist.
//!
//! Transactions are recorded against a group, a category and optionally the card they were paid
//! with. The dashboard sums them into a pivot table by group, category and month.
//!
//! This library provides a REST API that directly serves HTML pages.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod dashboard;
mod database_id;
mod db;
mod endpoints;
mod form;
mod html;
mod internal_server_error;
mod lookup;
mod navigation;
mod not_found;
mod routing;
mod transaction;
mod user;
mod wishlist;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use dashboard::{
    Month, MonthKey, Pivot, PivotTable, PivotTransaction, UNKNOWN_CATEGORY, UNKNOWN_GROUP,
    build_pivot,
};
pub use database_id::DatabaseId;
pub use db::initialize as initialize_db;
pub use lookup::{Card, Category, Group, create_card, create_category, create_group};
pub use routing::build_router;
pub use transaction::{NewTransaction, Transaction, create_transaction};
pub use user::UserId;
pub use wishlist::{NewWishlistItem, WishlistItem, create_wishlist_item};

use crate::{internal_server_error::InternalServerError, not_found::get_404_not_found_response};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A required form field was absent or blank.
    ///
    /// The field label is used as-is in the message shown to the user.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// A form field that should hold a number, e.g. an amount, could not be parsed as a finite
    /// number.
    #[error("{field} must be a valid number")]
    InvalidNumber {
        /// The label of the offending field.
        field: &'static str,
        /// The text that was submitted.
        value: String,
    },

    /// A date was not formatted as `YYYY-MM-DD`.
    #[error("\"{0}\" is not a valid date, use the format YYYY-MM-DD")]
    InvalidDate(String),

    /// A reference to a group, category, card or record was not an integer ID.
    #[error("{field} must be a valid ID")]
    InvalidId {
        /// The label of the offending field.
        field: &'static str,
        /// The text that was submitted.
        value: String,
    },

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// The blocking task that ran a query panicked or was cancelled.
    #[error("the query task did not complete: {0}")]
    QueryTaskFailed(String),
}

impl Error {
    /// The HTTP status for a form action that failed with this error.
    ///
    /// Problems with the submitted input are client errors, everything else is on the server.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::MissingField(_)
            | Error::InvalidNumber { .. }
            | Error::InvalidDate(_)
            | Error::InvalidId { .. } => StatusCode::BAD_REQUEST,
            Error::NotFound => StatusCode::NOT_FOUND,
            Error::SqlError(_) | Error::DatabaseLockError | Error::QueryTaskFailed(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            Error::DatabaseLockError => InternalServerError::default().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}
