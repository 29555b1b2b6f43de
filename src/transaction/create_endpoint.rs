//! Defines the endpoint for creating a new transaction.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
// axum_extra's Form tolerates absent fields and repeated keys. Blank values arrive as
// Some("") and are rejected during validation.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use rusqlite::Connection;

use crate::{
    AppState, db::run_query, endpoints, form::FormFailure, transaction::TransactionForm,
    transaction::core::create_transaction, user::UserId,
};

/// The state needed to create a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The user that new transactions are recorded for.
    pub user_id: UserId,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            user_id: state.user_id.clone(),
        }
    }
}

/// A route handler for creating a new transaction, redirects to transactions view on success.
///
/// Invalid input is rejected with a 400 alert before the database is touched.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let transaction = match form.validate() {
        Ok(transaction) => transaction,
        Err(error) => {
            tracing::warn!("rejected transaction form: {error}");
            return FormFailure::invalid(error, form).into_response();
        }
    };

    let user_id = state.user_id.clone();
    let result = run_query(state.db_connection, move |connection| {
        create_transaction(transaction, &user_id, connection)
    })
    .await;

    match result {
        Ok(transaction) => {
            tracing::debug!("created transaction {}", transaction.id);

            (
                HxRedirect(endpoints::TRANSACTIONS_VIEW.to_owned()),
                StatusCode::SEE_OTHER,
            )
                .into_response()
        }
        Err(error) => {
            tracing::error!("could not create transaction: {error}");

            FormFailure::store("Failed to create transaction. Please try again.", form)
                .into_response()
        }
    }
}
