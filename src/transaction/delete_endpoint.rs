use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use rusqlite::Connection;

use crate::{
    AppState,
    db::run_query,
    form::FormFailure,
    transaction::{DeleteTransactionForm, core::delete_transaction},
    user::UserId,
};

/// The state needed to delete a transaction.
#[derive(Debug, Clone)]
pub struct DeleteTransactionState {
    /// The database connection for managing transactions.
    db_connection: Arc<Mutex<Connection>>,
    user_id: UserId,
}

impl FromRef<AppState> for DeleteTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            user_id: state.user_id.clone(),
        }
    }
}

/// A route handler for deleting a transaction.
///
/// Responds with an empty 200 so htmx removes the table row, even when no row matched the ID.
pub async fn delete_transaction_endpoint(
    State(state): State<DeleteTransactionState>,
    Form(form): Form<DeleteTransactionForm>,
) -> Response {
    let transaction_id = match form.validate() {
        Ok(id) => id,
        Err(error) => {
            tracing::warn!("rejected delete transaction form: {error}");
            return FormFailure::invalid(error, form).into_response();
        }
    };

    let user_id = state.user_id;
    let result = run_query(state.db_connection, move |connection| {
        delete_transaction(transaction_id, &user_id, connection)
    })
    .await;

    match result {
        Ok(rows_affected) => {
            if rows_affected == 0 {
                tracing::debug!("no transaction {transaction_id} to delete");
            }

            // The status code has to be 200 OK or htmx will not delete the table row.
            StatusCode::OK.into_response()
        }
        Err(error) => {
            tracing::error!("Could not delete transaction {transaction_id}: {error}");
            FormFailure::store("Failed to delete transaction. Please try again.", form)
                .into_response()
        }
    }
}
