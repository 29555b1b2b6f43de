//! Form actions for adding items to and removing items from the wishlist.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use rusqlite::Connection;

use crate::{
    AppState,
    db::run_query,
    endpoints,
    form::FormFailure,
    user::UserId,
    wishlist::{
        DeleteWishlistItemForm, WishlistForm,
        core::{create_wishlist_item, delete_wishlist_item},
    },
};

/// The state needed to add or remove wishlist items.
#[derive(Debug, Clone)]
pub struct WishlistActionState {
    pub db_connection: Arc<Mutex<Connection>>,
    pub user_id: UserId,
}

impl FromRef<AppState> for WishlistActionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            user_id: state.user_id.clone(),
        }
    }
}

/// A route handler for adding an item to the wishlist, redirects to the wishlist view on success.
pub async fn create_wishlist_item_endpoint(
    State(state): State<WishlistActionState>,
    Form(form): Form<WishlistForm>,
) -> Response {
    let item = match form.validate() {
        Ok(item) => item,
        Err(error) => {
            tracing::warn!("rejected wishlist form: {error}");
            return FormFailure::invalid(error, form).into_response();
        }
    };

    let user_id = state.user_id;
    let result = run_query(state.db_connection, move |connection| {
        create_wishlist_item(item, &user_id, connection)
    })
    .await;

    match result {
        Ok(_) => (
            HxRedirect(endpoints::WISHLIST_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("could not create wishlist item: {error}");
            FormFailure::store("Failed to create wishlist item. Please try again.", form)
                .into_response()
        }
    }
}

/// A route handler for removing an item from the wishlist.
///
/// Responds with an empty 200 so htmx removes the list entry, even when no item matched the ID.
pub async fn delete_wishlist_item_endpoint(
    State(state): State<WishlistActionState>,
    Form(form): Form<DeleteWishlistItemForm>,
) -> Response {
    let item_id = match form.validate() {
        Ok(id) => id,
        Err(error) => {
            tracing::warn!("rejected delete wishlist item form: {error}");
            return FormFailure::invalid(error, form).into_response();
        }
    };

    let user_id = state.user_id;
    let result = run_query(state.db_connection, move |connection| {
        delete_wishlist_item(item_id, &user_id, connection)
    })
    .await;

    match result {
        Ok(_) => StatusCode::OK.into_response(),
        Err(error) => {
            tracing::error!("Could not delete wishlist item {item_id}: {error}");
            FormFailure::store("Failed to delete wishlist item. Please try again.", form)
                .into_response()
        }
    }
}
