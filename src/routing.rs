//! Application router configuration.

use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    dashboard::get_dashboard_page,
    endpoints,
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, get_transactions_page,
    },
    wishlist::{create_wishlist_item_endpoint, delete_wishlist_item_endpoint, get_wishlist_page},
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let page_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(endpoints::TRANSACTIONS_VIEW, get(get_transactions_page))
        .route(endpoints::WISHLIST_VIEW, get(get_wishlist_page))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    // Form actions respond with HX-Redirect on success or an alert fragment on failure.
    let action_routes = Router::new()
        .route(
            endpoints::TRANSACTIONS_API,
            post(create_transaction_endpoint),
        )
        .route(
            endpoints::DELETE_TRANSACTION,
            post(delete_transaction_endpoint),
        )
        .route(endpoints::WISHLIST_API, post(create_wishlist_item_endpoint))
        .route(
            endpoints::DELETE_WISHLIST_ITEM,
            post(delete_wishlist_item_endpoint),
        );

    page_routes
        .merge(action_routes)
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the dashboard page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::DASHBOARD_VIEW)
}
