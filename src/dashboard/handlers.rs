//! Dashboard HTTP handler and view rendering.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    dashboard::{pivot::build_pivot, tables::pivot_table, transaction::get_pivot_transactions},
    db::run_query,
    endpoints,
    html::{PAGE_CONTAINER_STYLE, base, link},
    navigation::NavBar,
    user::UserId,
};

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The user whose transactions are summarised.
    pub user_id: UserId,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            user_id: state.user_id.clone(),
        }
    }
}

/// Display a page with the user's spending summed by group, category and month.
pub async fn get_dashboard_page(State(state): State<DashboardState>) -> Result<Response, Error> {
    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW);
    let user_id = state.user_id;

    let transactions = run_query(state.db_connection, move |connection| {
        get_pivot_transactions(&user_id, connection)
    })
    .await
    .inspect_err(|error| tracing::error!("Could not get transactions for dashboard: {error}"))?;

    if transactions.is_empty() {
        return Ok(dashboard_no_data_view(nav_bar).into_response());
    }

    let pivot = build_pivot(&transactions);

    Ok(dashboard_view(nav_bar, &pivot_table(&pivot)).into_response())
}

/// Renders the dashboard page when no transaction data exists.
fn dashboard_no_data_view(nav_bar: NavBar) -> Markup {
    let nav_bar = nav_bar.into_html();
    let transactions_link = link(endpoints::TRANSACTIONS_VIEW, "transactions page");

    let content = html!(
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            h2 class="text-xl font-bold"
            {
                "Nothing here yet..."
            }

            p
            {
                "The monthly summary will show up here once you add some transactions.
                You can add transactions on the " (transactions_link) "."
            }
        }
    );

    base("Dashboard", &[], &content)
}

fn dashboard_view(nav_bar: NavBar, table: &Markup) -> Markup {
    let nav_bar = nav_bar.into_html();

    let content = html!(
        (nav_bar)

        div
            id="dashboard-content"
            class="flex flex-col items-center px-2 lg:px-6 lg:py-8 mx-auto
                max-w-screen-xl text-gray-900 dark:text-white"
        {
            section class="w-full mx-auto mb-4"
            {
                h3 class="text-xl font-semibold mb-4" { "Monthly Summary" }

                (table)
            }
        }
    );

    base("Dashboard", &[], &content)
}
