//! Defines the route handler for the page that lists transactions and the form for creating them.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use time::{Date, OffsetDateTime};

use crate::{
    AppState, Error,
    db::run_query,
    endpoints,
    html::{
        BUTTON_DELETE_STYLE, BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
        PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base,
        dollar_input_styles, format_currency,
    },
    lookup::{Card, Category, Group, get_all_cards, get_all_categories, get_all_groups},
    navigation::NavBar,
    transaction::{NO_CARD, TransactionWithRelations, get_transactions_with_relations},
    user::UserId,
};

/// The state needed for the transactions page.
#[derive(Debug, Clone)]
pub struct TransactionsViewState {
    /// The database connection for managing transactions.
    db_connection: Arc<Mutex<Connection>>,
    user_id: UserId,
}

impl FromRef<AppState> for TransactionsViewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            user_id: state.user_id.clone(),
        }
    }
}

/// Everything the transactions page needs, loaded in one go.
struct TransactionsPageData {
    transactions: Vec<TransactionWithRelations>,
    groups: Vec<Group>,
    categories: Vec<Category>,
    cards: Vec<Card>,
}

/// Render the user's transactions along with the form for adding one.
///
/// The transactions and the lookup tables for the form are queried concurrently. If any query
/// fails the whole page fails.
pub async fn get_transactions_page(
    State(state): State<TransactionsViewState>,
) -> Result<Response, Error> {
    let user_id = state.user_id.clone();

    let (transactions, groups, categories, cards) = tokio::try_join!(
        run_query(state.db_connection.clone(), move |connection| {
            get_transactions_with_relations(&user_id, connection)
        }),
        run_query(state.db_connection.clone(), get_all_groups),
        run_query(state.db_connection.clone(), get_all_categories),
        run_query(state.db_connection, get_all_cards),
    )
    .inspect_err(|error| tracing::error!("could not load transactions page: {error}"))?;

    let data = TransactionsPageData {
        transactions,
        groups,
        categories,
        cards,
    };

    Ok(transactions_view(&data, OffsetDateTime::now_utc().date()).into_response())
}

fn transactions_view(data: &TransactionsPageData, today: Date) -> Markup {
    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW).into_html();

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-5xl space-y-8"
            {
                (create_transaction_form(data, today))

                section
                {
                    h2 class="text-xl font-bold mb-4" { "Transactions" }

                    @if data.transactions.is_empty() {
                        p { "No transactions yet. Add one with the form above." }
                    } @else {
                        (transactions_table(&data.transactions))
                    }
                }
            }
        }
    };

    base("Transactions", &[dollar_input_styles()], &content)
}

fn create_transaction_form(data: &TransactionsPageData, today: Date) -> Markup {
    html! {
        form
            hx-post=(endpoints::TRANSACTIONS_API)
            hx-target-error="#alert-container"
            class="w-full max-w-md space-y-4"
        {
            h2 class="text-xl font-bold" { "New Transaction" }

            div
            {
                label for="date" class=(FORM_LABEL_STYLE) { "Date" }

                input
                    name="date"
                    id="date"
                    type="date"
                    required
                    value=(today)
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="description" class=(FORM_LABEL_STYLE) { "Description" }

                input
                    name="description"
                    id="description"
                    type="text"
                    placeholder="Description"
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

                // w-full needed to ensure input takes the full width when prefilled with a value
                div class="input-wrapper w-full"
                {
                    input
                        name="amount"
                        id="amount"
                        type="number"
                        step="0.01"
                        placeholder="0.00"
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }
            }

            div
            {
                label for="group_id" class=(FORM_LABEL_STYLE) { "Group" }

                select name="group_id" id="group_id" required class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="" { "Select a group" }

                    @for group in &data.groups {
                        option value=(group.id) { (group.name) }
                    }
                }
            }

            div
            {
                label for="category_id" class=(FORM_LABEL_STYLE) { "Category" }

                select name="category_id" id="category_id" required class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="" { "Select a category" }

                    @for group in &data.groups {
                        optgroup label=(group.name)
                        {
                            @for category in data
                                .categories
                                .iter()
                                .filter(|category| category.group_id == group.id)
                            {
                                option value=(category.id) { (category.name) }
                            }
                        }
                    }
                }
            }

            div
            {
                label for="card_id" class=(FORM_LABEL_STYLE) { "Card" }

                select name="card_id" id="card_id" class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value=(NO_CARD) { "No card" }

                    @for card in &data.cards {
                        option value=(card.id) { (card.name) }
                    }
                }
            }

            button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
            {
                "Create Transaction"
            }
        }
    }
}

fn transactions_table(transactions: &[TransactionWithRelations]) -> Markup {
    html! {
        div class="relative overflow-x-auto shadow-md rounded"
        {
            table class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Group" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Card" }
                        th scope="col" class=(TABLE_CELL_STYLE) { span class="sr-only" { "Actions" } }
                    }
                }

                tbody
                {
                    @for transaction in transactions {
                        (transaction_row(transaction))
                    }
                }
            }
        }
    }
}

fn transaction_row(transaction: &TransactionWithRelations) -> Markup {
    let group_name = transaction.group.as_ref().map(|group| group.name.as_str());
    let category_name = transaction
        .category
        .as_ref()
        .map(|category| category.name.as_str());
    let card_name = transaction.card.as_ref().map(|card| card.name.as_str());

    html! {
        tr class=(TABLE_ROW_STYLE) data-transaction-id=(transaction.id)
        {
            td class=(TABLE_CELL_STYLE) { (transaction.date) }
            td class=(TABLE_CELL_STYLE) { (transaction.description) }
            td class={ (TABLE_CELL_STYLE) " text-right" } { (format_currency(transaction.amount)) }
            td class=(TABLE_CELL_STYLE) { (group_name.unwrap_or("-")) }
            td class=(TABLE_CELL_STYLE) { (category_name.unwrap_or("-")) }
            td class=(TABLE_CELL_STYLE) { (card_name.unwrap_or("-")) }
            td class=(TABLE_CELL_STYLE)
            {
                button
                    type="button"
                    class=(BUTTON_DELETE_STYLE)
                    hx-post=(endpoints::DELETE_TRANSACTION)
                    hx-vals={ "{\"id\": \"" (transaction.id) "\"}" }
                    hx-confirm="Are you sure you want to delete this transaction?"
                    hx-target="closest tr"
                    hx-swap="delete"
                    hx-target-error="#alert-container"
                {
                    "Delete"
                }
            }
        }
    }
}
