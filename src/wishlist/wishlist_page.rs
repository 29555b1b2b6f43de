//! Defines the route handler for the wishlist page.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    db::run_query,
    endpoints,
    html::{
        BUTTON_DELETE_STYLE, BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
        LINK_STYLE, PAGE_CONTAINER_STYLE, base, dollar_input_styles, format_currency,
    },
    navigation::NavBar,
    user::UserId,
    wishlist::{WishlistItem, form::is_web_link, get_wishlist},
};

/// The state needed for the wishlist page.
#[derive(Debug, Clone)]
pub struct WishlistViewState {
    db_connection: Arc<Mutex<Connection>>,
    user_id: UserId,
}

impl FromRef<AppState> for WishlistViewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            user_id: state.user_id.clone(),
        }
    }
}

/// Render the user's wishlist, newest first, with the form for adding an item.
pub async fn get_wishlist_page(State(state): State<WishlistViewState>) -> Result<Response, Error> {
    let user_id = state.user_id;
    let items = run_query(state.db_connection, move |connection| {
        get_wishlist(&user_id, connection)
    })
    .await
    .inspect_err(|error| tracing::error!("could not load wishlist: {error}"))?;

    Ok(wishlist_view(&items).into_response())
}

fn wishlist_view(items: &[WishlistItem]) -> Markup {
    let nav_bar = NavBar::new(endpoints::WISHLIST_VIEW).into_html();

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-md space-y-8"
            {
                form
                    hx-post=(endpoints::WISHLIST_API)
                    hx-target-error="#alert-container"
                    class="w-full space-y-4"
                {
                    h2 class="text-xl font-bold" { "Add to Wishlist" }

                    div
                    {
                        label for="name" class=(FORM_LABEL_STYLE) { "Name" }

                        input
                            name="name"
                            id="name"
                            type="text"
                            placeholder="What do you want?"
                            required
                            autofocus
                            class=(FORM_TEXT_INPUT_STYLE);
                    }

                    div
                    {
                        label for="link" class=(FORM_LABEL_STYLE) { "Link" }

                        input
                            name="link"
                            id="link"
                            type="url"
                            placeholder="https://"
                            class=(FORM_TEXT_INPUT_STYLE);
                    }

                    div
                    {
                        label for="price" class=(FORM_LABEL_STYLE) { "Price" }

                        div class="input-wrapper w-full"
                        {
                            input
                                name="price"
                                id="price"
                                type="number"
                                step="0.01"
                                min="0"
                                placeholder="0.00"
                                class=(FORM_TEXT_INPUT_STYLE);
                        }
                    }

                    button type="submit" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
                    {
                        "Add Item"
                    }
                }

                section
                {
                    h2 class="text-xl font-bold mb-4" { "Wishlist" }

                    @if items.is_empty() {
                        p { "Your wishlist is empty." }
                    } @else {
                        ul class="divide-y divide-gray-200 dark:divide-gray-700"
                        {
                            @for item in items {
                                (wishlist_entry(item))
                            }
                        }
                    }
                }
            }
        }
    };

    base("Wishlist", &[dollar_input_styles()], &content)
}

fn wishlist_entry(item: &WishlistItem) -> Markup {
    html! {
        li class="flex items-center justify-between py-3" data-wishlist-item-id=(item.id)
        {
            div
            {
                @if let Some(link) = item.link.as_deref().filter(|link| is_web_link(link)) {
                    a href=(link) class=(LINK_STYLE) target="_blank" rel="noopener noreferrer"
                    {
                        (item.name)
                    }
                } @else {
                    span class="font-medium" { (item.name) }
                }

                @if let Some(price) = item.price {
                    span class="ml-2 text-gray-500 dark:text-gray-400" { (format_currency(price)) }
                }
            }

            button
                type="button"
                class=(BUTTON_DELETE_STYLE)
                hx-post=(endpoints::DELETE_WISHLIST_ITEM)
                hx-vals={ "{\"id\": \"" (item.id) "\"}" }
                hx-target="closest li"
                hx-swap="delete"
                hx-target-error="#alert-container"
            {
                "Delete"
            }
        }
    }
}
