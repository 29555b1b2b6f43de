//! The wishlist: things the user would like to buy, with an optional link and price.

mod core;
mod endpoints;
mod form;
mod wishlist_page;

pub use core::{
    NewWishlistItem, WishlistItem, create_wishlist_item, create_wishlist_table, get_wishlist,
};
pub use endpoints::{create_wishlist_item_endpoint, delete_wishlist_item_endpoint};
pub use form::{DeleteWishlistItemForm, WishlistForm};
pub use wishlist_page::get_wishlist_page;
