//! The form fields submitted to create or delete a wishlist item.

use serde::{Deserialize, Serialize};

use crate::{
    Error,
    database_id::DatabaseId,
    form::{FormFields, optional, parse_id, parse_number, required},
    wishlist::NewWishlistItem,
};

/// The raw form data for adding an item to the wishlist.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct WishlistForm {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
}

impl WishlistForm {
    /// Convert the submitted fields into a [NewWishlistItem].
    ///
    /// Only the name is required. A link that is blank or not an `http(s)` URL is stored as
    /// absent, as is a price that is blank or not a number.
    ///
    /// # Errors
    /// Returns [Error::MissingField] if the name is absent or blank.
    pub fn validate(&self) -> Result<NewWishlistItem, Error> {
        let name = required(&self.name, "Name")?.to_owned();
        let link = optional(&self.link)
            .filter(|link| is_web_link(link))
            .map(str::to_owned);
        let price = optional(&self.price).and_then(|price| parse_number(price, "Price").ok());

        Ok(NewWishlistItem { name, link, price })
    }
}

/// Whether `link` uses the `http` or `https` scheme.
pub(crate) fn is_web_link(link: &str) -> bool {
    let link = link.to_ascii_lowercase();

    link.starts_with("https://") || link.starts_with("http://")
}

impl FormFields for WishlistForm {
    fn field_values(&self) -> Vec<(&'static str, Option<&str>)> {
        vec![
            ("Name", self.name.as_deref()),
            ("Link", self.link.as_deref()),
            ("Price", self.price.as_deref()),
        ]
    }
}

/// The raw form data for removing an item from the wishlist.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct DeleteWishlistItemForm {
    #[serde(default)]
    pub id: Option<String>,
}

impl DeleteWishlistItemForm {
    /// # Errors
    /// Returns [Error::MissingField] if the ID is absent or blank, or [Error::InvalidId] if it is
    /// not an integer.
    pub fn validate(&self) -> Result<DatabaseId, Error> {
        parse_id(required(&self.id, "Wishlist item ID")?, "Wishlist item ID")
    }
}

impl FormFields for DeleteWishlistItemForm {
    fn field_values(&self) -> Vec<(&'static str, Option<&str>)> {
        vec![("Wishlist item ID", self.id.as_deref())]
    }
}
