//! The wishlist item model and its database queries.

use rusqlite::{Connection, Row};
use serde::Serialize;
use time::OffsetDateTime;

use crate::{Error, database_id::DatabaseId, user::UserId};

/// Something the user would like to buy at some point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WishlistItem {
    /// The ID of the item.
    pub id: DatabaseId,
    /// When the item was added, in UTC.
    pub created_at: OffsetDateTime,
    /// What the item is.
    pub name: String,
    /// A URL where the item can be found.
    pub link: Option<String>,
    /// The expected price, if known.
    pub price: Option<f64>,
}

/// A validated wishlist item that is ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewWishlistItem {
    /// What the item is.
    pub name: String,
    /// A URL where the item can be found.
    pub link: Option<String>,
    /// The expected price, if known.
    pub price: Option<f64>,
}

/// Create the wishlist table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_wishlist_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS wishlist (
            id INTEGER PRIMARY KEY,
            created_at TEXT NOT NULL,
            name TEXT NOT NULL,
            link TEXT,
            price REAL,
            user_id TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_wishlist_user_created ON wishlist(user_id, created_at);",
    )?;

    Ok(())
}

/// Insert a wishlist item owned by `user_id`, timestamped with the current UTC time.
///
/// # Errors
/// Returns an [Error::SqlError] if there is an SQL error.
pub fn create_wishlist_item(
    item: NewWishlistItem,
    user_id: &UserId,
    connection: &Connection,
) -> Result<WishlistItem, Error> {
    connection
        .prepare(
            "INSERT INTO wishlist (created_at, name, link, price, user_id)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING id, created_at, name, link, price",
        )?
        .query_row(
            (
                OffsetDateTime::now_utc(),
                item.name,
                item.link,
                item.price,
                user_id.as_str(),
            ),
            map_wishlist_row,
        )
        .map_err(Error::from)
}

/// Retrieve the wishlist items owned by `user_id`, newest first.
///
/// # Errors
/// Returns an [Error::SqlError] if there is an SQL error.
pub fn get_wishlist(user_id: &UserId, connection: &Connection) -> Result<Vec<WishlistItem>, Error> {
    connection
        .prepare(
            "SELECT id, created_at, name, link, price
            FROM wishlist
            WHERE user_id = ?1
            ORDER BY created_at DESC, id DESC",
        )?
        .query_map((user_id.as_str(),), map_wishlist_row)?
        .map(|maybe_item| maybe_item.map_err(Error::from))
        .collect()
}

/// Delete the wishlist item `id` if it is owned by `user_id`, returning the number of rows
/// deleted.
pub fn delete_wishlist_item(
    id: DatabaseId,
    user_id: &UserId,
    connection: &Connection,
) -> Result<usize, Error> {
    connection
        .execute(
            "DELETE FROM wishlist WHERE id = ?1 AND user_id = ?2",
            (id, user_id.as_str()),
        )
        .map_err(Error::from)
}

#[cfg(test)]
pub fn count_wishlist_items(user_id: &UserId, connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row(
            "SELECT COUNT(id) FROM wishlist WHERE user_id = ?1",
            (user_id.as_str(),),
            |row| row.get(0),
        )
        .map_err(Error::from)
}

fn map_wishlist_row(row: &Row) -> Result<WishlistItem, rusqlite::Error> {
    Ok(WishlistItem {
        id: row.get(0)?,
        created_at: row.get(1)?,
        name: row.get(2)?,
        link: row.get(3)?,
        price: row.get(4)?,
    })
}

#[cfg(test)]
mod database_tests {
    use rusqlite::Connection;

    use crate::{db::initialize, user::UserId};

    use super::{
        NewWishlistItem, count_wishlist_items, create_wishlist_item, delete_wishlist_item,
        get_wishlist,
    };

    fn get_test_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        connection
    }

    fn new_item(name: &str) -> NewWishlistItem {
        NewWishlistItem {
            name: name.to_owned(),
            link: None,
            price: None,
        }
    }

    #[test]
    fn create_stores_optional_fields() {
        let connection = get_test_connection();
        let user_id = UserId::new("user-1");

        let item = create_wishlist_item(
            NewWishlistItem {
                name: "Lamp".to_owned(),
                link: Some("https://example.com/lamp".to_owned()),
                price: Some(49.99),
            },
            &user_id,
            &connection,
        )
        .unwrap();

        assert_eq!(item.name, "Lamp");
        assert_eq!(item.link.as_deref(), Some("https://example.com/lamp"));
        assert_eq!(item.price, Some(49.99));
        assert_eq!(get_wishlist(&user_id, &connection), Ok(vec![item]));
    }

    #[test]
    fn get_wishlist_returns_newest_first() {
        let connection = get_test_connection();
        let user_id = UserId::new("user-1");
        create_wishlist_item(new_item("First"), &user_id, &connection).unwrap();
        create_wishlist_item(new_item("Second"), &user_id, &connection).unwrap();

        let names = get_wishlist(&user_id, &connection)
            .unwrap()
            .into_iter()
            .map(|item| item.name)
            .collect::<Vec<_>>();

        assert_eq!(names, ["Second", "First"]);
    }

    #[test]
    fn get_wishlist_only_returns_items_for_user() {
        let connection = get_test_connection();
        create_wishlist_item(new_item("Lamp"), &UserId::new("user-2"), &connection).unwrap();

        let items = get_wishlist(&UserId::new("user-1"), &connection).unwrap();

        assert!(items.is_empty(), "got {items:?}");
    }

    #[test]
    fn delete_is_scoped_to_user() {
        let connection = get_test_connection();
        let owner = UserId::new("user-1");
        let item = create_wishlist_item(new_item("Lamp"), &owner, &connection).unwrap();

        assert_eq!(
            delete_wishlist_item(item.id, &UserId::new("user-2"), &connection),
            Ok(0)
        );
        assert_eq!(count_wishlist_items(&owner, &connection), Ok(1));

        assert_eq!(delete_wishlist_item(item.id, &owner, &connection), Ok(1));
        assert_eq!(count_wishlist_items(&owner, &connection), Ok(0));
    }
}
