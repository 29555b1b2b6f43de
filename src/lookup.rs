//! The lookup tables that transactions reference: budget groups, their categories and
//! payment cards.
//!
//! These tables are shared by all users and are maintained outside the web app, so only
//! read queries are exposed to handlers. The insert functions exist for seeding databases.

use rusqlite::{Connection, Row};
use serde::Serialize;

use crate::{Error, database_id::DatabaseId};

/// A top-level budget bucket, e.g. "Living Expenses".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Group {
    /// The ID of the group.
    pub id: DatabaseId,
    /// The display name of the group.
    pub name: String,
}

/// A sub-bucket that belongs to exactly one [Group].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    /// The ID of the category.
    pub id: DatabaseId,
    /// The group that owns this category.
    pub group_id: DatabaseId,
    /// The display name of the category.
    pub name: String,
}

/// A payment instrument label, e.g. "Visa Debit".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Card {
    /// The ID of the card.
    pub id: DatabaseId,
    /// The display name of the card.
    pub name: String,
}

pub fn create_group_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS groups (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL
        )",
        (),
    )?;

    Ok(())
}

pub fn create_category_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS categories (
            id INTEGER PRIMARY KEY,
            group_id INTEGER NOT NULL,
            name TEXT NOT NULL,
            FOREIGN KEY(group_id) REFERENCES groups(id) ON UPDATE CASCADE ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_categories_group_id ON categories(group_id);",
    )?;

    Ok(())
}

pub fn create_card_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS cards (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL
        )",
        (),
    )?;

    Ok(())
}

/// Insert a group and return it with its generated ID.
pub fn create_group(name: &str, connection: &Connection) -> Result<Group, Error> {
    connection.execute("INSERT INTO groups (name) VALUES (?1)", (name,))?;

    Ok(Group {
        id: connection.last_insert_rowid(),
        name: name.to_owned(),
    })
}

/// Insert a category under `group_id` and return it with its generated ID.
///
/// # Errors
/// Returns an [Error::SqlError] if `group_id` does not refer to a group.
pub fn create_category(
    name: &str,
    group_id: DatabaseId,
    connection: &Connection,
) -> Result<Category, Error> {
    connection.execute(
        "INSERT INTO categories (group_id, name) VALUES (?1, ?2)",
        (group_id, name),
    )?;

    Ok(Category {
        id: connection.last_insert_rowid(),
        group_id,
        name: name.to_owned(),
    })
}

/// Insert a card and return it with its generated ID.
pub fn create_card(name: &str, connection: &Connection) -> Result<Card, Error> {
    connection.execute("INSERT INTO cards (name) VALUES (?1)", (name,))?;

    Ok(Card {
        id: connection.last_insert_rowid(),
        name: name.to_owned(),
    })
}

/// Retrieve all groups ordered by name.
pub fn get_all_groups(connection: &Connection) -> Result<Vec<Group>, Error> {
    connection
        .prepare("SELECT id, name FROM groups ORDER BY name ASC, id ASC")?
        .query_map([], |row| {
            Ok(Group {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })?
        .map(|maybe_group| maybe_group.map_err(Error::from))
        .collect()
}

/// Retrieve all categories ordered by name.
pub fn get_all_categories(connection: &Connection) -> Result<Vec<Category>, Error> {
    connection
        .prepare("SELECT id, group_id, name FROM categories ORDER BY name ASC, id ASC")?
        .query_map([], |row| {
            Ok(Category {
                id: row.get(0)?,
                group_id: row.get(1)?,
                name: row.get(2)?,
            })
        })?
        .map(|maybe_category| maybe_category.map_err(Error::from))
        .collect()
}

/// Retrieve all cards ordered by name.
pub fn get_all_cards(connection: &Connection) -> Result<Vec<Card>, Error> {
    connection
        .prepare("SELECT id, name FROM cards ORDER BY name ASC, id ASC")?
        .query_map([], |row| {
            Ok(Card {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })?
        .map(|maybe_card| maybe_card.map_err(Error::from))
        .collect()
}

/// Read an optional, joined group from the columns `offset` (id) and `offset + 1` (name).
///
/// Returns `None` when the joined row is absent, i.e. the ID column is NULL.
pub(crate) fn map_optional_group(
    row: &Row,
    offset: usize,
) -> Result<Option<Group>, rusqlite::Error> {
    let id: Option<DatabaseId> = row.get(offset)?;

    Ok(match id {
        Some(id) => Some(Group {
            id,
            name: row.get(offset + 1)?,
        }),
        None => None,
    })
}

/// Read an optional, joined category from the columns `offset` (id), `offset + 1` (group ID)
/// and `offset + 2` (name).
pub(crate) fn map_optional_category(
    row: &Row,
    offset: usize,
) -> Result<Option<Category>, rusqlite::Error> {
    let id: Option<DatabaseId> = row.get(offset)?;

    Ok(match id {
        Some(id) => Some(Category {
            id,
            group_id: row.get(offset + 1)?,
            name: row.get(offset + 2)?,
        }),
        None => None,
    })
}

/// Read an optional, joined card from the columns `offset` (id) and `offset + 1` (name).
pub(crate) fn map_optional_card(row: &Row, offset: usize) -> Result<Option<Card>, rusqlite::Error> {
    let id: Option<DatabaseId> = row.get(offset)?;

    Ok(match id {
        Some(id) => Some(Card {
            id,
            name: row.get(offset + 1)?,
        }),
        None => None,
    })
}
