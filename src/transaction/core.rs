//! Defines the core data models and database queries for transactions.

use rusqlite::{Connection, Row};
use serde::Serialize;
use time::{Date, OffsetDateTime};

use crate::{
    Error,
    database_id::DatabaseId,
    lookup::{Card, Category, Group, map_optional_card, map_optional_category, map_optional_group},
    user::UserId,
};

// ============================================================================
// MODELS
// ============================================================================

/// An expense or income as stored, with its lookup references as raw IDs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: DatabaseId,
    /// When the transaction happened.
    pub date: Date,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The amount of money spent or earned. No sign convention is enforced.
    pub amount: f64,
    /// The budget group, if the transaction still references one.
    pub group_id: Option<DatabaseId>,
    /// The category within the group, if the transaction still references one.
    pub category_id: Option<DatabaseId>,
    /// The card the transaction was paid with, if any.
    pub card_id: Option<DatabaseId>,
}

/// A validated transaction that is ready to be inserted.
///
/// Build one from submitted form fields with [crate::transaction::TransactionForm::validate].
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    /// When the transaction happened.
    pub date: Date,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The amount of money spent or earned.
    pub amount: f64,
    /// The budget group the transaction belongs to.
    pub group_id: DatabaseId,
    /// Expected to belong to `group_id`, although this is not checked.
    pub category_id: DatabaseId,
    /// The card the transaction was paid with, if any.
    pub card_id: Option<DatabaseId>,
}

/// A transaction with its group, category and card expanded.
///
/// A relation is `None` when the transaction does not reference one. The date is kept as the
/// stored text so that a row with a malformed date is still listed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionWithRelations {
    pub id: DatabaseId,
    pub date: String,
    pub description: String,
    pub amount: f64,
    pub group: Option<Group>,
    pub category: Option<Category>,
    pub card: Option<Card>,
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create the transactions table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS transactions (
            id INTEGER PRIMARY KEY,
            date TEXT NOT NULL,
            description TEXT NOT NULL,
            amount REAL NOT NULL,
            group_id INTEGER,
            category_id INTEGER,
            card_id INTEGER,
            user_id TEXT NOT NULL,
            created_at TEXT NOT NULL,
            FOREIGN KEY(group_id) REFERENCES groups(id) ON UPDATE CASCADE ON DELETE SET NULL,
            FOREIGN KEY(category_id) REFERENCES categories(id) ON UPDATE CASCADE ON DELETE SET NULL,
            FOREIGN KEY(card_id) REFERENCES cards(id) ON UPDATE CASCADE ON DELETE SET NULL
        );

        CREATE INDEX IF NOT EXISTS idx_transactions_user_date ON transactions(user_id, date);",
    )?;

    Ok(())
}

/// Insert a transaction owned by `user_id` and return the stored record.
///
/// # Errors
/// Returns an [Error::SqlError] if a group, category or card ID does not refer to an existing
/// row, or if there is some other SQL error.
pub fn create_transaction(
    transaction: NewTransaction,
    user_id: &UserId,
    connection: &Connection,
) -> Result<Transaction, Error> {
    connection
        .prepare(
            "INSERT INTO transactions
                (date, description, amount, group_id, category_id, card_id, user_id, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
             RETURNING id, date, description, amount, group_id, category_id, card_id",
        )?
        .query_row(
            (
                transaction.date,
                transaction.description,
                transaction.amount,
                transaction.group_id,
                transaction.category_id,
                transaction.card_id,
                user_id.as_str(),
                OffsetDateTime::now_utc(),
            ),
            map_transaction_row,
        )
        .map_err(Error::from)
}

/// Retrieve the transactions owned by `user_id` with their group, category and card,
/// most recent first.
///
/// # Errors
/// Returns an [Error::SqlError] if there is an SQL error.
pub fn get_transactions_with_relations(
    user_id: &UserId,
    connection: &Connection,
) -> Result<Vec<TransactionWithRelations>, Error> {
    connection
        .prepare(
            "SELECT
                t.id, t.date, t.description, t.amount,
                g.id, g.name,
                c.id, c.group_id, c.name,
                card.id, card.name
            FROM transactions t
            LEFT JOIN groups g ON g.id = t.group_id
            LEFT JOIN categories c ON c.id = t.category_id
            LEFT JOIN cards card ON card.id = t.card_id
            WHERE t.user_id = ?1
            ORDER BY t.date DESC, t.id DESC",
        )?
        .query_map((user_id.as_str(),), |row| {
            Ok(TransactionWithRelations {
                id: row.get(0)?,
                date: row.get(1)?,
                description: row.get(2)?,
                amount: row.get(3)?,
                group: map_optional_group(row, 4)?,
                category: map_optional_category(row, 6)?,
                card: map_optional_card(row, 9)?,
            })
        })?
        .map(|maybe_transaction| maybe_transaction.map_err(Error::from))
        .collect()
}

type RowsAffected = usize;

/// Delete the transaction `id` if it is owned by `user_id`.
///
/// Deleting a transaction that does not exist, or that belongs to another user, affects no
/// rows and is not an error.
pub fn delete_transaction(
    id: DatabaseId,
    user_id: &UserId,
    connection: &Connection,
) -> Result<RowsAffected, Error> {
    connection
        .execute(
            "DELETE FROM transactions WHERE id = ?1 AND user_id = ?2",
            (id, user_id.as_str()),
        )
        .map_err(Error::from)
}

/// Get the number of transactions owned by `user_id`.
#[cfg(test)]
pub fn count_transactions(user_id: &UserId, connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row(
            "SELECT COUNT(id) FROM transactions WHERE user_id = ?1",
            (user_id.as_str(),),
            |row| row.get(0),
        )
        .map_err(Error::from)
}

/// Map a database row to a Transaction.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction {
        id: row.get(0)?,
        date: row.get(1)?,
        description: row.get(2)?,
        amount: row.get(3)?,
        group_id: row.get(4)?,
        category_id: row.get(5)?,
        card_id: row.get(6)?,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod database_tests {
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        Error,
        db::initialize,
        lookup::{Card, Category, Group, create_card, create_category, create_group},
        user::UserId,
    };

    use super::{
        NewTransaction, count_transactions, create_transaction, delete_transaction,
        get_transactions_with_relations,
    };

    struct Fixture {
        connection: Connection,
        group: Group,
        category: Category,
        card: Card,
    }

    fn get_fixture() -> Fixture {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        let group = create_group("Food", &connection).unwrap();
        let category = create_category("Groceries", group.id, &connection).unwrap();
        let card = create_card("Visa", &connection).unwrap();

        Fixture {
            connection,
            group,
            category,
            card,
        }
    }

    fn new_transaction(fixture: &Fixture, date: time::Date, amount: f64) -> NewTransaction {
        NewTransaction {
            date,
            description: "Supermarket".to_owned(),
            amount,
            group_id: fixture.group.id,
            category_id: fixture.category.id,
            card_id: None,
        }
    }

    #[test]
    fn create_returns_stored_transaction() {
        let fixture = get_fixture();
        let user_id = UserId::new("user-1");
        let new = NewTransaction {
            card_id: Some(fixture.card.id),
            ..new_transaction(&fixture, date!(2024 - 03 - 05), -10.5)
        };

        let transaction = create_transaction(new, &user_id, &fixture.connection).unwrap();

        assert_eq!(transaction.id, 1);
        assert_eq!(transaction.date, date!(2024 - 03 - 05));
        assert_eq!(transaction.description, "Supermarket");
        assert_eq!(transaction.amount, -10.5);
        assert_eq!(transaction.group_id, Some(fixture.group.id));
        assert_eq!(transaction.category_id, Some(fixture.category.id));
        assert_eq!(transaction.card_id, Some(fixture.card.id));
    }

    #[test]
    fn create_fails_on_missing_category() {
        let fixture = get_fixture();
        let new = NewTransaction {
            category_id: 999,
            ..new_transaction(&fixture, date!(2024 - 03 - 05), 1.0)
        };

        let result = create_transaction(new, &UserId::new("user-1"), &fixture.connection);

        assert!(matches!(result, Err(Error::SqlError(_))), "got {result:?}");
    }

    #[test]
    fn get_transactions_expands_relations_and_orders_by_date_desc() {
        let fixture = get_fixture();
        let user_id = UserId::new("user-1");
        create_transaction(
            new_transaction(&fixture, date!(2024 - 02 - 01), 7.0),
            &user_id,
            &fixture.connection,
        )
        .unwrap();
        create_transaction(
            NewTransaction {
                card_id: Some(fixture.card.id),
                ..new_transaction(&fixture, date!(2024 - 03 - 20), 5.0)
            },
            &user_id,
            &fixture.connection,
        )
        .unwrap();

        let transactions = get_transactions_with_relations(&user_id, &fixture.connection).unwrap();

        assert_eq!(transactions.len(), 2);
        assert_eq!(transactions[0].date, "2024-03-20");
        assert_eq!(transactions[0].card, Some(fixture.card.clone()));
        assert_eq!(transactions[0].group, Some(fixture.group.clone()));
        assert_eq!(transactions[0].category, Some(fixture.category.clone()));
        assert_eq!(transactions[1].date, "2024-02-01");
        assert_eq!(transactions[1].card, None);
    }

    #[test]
    fn get_transactions_yields_none_for_absent_relations() {
        let fixture = get_fixture();
        let user_id = UserId::new("user-1");
        fixture
            .connection
            .execute(
                "INSERT INTO transactions (date, description, amount, user_id, created_at)
                 VALUES ('2024-01-01', 'Orphan', 3.0, 'user-1', '2024-01-01 00:00:00')",
                (),
            )
            .unwrap();

        let transactions = get_transactions_with_relations(&user_id, &fixture.connection).unwrap();

        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].group, None);
        assert_eq!(transactions[0].category, None);
        assert_eq!(transactions[0].card, None);
    }

    #[test]
    fn get_transactions_keeps_rows_with_malformed_dates() {
        let fixture = get_fixture();
        let user_id = UserId::new("user-1");
        fixture
            .connection
            .execute(
                "INSERT INTO transactions (date, description, amount, user_id, created_at)
                 VALUES ('not a date', 'Mystery', 2.0, 'user-1', '2024-01-01 00:00:00')",
                (),
            )
            .unwrap();

        let transactions = get_transactions_with_relations(&user_id, &fixture.connection).unwrap();

        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].date, "not a date");
        assert_eq!(transactions[0].description, "Mystery");
    }

    #[test]
    fn get_transactions_only_returns_rows_for_user() {
        let fixture = get_fixture();
        let user_id = UserId::new("user-1");
        let other_user_id = UserId::new("user-2");
        create_transaction(
            new_transaction(&fixture, date!(2024 - 02 - 01), 7.0),
            &other_user_id,
            &fixture.connection,
        )
        .unwrap();

        let transactions = get_transactions_with_relations(&user_id, &fixture.connection).unwrap();

        assert!(transactions.is_empty(), "got {transactions:?}");
    }

    #[test]
    fn delete_is_scoped_to_user() {
        let fixture = get_fixture();
        let owner = UserId::new("user-1");
        let transaction = create_transaction(
            new_transaction(&fixture, date!(2024 - 02 - 01), 7.0),
            &owner,
            &fixture.connection,
        )
        .unwrap();

        let rows_affected =
            delete_transaction(transaction.id, &UserId::new("user-2"), &fixture.connection)
                .unwrap();
        assert_eq!(rows_affected, 0);
        assert_eq!(count_transactions(&owner, &fixture.connection), Ok(1));

        let rows_affected =
            delete_transaction(transaction.id, &owner, &fixture.connection).unwrap();
        assert_eq!(rows_affected, 1);
        assert_eq!(count_transactions(&owner, &fixture.connection), Ok(0));
    }
}
