//! Database initialisation and the helper for running queries off the async runtime.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Transaction as SqlTransaction};

use crate::{
    Error,
    lookup::{create_card_table, create_category_table, create_group_table},
    transaction::create_transaction_table,
    wishlist::create_wishlist_table,
};

/// Create the application tables if they do not already exist and enable foreign key checks.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    connection.execute_batch("PRAGMA foreign_keys = ON;")?;

    let transaction =
        SqlTransaction::new_unchecked(connection, rusqlite::TransactionBehavior::Exclusive)?;

    create_group_table(&transaction)?;
    create_category_table(&transaction)?;
    create_card_table(&transaction)?;
    create_transaction_table(&transaction)?;
    create_wishlist_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}

/// Run a single query against the shared connection on the blocking thread pool.
///
/// The connection lock is held only for the duration of `query`, so several calls can be
/// issued together with `tokio::try_join!` and awaited as a group.
///
/// # Errors
/// Returns [Error::DatabaseLockError] if the lock is poisoned,
/// [Error::QueryTaskFailed] if the blocking task panicked or was cancelled,
/// or whatever error `query` returns.
pub async fn run_query<T, F>(connection: Arc<Mutex<Connection>>, query: F) -> Result<T, Error>
where
    T: Send + 'static,
    F: FnOnce(&Connection) -> Result<T, Error> + Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let connection = connection.lock().map_err(|error| {
            tracing::error!("could not acquire database lock: {error}");
            Error::DatabaseLockError
        })?;

        query(&connection)
    })
    .await
    .map_err(|error| {
        tracing::error!("query task did not complete: {error}");
        Error::QueryTaskFailed(error.to_string())
    })?
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;

    use crate::Error;

    use super::{initialize, run_query};

    #[test]
    fn initialize_is_idempotent() {
        let connection = Connection::open_in_memory().unwrap();

        assert_eq!(initialize(&connection), Ok(()));
        assert_eq!(initialize(&connection), Ok(()));
    }

    #[test]
    fn initialize_enables_foreign_keys() {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        let enabled: i64 = connection
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();

        assert_eq!(enabled, 1);
    }

    #[tokio::test]
    async fn run_query_returns_query_result() {
        let connection = Arc::new(Mutex::new(Connection::open_in_memory().unwrap()));

        let got = run_query(connection, |connection| {
            connection
                .query_row("SELECT 40 + 2", [], |row| row.get::<_, i64>(0))
                .map_err(Error::from)
        })
        .await;

        assert_eq!(got, Ok(42));
    }

    #[tokio::test]
    async fn run_query_propagates_query_error() {
        let connection = Arc::new(Mutex::new(Connection::open_in_memory().unwrap()));

        let got: Result<i64, Error> = run_query(connection, |connection| {
            connection
                .query_row("SELECT id FROM missing_table", [], |row| row.get(0))
                .map_err(Error::from)
        })
        .await;

        assert!(matches!(got, Err(Error::SqlError(_))), "got {got:?}");
    }
}
