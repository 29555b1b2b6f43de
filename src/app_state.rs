//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{Error, db::initialize, user::UserId};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The user whose records are read and written.
    ///
    /// Every query and mutation is scoped to this ID.
    pub user_id: UserId,

    /// The database connection
    pub db_connection: Arc<Mutex<Connection>>,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the tables for the domain models.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(db_connection: Connection, user_id: UserId) -> Result<Self, Error> {
        initialize(&db_connection)?;

        let connection = Arc::new(Mutex::new(db_connection));

        Ok(Self {
            user_id,
            db_connection: connection,
        })
    }
}
