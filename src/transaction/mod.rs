//! Transactions: recording what was spent or earned, listing them and deleting them.
//!
//! This module contains:
//! - The `Transaction` models and the database functions for storing and querying them
//! - The form for creating a transaction and its validation
//! - The route handlers for the transactions page and its form actions

mod core;
mod create_endpoint;
mod delete_endpoint;
mod form;
mod transactions_page;

pub use core::{
    NewTransaction, Transaction, TransactionWithRelations, create_transaction,
    create_transaction_table, get_transactions_with_relations,
};
pub use create_endpoint::create_transaction_endpoint;
pub use delete_endpoint::delete_transaction_endpoint;
pub use form::{DeleteTransactionForm, NO_CARD, TransactionForm};
pub use transactions_page::get_transactions_page;

#[cfg(test)]
pub use core::count_transactions;
