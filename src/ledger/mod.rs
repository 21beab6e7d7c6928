//! Accounts, their transactions and balance queries

mod account;
mod book;
mod transaction;

pub use account::Account;
pub use book::Ledger;
pub use transaction::{Transaction, TransactionKind};
