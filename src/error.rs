//! Error types.
//!
//! Contract violations (a view committed to the wrong store) panic; the
//! enums here cover conditions a caller can recover from.

use std::io;

use thiserror::Error;

/// Errors raised by the record store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("record store is full (capacity {capacity})")]
    Full { capacity: usize },
}

/// Errors raised while loading or saving the order file.
#[derive(Error, Debug)]
pub enum PersistError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("malformed record on line {line}: {reason}")]
    Malformed { line: u64, reason: String },
    #[error("order {order_id} has a line break in a text field")]
    LineBreak { order_id: u64 },
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors surfaced by the interactive console.
#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("console I/O error: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Persist(#[from] PersistError),
}
