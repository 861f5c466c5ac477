//! Statement execution
//!
//! [`Executor`] runs one statement per call on a pooled connection.
//! [`ExecutorTransaction`] keeps a single connection for several statements.

pub mod core;
pub mod transaction;

pub use self::core::Executor;
pub use transaction::ExecutorTransaction;
