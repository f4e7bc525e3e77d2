//! Per-call access to the shared connection pool.

pub mod connection;

pub use connection::{ConnectionProvider, PoolConnectionProvider, ScopedConnection};
