//! Types and helpers shared by the memo server, its client and the service layer.

pub mod api;
pub mod types;
pub mod utils;
