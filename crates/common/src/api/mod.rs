//! Versioned wire protocol of the memo service.

pub mod v1;
