//! Typed HTTP client for the memo service, plus the demo call sequence.

pub mod demo;
pub mod memo_client;

pub use demo::{run_demo, DemoReport};
pub use memo_client::{ClientError, MemoClient};
