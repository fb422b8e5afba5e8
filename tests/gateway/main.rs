// tests/gateway/main.rs

mod admission_tests;
mod shutdown_tests;

pub use fixtures::test_clock::TestClock;
pub use fixtures::test_server::{TestServer, client};
