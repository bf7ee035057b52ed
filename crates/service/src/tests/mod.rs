
/// Concurrent load-mutate-save behaviour
pub mod concurrency_tests;
