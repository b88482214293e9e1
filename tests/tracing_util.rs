use tracing_subscriber::EnvFilter;

/// Installs a fmt subscriber for test output. Safe to call from every test;
/// repeated initialization is a no-op.
pub struct TestTracing;

impl TestTracing {
    pub fn init() -> Self {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
        TestTracing
    }
}
