//! Test harness wiring the pipeline and the router to mock services.
//!
//! Nothing here touches the network; every collaborator is a mock from
//! `writer_core::kernel::test_dependencies`.

use std::sync::Arc;

use axum::Router;
use writer_core::domains::pipeline::Pipeline;
use writer_core::kernel::TestDependencies;
use writer_core::server::build_app;

pub const TEST_ORIGIN: &str = "http://localhost:3000";

pub struct TestHarness {
    pub deps: TestDependencies,
    pub pipeline: Arc<Pipeline>,
}

impl TestHarness {
    pub fn new(deps: TestDependencies) -> Self {
        // Run tests with: RUST_LOG=debug cargo test -- --nocapture
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let pipeline = Arc::new(Pipeline::new(&deps.server_deps()));
        Self { deps, pipeline }
    }

    pub fn router(&self) -> Router {
        build_app(
            self.pipeline.clone(),
            self.deps.search.is_some(),
            &[TEST_ORIGIN.to_string()],
        )
    }
}
