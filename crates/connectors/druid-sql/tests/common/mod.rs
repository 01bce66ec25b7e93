//! Common functions used across test cases.

use druid_sql::{Connection, Driver};
use druid_sql_configuration::environment::FixedEnvironment;
use druid_sql_configuration::ParsedConfiguration;
use tests_common::mock_engine::{CannedResponse, MockEngine};

pub const WIKIPEDIA: &str = r##"[
  ["__time", "added", "channel", "isRobot"],
  ["TIMESTAMP", "LONG", "STRING", "BOOLEAN"],
  ["2015-09-12T00:46:58.771Z", 36, "#en.wikipedia", false],
  ["2015-09-12T00:47:00.496Z", 17, "#ca.wikipedia", true]
]"##;

/// Start a mock engine answering every query with `response`.
pub async fn start_engine(response: CannedResponse) -> MockEngine {
    let _ = env_logger::builder().is_test(true).try_init();
    MockEngine::start(response).await.unwrap()
}

/// A mock engine answering with two rows of the wikipedia datasource.
pub async fn start_wikipedia_engine() -> MockEngine {
    start_engine(CannedResponse::typed_array(
        &serde_json::from_str(WIKIPEDIA).unwrap(),
    ))
    .await
}

/// A driver with its own registry and no environment variables.
pub fn driver() -> (Driver<FixedEnvironment>, prometheus::Registry) {
    let mut registry = prometheus::Registry::new();
    let driver = Driver::new(FixedEnvironment::default(), &mut registry).unwrap();
    (driver, registry)
}

pub fn connect(engine: &MockEngine) -> Connection {
    driver().0.open(&engine.dsn()).unwrap()
}

pub fn connect_with(engine: &MockEngine, configure: impl FnOnce(&mut ParsedConfiguration)) -> Connection {
    let mut configuration = ParsedConfiguration::with_dsn(engine.dsn());
    configure(&mut configuration);
    driver().0.connect(configuration).unwrap()
}
