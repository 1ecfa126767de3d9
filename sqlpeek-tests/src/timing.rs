use sqlpeek::{Connection, DebugLevel, PreparedStatement, StatementFactory};
use std::sync::LazyLock;
use tokio::sync::Mutex;

pub async fn timing<C: Connection>(connection: &mut C) {
    static MUTEX: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));
    let _lock = MUTEX.lock().await;

    let factory = StatementFactory::default();
    let mut statement = factory
        .statement_with_level(
            connection,
            "WITH RECURSIVE n(i) AS (SELECT 1 UNION ALL SELECT i + 1 FROM n WHERE i < ?) SELECT COUNT(*) AS total FROM n",
            DebugLevel::Verbose,
        )
        .await
        .expect("Failed to prepare the statement");
    let debuggable = statement
        .as_debuggable()
        .expect("The statement should be debuggable");
    assert_eq!(debuggable.debug_level(), DebugLevel::Verbose);
    assert_eq!(debuggable.elapsed(), None);

    statement.set_int(1, 1000).expect("Failed to set the limit");
    let result = statement
        .execute_query()
        .await
        .expect("Failed to run the statement");
    assert_eq!(result.get_as::<i64>(0, "total").unwrap(), 1000);
    let debuggable = statement
        .as_debuggable()
        .expect("The statement should be debuggable");
    assert!(debuggable.elapsed().is_some());

    // Level On does not measure
    let mut statement = factory
        .statement_with_level(connection, "SELECT ? AS value", DebugLevel::On)
        .await
        .expect("Failed to prepare the statement");
    statement.set_int(1, 1).expect("Failed to set the value");
    statement
        .execute()
        .await
        .expect("Failed to run the statement");
    assert_eq!(
        statement
            .as_debuggable()
            .expect("The statement should be debuggable")
            .elapsed(),
        None
    );
    assert_eq!(statement.to_string(), "SELECT 1 AS value");
}
