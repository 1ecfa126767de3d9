use crate::silent_logs;
use sqlpeek::{
    Connection, DebugLevel, DebuggableStatement, FormatterRegistry, ORACLE_FORMATTER,
    PreparedStatement, StatementError,
};
use std::sync::{Arc, LazyLock};
use time::macros::{date, datetime, time};
use tokio::sync::Mutex;

pub async fn rendering<C: Connection>(connection: &mut C) {
    static MUTEX: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));
    let _lock = MUTEX.lock().await;

    let registry = Arc::new(FormatterRegistry::default());
    let formatter = registry
        .formatter_for(connection)
        .expect("Failed to get the formatter for the connection");
    let mut statement =
        DebuggableStatement::prepare(connection, "SELECT ? AS a, ? AS b", formatter, DebugLevel::On)
            .await
            .expect("Failed to prepare the statement");
    let pristine = statement.render_sql();
    assert_eq!(
        pristine,
        "SELECT ? (missing variable # 1) AS a, ? (missing variable # 2) AS b"
    );

    statement.set_long(1, 5).expect("Failed to set a");
    assert_eq!(
        statement.render_sql(),
        "SELECT 5 AS a, ? (missing variable # 2) AS b"
    );
    assert!(statement.parameters()[0].is_set());
    assert!(!statement.parameters()[1].is_set());

    // Out of range leaves everything as it was
    silent_logs! {
        let error = statement
            .set_long(3, 7)
            .expect_err("Setting parameter 3 of 2 should fail");
        assert_eq!(
            error.downcast_ref::<StatementError>(),
            Some(&StatementError::ParameterIndexOutOfBounds { index: 3, count: 2 })
        );
        assert!(statement.set_long(0, 7).is_err());
    }
    assert_eq!(
        statement.render_sql(),
        "SELECT 5 AS a, ? (missing variable # 2) AS b"
    );

    // Quotes are not escaped
    statement.set_string(2, "it's").expect("Failed to set b");
    assert_eq!(statement.render_sql(), "SELECT 5 AS a, 'it's' AS b");

    statement.clear_parameters().expect("Failed to clear the parameters");
    assert_eq!(statement.render_sql(), pristine);

    statement.set_long(1, 5).expect("Failed to set a");
    statement.set_string(2, "x").expect("Failed to set b");
    let result = statement
        .execute_query()
        .await
        .expect("Failed to run the statement");
    assert_eq!(result.get_as::<i64>(0, "a").unwrap(), 5);
    assert_eq!(result.get_as::<String>(0, "b").unwrap(), "x");
    assert_eq!(statement.render_sql(), "SELECT 5 AS a, 'x' AS b");
    assert_eq!(statement.elapsed(), None);

    // Switching formatter changes the next rendering
    statement
        .set_timestamp(2, datetime!(2024-01-15 10:30:45.5))
        .expect("Failed to set b");
    assert_eq!(
        statement.render_sql(),
        "SELECT 5 AS a, TO_TIMESTAMP('2024-01-15 10:30:45.5','YYYY-MM-DD HH24:MI:SS:FF') AS b"
    );
    statement.set_formatter(
        registry
            .get(ORACLE_FORMATTER)
            .expect("The Oracle formatter is registered"),
    );
    assert_eq!(
        statement.render_sql(),
        "SELECT 5 AS a, TO_TIMESTAMP('2024-01-15 10:30:45.5','YYYY-MM-DD HH24:MI:SS.FF') AS b"
    );
    statement.set_time(1, time!(9:05:03)).expect("Failed to set a");
    statement.set_date(2, date!(2024 - 01 - 15)).expect("Failed to set b");
    assert_eq!(
        statement.render_sql(),
        "SELECT TO_DATE('09:05:03','HH24:MI:SS') AS a, TO_DATE('2024-01-15 00:00:00','YYYY-MM-DD HH24:MI:SS') AS b"
    );
    let result = statement
        .execute_query()
        .await
        .expect("Failed to run the statement");
    assert_eq!(result.get_as::<String>(0, "a").unwrap(), "09:05:03");
    assert_eq!(result.get_as::<String>(0, "b").unwrap(), "2024-01-15");

    // No placeholders at all
    let formatter = registry.default_formatter();
    let mut statement = DebuggableStatement::prepare(
        connection,
        "SELECT 'why?' AS question",
        formatter,
        DebugLevel::On,
    )
    .await
    .expect("Failed to prepare the statement");
    assert_eq!(statement.placeholder_count(), 0);
    assert_eq!(statement.render_sql(), "SELECT 'why?' AS question");
    let result = statement
        .execute_query()
        .await
        .expect("Failed to run the statement");
    assert_eq!(result.get_as::<String>(0, "question").unwrap(), "why?");
}
