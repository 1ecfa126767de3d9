#[cfg(test)]
mod tests {
    use indoc::indoc;
    use sqlpeek_core::{
        Connection, DebugLevel, FormatterRegistry, GeneratedKeys, PreparedStatement,
        StatementError, StatementFactory,
    };
    use sqlpeek_sqlite::SqliteConnection;
    use sqlpeek_tests::{init_logs, silent_logs};
    use std::{path::Path, sync::Mutex, time::Duration};
    use tokio::fs;

    static MUTEX: Mutex<()> = Mutex::new(());

    #[tokio::test]
    async fn create_database() {
        init_logs();
        const DB_PATH: &'static str = "../target/debug/creation.sqlite";
        let _guard = MUTEX.lock().unwrap();
        if Path::new(DB_PATH).exists() {
            fs::remove_file(DB_PATH)
                .await
                .expect(format!("Failed to remove test database file {}", DB_PATH).as_str());
        }
        assert!(
            !Path::new(DB_PATH).exists(),
            "Database file should not exist before test"
        );
        SqliteConnection::connect(&format!("sqlite://{}?mode=rwc", DB_PATH))
            .await
            .expect("Could not open the database");
        assert!(
            Path::new(DB_PATH).exists(),
            "Database file should be created after connection"
        );
        SqliteConnection::connect(&format!("sqlite://{}?mode=ro", DB_PATH))
            .await
            .expect("Could not open the database");
        fs::remove_file(DB_PATH)
            .await
            .expect(format!("Failed to remove existing test database file {}", DB_PATH).as_str());
        silent_logs! {
            assert!(
                SqliteConnection::connect(&format!("sqlite://{}?mode=ro", DB_PATH))
                    .await
                    .is_err(),
                "Should not be able to open in read only unexisting database"
            );
        }
    }

    #[tokio::test]
    async fn wrong_url() {
        silent_logs! {
            assert!(
                SqliteConnection::connect("duckdb://some_value")
                    .await
                    .is_err()
            );
        };
    }

    #[tokio::test]
    async fn product_name() {
        init_logs();
        let connection = SqliteConnection::connect("sqlite://:memory:")
            .await
            .expect("Could not open the database");
        assert_eq!(connection.database_product_name().unwrap(), "SQLite");
        let registry = FormatterRegistry::default();
        let formatter = registry.formatter_for(&connection).unwrap();
        assert!(std::sync::Arc::ptr_eq(
            &formatter,
            &registry.default_formatter()
        ));
    }

    #[tokio::test]
    async fn closed_connection() {
        init_logs();
        let mut connection = SqliteConnection::connect("sqlite://:memory:")
            .await
            .expect("Could not open the database");
        let mut statement = connection
            .prepare_statement("SELECT 1 AS one")
            .await
            .expect("Failed to prepare");
        connection.close().expect("Failed to close the connection");
        assert!(connection.is_closed());
        let factory = StatementFactory::default();
        silent_logs! {
            let error = factory
                .statement_with_level(&mut connection, "SELECT 1", DebugLevel::On)
                .await
                .err()
                .expect("Preparing on a closed connection should fail");
            assert_eq!(
                error.downcast_ref::<StatementError>(),
                Some(&StatementError::ConnectionClosed)
            );
        }
        // Statements prepared earlier keep the database alive
        let result = statement.execute_query().await.expect("Failed to run");
        assert_eq!(result.get_as::<i64>(0, "one").unwrap(), 1);
    }

    #[tokio::test]
    async fn statement_outlives_connection() {
        init_logs();
        let mut connection = SqliteConnection::connect("sqlite://:memory:")
            .await
            .expect("Could not open the database");
        let mut statement = connection
            .prepare_statement("SELECT 'still here' AS value")
            .await
            .expect("Failed to prepare");
        drop(connection);
        let result = statement.execute_query().await.expect("Failed to run");
        assert_eq!(result.get_as::<String>(0, "value").unwrap(), "still here");
        statement.close().expect("Failed to close the statement");
        drop(statement);
    }

    #[tokio::test]
    async fn invalid_sql() {
        init_logs();
        let mut connection = SqliteConnection::connect("sqlite://:memory:")
            .await
            .expect("Could not open the database");
        let factory = StatementFactory::new(DebugLevel::On, Default::default());
        silent_logs! {
            assert!(
                factory
                    .statement(&mut connection, "SELEC 1")
                    .await
                    .is_err()
            );
            assert!(
                connection
                    .prepare_statement("SELECT 1; SELECT 2")
                    .await
                    .is_err()
            );
        }
    }

    #[tokio::test]
    async fn statement_options() {
        init_logs();
        let mut connection = SqliteConnection::connect("sqlite://:memory:")
            .await
            .expect("Could not open the database");
        let factory = StatementFactory::new(DebugLevel::On, Default::default());
        let mut statement = factory
            .statement(
                &mut connection,
                indoc! {"
                    WITH RECURSIVE n(i) AS (SELECT 1 UNION ALL SELECT i + 1 FROM n WHERE i < 10)
                    SELECT i, 'abcdefgh' AS text FROM n
                "},
            )
            .await
            .expect("Failed to prepare");
        assert_eq!(statement.metadata().unwrap(), ["i", "text"]);
        assert_eq!(statement.parameter_count().unwrap(), 0);
        statement.set_max_rows(3).unwrap();
        statement.set_max_field_size(4).unwrap();
        statement
            .set_query_timeout(Duration::from_millis(250))
            .unwrap();
        assert_eq!(statement.max_rows().unwrap(), 3);
        assert_eq!(statement.max_field_size().unwrap(), 4);
        assert_eq!(
            statement.query_timeout().unwrap(),
            Duration::from_millis(250)
        );
        let result = statement.execute_query().await.expect("Failed to run");
        assert_eq!(result.len(), 3);
        assert_eq!(result.get_as::<String>(2, "text").unwrap(), "abcd");
        assert!(statement.warnings().unwrap().is_empty());

        // Generic execution keeps the result for later
        assert!(statement.execute().await.expect("Failed to run"));
        assert_eq!(statement.update_count().unwrap(), None);
        let result = statement
            .result_set()
            .unwrap()
            .expect("The result set should be available");
        assert_eq!(result.len(), 3);
        assert!(statement.result_set().unwrap().is_none());
        assert!(!statement.more_results().unwrap());

        // Generated keys
        statement
            .execute_update_sql("CREATE TABLE keys (id INTEGER PRIMARY KEY, v TEXT)")
            .await
            .expect("Failed to create the table");
        let count = statement
            .execute_update_sql_with_keys("INSERT INTO keys (v) VALUES ('a')", GeneratedKeys::Return)
            .await
            .expect("Failed to insert");
        assert_eq!(count, 1);
        let keys = statement.generated_keys().unwrap();
        assert_eq!(keys.len(), 1);
        assert_eq!(keys.get_as::<i64>(0, "rowid").unwrap(), 1);
        assert!(
            !statement
                .execute_sql_with_keys("INSERT INTO keys (v) VALUES ('b')", GeneratedKeys::NoReturn)
                .await
                .expect("Failed to insert")
        );
        assert_eq!(statement.update_count().unwrap(), Some(1));
        assert!(statement.generated_keys().unwrap().is_empty());

        // Closing the proxy closes the driver statement
        statement.close_on_completion().unwrap();
        assert!(statement.is_close_on_completion().unwrap());
        statement.execute_query().await.expect("Failed to run");
        assert!(statement.is_closed());
        silent_logs! {
            assert!(statement.execute_query().await.is_err());
        }
    }

    #[tokio::test]
    async fn update_on_query() {
        init_logs();
        let mut connection = SqliteConnection::connect("sqlite://:memory:")
            .await
            .expect("Could not open the database");
        let mut statement = connection
            .prepare_statement("SELECT 1")
            .await
            .expect("Failed to prepare");
        silent_logs! {
            assert!(statement.execute_update().await.is_err());
            assert!(statement.execute_update_sql("SELECT 2").await.is_err());
            assert!(statement.execute_query_sql("CREATE TABLE t (a)").await.is_err());
        }
    }
}
