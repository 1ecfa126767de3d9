use indoc::indoc;
use sqlpeek::{
    Connection, DebugLevel, PreparedStatement, SqlType, StatementFactory, Value,
};
use std::sync::LazyLock;
use time::macros::date;
use tokio::sync::Mutex;

pub async fn simple<C: Connection>(connection: &mut C) {
    static MUTEX: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));
    let _lock = MUTEX.lock().await;

    let mut factory = StatementFactory::default();
    factory.set_default_debug(DebugLevel::On);

    // Setup
    factory
        .statement(connection, "DROP TABLE IF EXISTS sqlpeek_simple")
        .await
        .expect("Failed to prepare the drop table statement")
        .execute_update()
        .await
        .expect("Failed to drop the sqlpeek_simple table");
    factory
        .statement(
            connection,
            indoc! {"
                CREATE TABLE sqlpeek_simple (
                    id INTEGER PRIMARY KEY,
                    name TEXT,
                    amount REAL,
                    active INTEGER,
                    born TEXT,
                    note TEXT
                )
            "},
        )
        .await
        .expect("Failed to prepare the create table statement")
        .execute_update()
        .await
        .expect("Failed to create the sqlpeek_simple table");

    // Insert
    let mut insert = factory
        .statement(
            connection,
            "INSERT INTO sqlpeek_simple (id, name, amount, active, born, note) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .await
        .expect("Failed to prepare the insert");
    assert!(insert.is_debuggable());
    insert.set_int(1, 1).expect("Failed to set id");
    insert.set_string(2, "Alice").expect("Failed to set name");
    insert.set_double(3, 12.5).expect("Failed to set amount");
    insert.set_boolean(4, true).expect("Failed to set active");
    insert.set_date(5, date!(1990 - 05 - 17)).expect("Failed to set born");
    insert.set_null(6, SqlType::Varchar).expect("Failed to set note");
    assert_eq!(
        insert.to_string(),
        "INSERT INTO sqlpeek_simple (id, name, amount, active, born, note) VALUES (1, 'Alice', 12.5, true, TO_DATE('1990-05-17 00:00:00.0','YYYY-MM-DD HH24:MI:SS'), NULL)"
    );
    assert_eq!(
        insert.execute_update().await.expect("Failed to insert Alice"),
        1
    );

    insert.set_int(1, 2).expect("Failed to set id");
    insert.set_string(2, "Bob").expect("Failed to set name");
    insert.set_double(3, -3.25).expect("Failed to set amount");
    insert.set_boolean(4, false).expect("Failed to set active");
    insert.set_date(5, date!(2001 - 12 - 01)).expect("Failed to set born");
    insert.set_string(6, "what?").expect("Failed to set note");
    assert_eq!(
        insert.to_string(),
        "INSERT INTO sqlpeek_simple (id, name, amount, active, born, note) VALUES (2, 'Bob', -3.25, false, TO_DATE('2001-12-01 00:00:00.0','YYYY-MM-DD HH24:MI:SS'), 'what?')"
    );
    assert_eq!(insert.execute_update().await.expect("Failed to insert Bob"), 1);
    insert.close().expect("Failed to close the insert");
    assert!(insert.is_closed());

    // Select
    let mut select = factory
        .statement(
            connection,
            "SELECT id, name, amount, active, born, note FROM sqlpeek_simple WHERE id = ?",
        )
        .await
        .expect("Failed to prepare the select");
    select.set_int(1, 1).expect("Failed to set id");
    assert_eq!(
        select.to_string(),
        "SELECT id, name, amount, active, born, note FROM sqlpeek_simple WHERE id = 1"
    );
    let result = select.execute_query().await.expect("Failed to select Alice");
    assert_eq!(result.len(), 1);
    assert_eq!(
        result.labels(),
        ["id", "name", "amount", "active", "born", "note"]
    );
    assert_eq!(result.get_as::<i64>(0, "id").unwrap(), 1);
    assert_eq!(result.get_as::<String>(0, "name").unwrap(), "Alice");
    assert_eq!(result.get_as::<f64>(0, "amount").unwrap(), 12.5);
    assert!(result.get_as::<bool>(0, "active").unwrap());
    assert_eq!(result.get_as::<String>(0, "born").unwrap(), "1990-05-17");
    assert_eq!(result.get(0, "note"), Some(&Value::Null));
    assert_eq!(result.get_as::<Option<String>>(0, "note").unwrap(), None);

    // A question mark inside a literal is not a parameter
    let mut count = factory
        .statement(
            connection,
            "SELECT COUNT(*) AS total FROM sqlpeek_simple WHERE note = 'what?' OR name = ?",
        )
        .await
        .expect("Failed to prepare the count");
    assert_eq!(
        count
            .as_debuggable()
            .expect("The statement should be debuggable")
            .placeholder_count(),
        1
    );
    assert_eq!(count.parameter_count().unwrap(), 1);
    count.set_string(1, "Alice").expect("Failed to set name");
    assert_eq!(
        count.to_string(),
        "SELECT COUNT(*) AS total FROM sqlpeek_simple WHERE note = 'what?' OR name = 'Alice'"
    );
    let result = count.execute_query().await.expect("Failed to count");
    assert_eq!(result.get_as::<i64>(0, "total").unwrap(), 2);

    // Debugging off returns the driver statement
    let mut direct = factory
        .statement_with_level(
            connection,
            "SELECT name FROM sqlpeek_simple WHERE id = ?",
            DebugLevel::Off,
        )
        .await
        .expect("Failed to prepare the direct select");
    assert!(!direct.is_debuggable());
    assert!(direct.as_debuggable().is_none());
    direct.set_long(1, 2).expect("Failed to set id");
    let result = direct
        .execute_query()
        .await
        .expect("Failed to select Bob");
    assert_eq!(result.get_as::<String>(0, "name").unwrap(), "Bob");

    // Execute arbitrary SQL through an existing statement
    let updated = direct
        .execute_update_sql("UPDATE sqlpeek_simple SET amount = amount * 2")
        .await
        .expect("Failed to update the amounts");
    assert_eq!(updated, 2);
    let result = direct
        .execute_query_sql("SELECT SUM(amount) AS total FROM sqlpeek_simple")
        .await
        .expect("Failed to sum the amounts");
    assert_eq!(result.get_as::<f64>(0, "total").unwrap(), 18.5);
}
