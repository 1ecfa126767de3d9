use sqlpeek::{Connection, DebugLevel, PreparedStatement, StatementFactory};
use std::sync::LazyLock;
use tokio::sync::Mutex;

pub async fn batches<C: Connection>(connection: &mut C) {
    static MUTEX: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));
    let _lock = MUTEX.lock().await;

    let mut factory = StatementFactory::default();
    factory.set_default_debug(DebugLevel::Verbose);

    // Setup
    let mut setup = factory
        .statement(connection, "DROP TABLE IF EXISTS sqlpeek_batch")
        .await
        .expect("Failed to prepare the drop table statement");
    setup
        .execute_update()
        .await
        .expect("Failed to drop the sqlpeek_batch table");
    setup
        .execute_update_sql("CREATE TABLE sqlpeek_batch (id INTEGER PRIMARY KEY, label TEXT)")
        .await
        .expect("Failed to create the sqlpeek_batch table");

    let mut insert = factory
        .statement(
            connection,
            "INSERT INTO sqlpeek_batch (id, label) VALUES (?, ?)",
        )
        .await
        .expect("Failed to prepare the insert");
    for (id, label) in [(1, "one"), (2, "two"), (3, "three")] {
        insert.set_int(1, id).expect("Failed to set id");
        insert.set_string(2, label).expect("Failed to set label");
        insert.add_batch().expect("Failed to add the batch");
    }
    // The rendering shows the last parameters set
    assert_eq!(
        insert
            .as_debuggable()
            .expect("The statement should be debuggable")
            .render_sql(),
        "INSERT INTO sqlpeek_batch (id, label) VALUES (3, 'three')"
    );
    insert
        .add_batch_sql("UPDATE sqlpeek_batch SET label = upper(label) WHERE id > 1")
        .expect("Failed to add the sql batch");
    let counts = insert
        .execute_batch()
        .await
        .expect("Failed to execute the batch");
    assert_eq!(counts, vec![1u64, 1, 1, 2]);
    assert!(
        insert
            .as_debuggable()
            .expect("The statement should be debuggable")
            .elapsed()
            .is_some()
    );

    // The batch is empty after execution
    let counts = insert
        .execute_batch()
        .await
        .expect("Failed to execute the empty batch");
    assert!(counts.is_empty());

    insert.set_int(1, 4).expect("Failed to set id");
    insert.set_string(2, "four").expect("Failed to set label");
    insert.add_batch().expect("Failed to add the batch");
    insert.clear_batch().expect("Failed to clear the batch");
    assert!(
        insert
            .execute_batch()
            .await
            .expect("Failed to execute the cleared batch")
            .is_empty()
    );

    let result = setup
        .execute_query_sql("SELECT id, label FROM sqlpeek_batch ORDER BY id")
        .await
        .expect("Failed to read the batch table");
    assert_eq!(result.len(), 3);
    let labels = (0..result.len())
        .map(|i| result.get_as::<String>(i, "label").unwrap())
        .collect::<Vec<_>>();
    assert_eq!(labels, ["one", "TWO", "THREE"]);
}
