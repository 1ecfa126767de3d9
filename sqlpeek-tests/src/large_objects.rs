use sqlpeek::{
    Connection, DebugLevel, MemoryBlob, MemoryClob, PreparedStatement, SqlObject,
    StatementFactory, Stream, Value,
};
use std::{io::Cursor, sync::{Arc, LazyLock}};
use tokio::sync::Mutex;

pub async fn large_objects<C: Connection>(connection: &mut C) {
    static MUTEX: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));
    let _lock = MUTEX.lock().await;

    let mut factory = StatementFactory::default();
    factory.set_default_debug(DebugLevel::On);

    // Setup
    let mut setup = factory
        .statement(connection, "DROP TABLE IF EXISTS sqlpeek_objects")
        .await
        .expect("Failed to prepare the drop table statement");
    setup
        .execute_update()
        .await
        .expect("Failed to drop the sqlpeek_objects table");
    setup
        .execute_update_sql(
            "CREATE TABLE sqlpeek_objects (id INTEGER PRIMARY KEY, raw BLOB, doc TEXT, stream BLOB, chars TEXT, other TEXT)",
        )
        .await
        .expect("Failed to create the sqlpeek_objects table");

    let mut insert = factory
        .statement(
            connection,
            "INSERT INTO sqlpeek_objects (id, raw, doc, stream, chars, other) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .await
        .expect("Failed to prepare the insert");
    insert.set_int(1, 1).expect("Failed to set id");
    insert
        .set_bytes(2, Some(&[1u8, 2, 3][..]))
        .expect("Failed to set raw");
    insert
        .set_clob(3, Arc::new(MemoryClob("ünïcode".into())))
        .expect("Failed to set doc");
    insert
        .set_binary_stream(4, Some(Box::new(Cursor::new(vec![9u8, 8, 7, 6])) as Stream), Some(3))
        .expect("Failed to set stream");
    insert
        .set_character_stream(5, Some(Box::new(Cursor::new("characters")) as Stream), None)
        .expect("Failed to set chars");
    insert
        .set_object(6, Some(SqlObject::new(String::from("object"))))
        .expect("Failed to set other");
    assert_eq!(
        insert.to_string(),
        "INSERT INTO sqlpeek_objects (id, raw, doc, stream, chars, other) VALUES (1, 'byte[] length=3', '<Clob length = 7>', '<stream length= 3>', ? (missing variable # 5), 'alloc::string::String')"
    );
    assert_eq!(insert.execute_update().await.expect("Failed to insert"), 1);

    insert.set_int(1, 2).expect("Failed to set id");
    insert
        .set_blob(2, Arc::new(MemoryBlob(vec![0xCA, 0xFE, 0xBA, 0xBE])))
        .expect("Failed to set raw");
    insert.set_bytes(3, None).expect("Failed to set doc");
    insert
        .set_binary_stream(4, None, Some(10))
        .expect("Failed to set stream");
    insert
        .set_ascii_stream(5, Some(Box::new(Cursor::new("ascii text")) as Stream), Some(5))
        .expect("Failed to set chars");
    insert.set_object(6, None).expect("Failed to set other");
    assert_eq!(
        insert.to_string(),
        "INSERT INTO sqlpeek_objects (id, raw, doc, stream, chars, other) VALUES (2, '<Blob length = 4>', NULL, NULL, '<stream length= 5>', NULL)"
    );
    assert_eq!(insert.execute_update().await.expect("Failed to insert"), 1);

    let result = setup
        .execute_query_sql("SELECT id, raw, doc, stream, chars, other FROM sqlpeek_objects ORDER BY id")
        .await
        .expect("Failed to read the objects table");
    assert_eq!(result.len(), 2);
    assert_eq!(result.get_as::<Vec<u8>>(0, "raw").unwrap(), vec![1u8, 2, 3]);
    assert_eq!(result.get_as::<String>(0, "doc").unwrap(), "ünïcode");
    assert_eq!(result.get_as::<Vec<u8>>(0, "stream").unwrap(), vec![9u8, 8, 7]);
    assert_eq!(result.get_as::<String>(0, "chars").unwrap(), "characters");
    assert_eq!(result.get_as::<String>(0, "other").unwrap(), "object");
    assert_eq!(
        result.get_as::<Vec<u8>>(1, "raw").unwrap(),
        vec![0xCAu8, 0xFE, 0xBA, 0xBE]
    );
    assert_eq!(result.get(1, "doc"), Some(&Value::Null));
    assert_eq!(result.get(1, "stream"), Some(&Value::Null));
    assert_eq!(result.get_as::<String>(1, "chars").unwrap(), "ascii");
    assert_eq!(result.get(1, "other"), Some(&Value::Null));
}
