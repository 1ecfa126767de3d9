#[cfg(test)]
mod tests {
    use indoc::indoc;
    use rust_decimal::Decimal;
    use sqlpeek::{
        BaseSqlFormatter, Blob, Db2SqlFormatter, DefaultSqlFormatter, MemoryArray, MemoryBlob,
        MemoryClob, MemoryRef, OracleSqlFormatter, Result, SqlFormatter, StatementError, Value,
    };
    use std::{str::FromStr, sync::Arc};
    use time::macros::{date, datetime, time};

    fn formatters() -> [Arc<dyn SqlFormatter>; 4] {
        [
            Arc::new(BaseSqlFormatter::new()),
            Arc::new(DefaultSqlFormatter::default()),
            Arc::new(OracleSqlFormatter::default()),
            Arc::new(Db2SqlFormatter::default()),
        ]
    }

    #[test]
    fn null_everywhere() {
        for formatter in formatters() {
            assert_eq!(formatter.format(&Value::Null).unwrap(), "NULL");
        }
    }

    #[test]
    fn base_values() {
        let formatter = BaseSqlFormatter::new();
        assert_eq!(formatter.format(&Value::Varchar("abc".into())).unwrap(), "'abc'");
        assert_eq!(formatter.format(&Value::Varchar("".into())).unwrap(), "''");
        // Embedded quotes are left as they are
        assert_eq!(
            formatter.format(&Value::Varchar("O'Brien".into())).unwrap(),
            "'O'Brien'"
        );
        assert_eq!(formatter.format(&Value::Boolean(false)).unwrap(), "false");
        assert_eq!(formatter.format(&Value::Int8(-128)).unwrap(), "-128");
        assert_eq!(formatter.format(&Value::Int64(i64::MAX)).unwrap(), "9223372036854775807");
        assert_eq!(formatter.format(&Value::Float64(2.5)).unwrap(), "2.5");
        assert_eq!(
            formatter
                .format(&Value::Decimal(Decimal::from_str("-0.0100").unwrap()))
                .unwrap(),
            "-0.0100"
        );
        assert_eq!(
            formatter.format(&Value::Date(date!(2024 - 02 - 29))).unwrap(),
            "2024-02-29"
        );
        assert_eq!(
            formatter
                .format(&Value::Timestamp(datetime!(2024-01-15 10:30:45)))
                .unwrap(),
            "2024-01-15 10:30:45.0"
        );
        assert_eq!(
            formatter
                .format(&Value::Calendar(datetime!(2024-01-15 10:30:45.5 -3:30)))
                .unwrap(),
            "2024-01-15 10:30:45.5-03:30"
        );
    }

    #[test]
    fn handles() {
        let formatter = BaseSqlFormatter::new();
        assert_eq!(
            formatter
                .format(&Value::Blob(Arc::new(MemoryBlob(vec![1, 2, 3]))))
                .unwrap(),
            "'<Blob length = 3>'"
        );
        assert_eq!(
            formatter
                .format(&Value::Clob(Arc::new(MemoryClob("città".into()))))
                .unwrap(),
            "'<Clob length = 5>'"
        );
        assert_eq!(
            formatter
                .format(&Value::Array(Arc::new(MemoryArray::new(
                    "DATE",
                    vec![Value::Date(date!(2024 - 01 - 01))]
                ))))
                .unwrap(),
            "DATE"
        );
        assert_eq!(
            formatter
                .format(&Value::Ref(Arc::new(MemoryRef::new("ADDRESS_T", Value::Null))))
                .unwrap(),
            "ADDRESS_T"
        );
    }

    #[test]
    fn failing_handle() {
        #[derive(Debug)]
        struct Gone;
        impl Blob for Gone {
            fn length(&self) -> Result<u64> {
                Err(sqlpeek::Error::msg("the blob was freed"))
            }
            fn bytes(&self) -> Result<Vec<u8>> {
                Err(sqlpeek::Error::msg("the blob was freed"))
            }
        }
        for formatter in formatters() {
            let error = formatter
                .format(&Value::Blob(Arc::new(Gone)))
                .unwrap_err();
            assert!(matches!(
                error.downcast_ref::<StatementError>(),
                Some(StatementError::Format(..))
            ));
            assert!(format!("{:#}", error).contains("the blob was freed"));
        }
    }

    #[test]
    fn default_dialect() {
        let formatter = DefaultSqlFormatter::default();
        assert_eq!(
            formatter.format(&Value::Date(date!(2024 - 01 - 15))).unwrap(),
            "TO_DATE('2024-01-15 00:00:00.0','YYYY-MM-DD HH24:MI:SS')"
        );
        assert_eq!(
            formatter.format(&Value::Time(time!(9:05:03))).unwrap(),
            "TO_DATE('9:5:3','HH24:MI:SS')"
        );
        assert_eq!(
            formatter
                .format(&Value::Timestamp(datetime!(2024-01-15 10:30:45.5)))
                .unwrap(),
            "TO_TIMESTAMP('2024-01-15 10:30:45.5','YYYY-MM-DD HH24:MI:SS:FF')"
        );
        assert_eq!(
            formatter
                .format(&Value::Calendar(datetime!(2024-01-15 10:30:45 +1)))
                .unwrap(),
            "TO_DATE('2024-01-15 10:30:45.0','YYYY-MM-DD HH24:MI:SS')"
        );
        assert_eq!(formatter.format(&Value::Int32(7)).unwrap(), "7");
    }

    #[test]
    fn oracle_dialect() {
        let formatter = OracleSqlFormatter::default();
        assert_eq!(
            formatter.format(&Value::Date(date!(2024 - 01 - 15))).unwrap(),
            "TO_DATE('2024-01-15 00:00:00','YYYY-MM-DD HH24:MI:SS')"
        );
        assert_eq!(
            formatter.format(&Value::Time(time!(10:30:45))).unwrap(),
            "TO_DATE('10:30:45','HH24:MI:SS')"
        );
        assert_eq!(
            formatter
                .format(&Value::Timestamp(datetime!(2024-01-15 10:30:45.123)))
                .unwrap(),
            "TO_TIMESTAMP('2024-01-15 10:30:45.123','YYYY-MM-DD HH24:MI:SS.FF')"
        );
        assert_eq!(
            formatter
                .format(&Value::Calendar(datetime!(2024-01-15 23:01:02 UTC)))
                .unwrap(),
            "TO_DATE('2024-01-15 23:01:02','YYYY-MM-DD HH24:MI:SS')"
        );
        assert_eq!(formatter.format(&Value::Varchar("abc".into())).unwrap(), "'abc'");
    }

    #[test]
    fn db2_dialect() {
        let formatter = Db2SqlFormatter::default();
        assert_eq!(
            formatter.format(&Value::Date(date!(2024 - 01 - 15))).unwrap(),
            "DATE('2024-01-15')"
        );
        assert_eq!(
            formatter.format(&Value::Time(time!(10:30:45))).unwrap(),
            "TIME('10:30:45')"
        );
        assert_eq!(
            formatter
                .format(&Value::Timestamp(datetime!(2024-01-15 10:30:45.999)))
                .unwrap(),
            "TIMESTAMP('2024-01-15 10:30:45')"
        );
        assert_eq!(
            formatter
                .format(&Value::Calendar(datetime!(2024-01-15 10:30:45 +9)))
                .unwrap(),
            "DATE('2024-01-15')"
        );
        assert_eq!(formatter.format(&Value::Boolean(true)).unwrap(), "true");
    }

    #[test]
    fn shared_base() {
        let base: Arc<dyn SqlFormatter> = Arc::new(BaseSqlFormatter::new());
        let oracle = OracleSqlFormatter::new(base.clone());
        let db2 = Db2SqlFormatter::new(base.clone());
        let value = Value::Clob(Arc::new(MemoryClob(
            indoc! {"
                first line
                second line
            "}
            .into(),
        )));
        assert_eq!(oracle.format(&value).unwrap(), "'<Clob length = 23>'");
        assert_eq!(db2.format(&value).unwrap(), "'<Clob length = 23>'");
        assert_eq!(Arc::strong_count(&base), 3);
    }
}
