#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use sqlpeek_core::{
        AsValue, MemoryBlob, MemoryClob, ResultSet, Row, SqlObject, Value, write_fraction,
        write_offset, truncate_long,
    };
    use std::{str::FromStr, sync::Arc};
    use time::macros::{date, offset};

    #[test]
    fn value_null() {
        assert_eq!(Value::Null, Value::Null);
        assert!(Value::Null.is_null());
        assert_ne!(Value::Int32(0), Value::Null);
        assert_eq!(Value::default(), Value::Null);
        assert_eq!(Option::<i32>::None.as_value(), Value::Null);
        assert_eq!(Option::<i32>::try_from_value(Value::Null).unwrap(), None);
        assert_eq!(
            Option::<i32>::try_from_value(Value::Int16(3)).unwrap(),
            Some(3)
        );
    }

    #[test]
    fn value_integers() {
        assert_eq!(127_i8.as_value(), Value::Int8(127));
        assert_eq!(i8::try_from_value(Value::Int64(-128)).unwrap(), -128);
        assert!(i8::try_from_value(Value::Int64(128)).is_err());
        assert_eq!(i64::try_from_value(Value::Boolean(true)).unwrap(), 1);
        assert_eq!(
            i32::try_from_value(Value::Decimal(Decimal::from(12))).unwrap(),
            12
        );
        assert!(i32::try_from_value(Value::Decimal(Decimal::from_str("1.5").unwrap())).is_err());
        assert!(i32::try_from_value(Value::Varchar("1".into())).is_err());
        assert!(bool::try_from_value(Value::Int32(2)).unwrap());
        assert!(!bool::try_from_value(Value::Int8(0)).unwrap());
    }

    #[test]
    fn value_floats() {
        assert_eq!(1.5_f32.as_value(), Value::Float32(1.5));
        assert_eq!(f64::try_from_value(Value::Int32(2)).unwrap(), 2.0);
        assert_eq!(
            f64::try_from_value(Value::Decimal(Decimal::from_str("18.5").unwrap())).unwrap(),
            18.5
        );
        assert_eq!(
            Decimal::try_from_value(Value::Varchar("3.14".into())).unwrap(),
            Decimal::from_str("3.14").unwrap()
        );
        assert!(Decimal::try_from_value(Value::Varchar("pi".into())).is_err());
    }

    #[test]
    fn value_text_and_bytes() {
        let value: Value = "hello".into();
        assert_eq!(value, Value::Varchar("hello".into()));
        assert_eq!(String::try_from_value(value).unwrap(), "hello");
        assert_eq!(
            String::try_from_value(MemoryClob("long text".into()).as_value()).unwrap(),
            "long text"
        );
        assert_eq!(
            Vec::<u8>::try_from_value(vec![1u8, 2].as_value()).unwrap(),
            vec![1u8, 2]
        );
        assert_eq!(Value::Varchar("a".into()).type_name(), "VARCHAR");
    }

    #[test]
    fn value_handles() {
        let blob = Arc::new(MemoryBlob(vec![1]));
        assert_eq!(Value::Blob(blob.clone()), Value::Blob(blob.clone()));
        assert_ne!(Value::Blob(blob), Value::Blob(Arc::new(MemoryBlob(vec![1]))));
        assert_eq!(
            date!(2024 - 01 - 15).as_value(),
            Value::Date(date!(2024 - 01 - 15))
        );
        assert!(time::Date::try_from_value(Value::Int32(1)).is_err());
    }

    #[test]
    fn sql_object() {
        let object = SqlObject::new(String::from("abc"));
        assert_eq!(object.type_name(), "alloc::string::String");
        assert!(object.is::<String>());
        assert_eq!(object.downcast_ref::<String>().unwrap(), "abc");
        assert!(object.downcast_ref::<&str>().is_none());
    }

    #[test]
    fn result_set() {
        let result = ResultSet::new(
            Arc::new(["ID".to_string(), "name".to_string()]),
            vec![
                Box::new([Value::Int64(1), Value::Varchar("one".into())]) as Row,
                Box::new([Value::Int64(2), Value::Null]) as Row,
            ],
        );
        assert_eq!(result.len(), 2);
        assert_eq!(result.column_index("id"), Some(0));
        assert_eq!(result.column_index("NAME"), Some(1));
        assert_eq!(result.column_index("other"), None);
        assert_eq!(result.get_as::<i64>(1, "id").unwrap(), 2);
        assert_eq!(result.get_as::<Option<String>>(1, "name").unwrap(), None);
        assert!(result.get_as::<i64>(2, "id").is_err());
        assert!(result.get_as::<i64>(0, "missing").is_err());
    }

    #[test]
    fn writers() {
        let mut out = String::new();
        write_fraction(&mut out, 0);
        write_fraction(&mut out, 500_000_000);
        write_fraction(&mut out, 1);
        assert_eq!(out, ".0.5.000000001");
        let mut out = String::new();
        write_offset(&mut out, &offset!(-0:30));
        write_offset(&mut out, &offset!(+5:45));
        assert_eq!(out, "-00:30+05:45");
    }

    #[test]
    fn truncate() {
        assert_eq!(truncate_long!("SELECT 1"), "SELECT 1");
        let long = "x".repeat(600);
        let truncated = truncate_long!(long);
        assert_eq!(truncated.len(), 500);
        assert!(truncated.ends_with("..."));
    }
}
