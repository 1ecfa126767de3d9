use libsqlite3_sys::*;
use sqlpeek_core::{AsValue, Error, MemoryBlob, Result, Value};
use std::{
    ffi::{CStr, c_int},
    slice,
    sync::Arc,
};

/// Reads column `index` of the current row, text and blobs are cut at
/// `max_field_size` bytes unless it is zero.
pub(crate) fn extract_value(
    statement: *mut sqlite3_stmt,
    index: c_int,
    max_field_size: usize,
) -> Result<Value> {
    unsafe {
        let column_type = sqlite3_column_type(statement, index);
        Ok(match column_type {
            SQLITE_NULL => Value::Null,
            SQLITE_INTEGER => sqlite3_column_int64(statement, index).as_value(),
            SQLITE_FLOAT => sqlite3_column_double(statement, index).as_value(),
            SQLITE_BLOB => {
                let ptr = sqlite3_column_blob(statement, index) as *const u8;
                let len = limit(sqlite3_column_bytes(statement, index) as usize, max_field_size);
                let bytes = if ptr.is_null() {
                    Vec::new()
                } else {
                    slice::from_raw_parts(ptr, len).to_vec()
                };
                Value::Blob(Arc::new(MemoryBlob(bytes)))
            }
            SQLITE_TEXT => {
                let ptr = sqlite3_column_text(statement, index);
                let len = sqlite3_column_bytes(statement, index) as usize;
                let text = if ptr.is_null() {
                    String::new()
                } else {
                    String::from_utf8_lossy(slice::from_raw_parts(ptr, len)).into_owned()
                };
                let mut end = limit(text.len(), max_field_size);
                while !text.is_char_boundary(end) {
                    end -= 1;
                }
                Value::Varchar(text[..end].to_string())
            }
            _ => {
                let error = Error::msg(format!("Unexpected column type {}", column_type));
                log::error!("{:#}", error);
                return Err(error);
            }
        })
    }
}

pub(crate) fn extract_name(statement: *mut sqlite3_stmt, index: c_int) -> Result<String> {
    unsafe {
        let name = sqlite3_column_name(statement, index);
        if name.is_null() {
            return Err(Error::msg(format!("Column {} has no name", index)));
        }
        Ok(CStr::from_ptr(name).to_str()?.into())
    }
}

fn limit(len: usize, max: usize) -> usize {
    if max == 0 { len } else { len.min(max) }
}
