mod cbox;
mod connection;
mod extract;
mod statement;

use libsqlite3_sys::{sqlite3, sqlite3_errmsg};
use sqlpeek_core::Error;
use std::{
    ffi::{CStr, c_char},
    ptr,
};

pub(crate) use cbox::*;
pub use connection::*;
pub use statement::*;

pub(crate) fn error_message_from_ptr(ptr: *const c_char) -> String {
    unsafe {
        if ptr != ptr::null() {
            CStr::from_ptr(ptr).to_string_lossy().into_owned()
        } else {
            "Unknown error (could not extract the error message)".into()
        }
    }
}

/// Last error raised on `connection`.
pub(crate) fn sqlite_error(connection: *mut sqlite3) -> Error {
    Error::msg(error_message_from_ptr(unsafe { sqlite3_errmsg(connection) }))
}
