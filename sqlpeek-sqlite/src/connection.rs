use crate::{CBox, SqliteStatement, error_message_from_ptr, sqlite_error};
use libsqlite3_sys::{
    SQLITE_OK, SQLITE_OPEN_CREATE, SQLITE_OPEN_READWRITE, SQLITE_OPEN_URI, sqlite3,
    sqlite3_close, sqlite3_finalize, sqlite3_open_v2, sqlite3_prepare_v2, sqlite3_stmt,
};
use sqlpeek_core::{
    Connection, Context, Error, Result, StatementError, truncate_long,
};
use std::{
    ffi::{CStr, CString, c_int},
    ptr,
    sync::{
        Arc,
        atomic::{AtomicPtr, Ordering},
    },
};
use tokio::task::spawn_blocking;

pub const SQLITE_URL_PREFIX: &str = "sqlite://";

/// Connection to a SQLite database.
///
/// Statements share the database handle, it is released once the connection
/// and every statement prepared from it are gone.
pub struct SqliteConnection {
    pub(crate) connection: Option<Arc<CBox<*mut sqlite3>>>,
}

impl SqliteConnection {
    pub(crate) fn handle(&self) -> Result<Arc<CBox<*mut sqlite3>>> {
        match &self.connection {
            Some(v) => Ok(v.clone()),
            None => {
                let error = Error::new(StatementError::ConnectionClosed);
                log::error!("{:#}", error);
                Err(error)
            }
        }
    }
}

/// Compile `sql` into a statement, exactly one statement is accepted.
pub(crate) fn prepare(connection: *mut sqlite3, sql: &str) -> Result<CBox<*mut sqlite3_stmt>> {
    let context = || format!("While preparing the query:\n{}", truncate_long!(sql));
    let text = match CString::new(sql) {
        Ok(v) => v,
        Err(e) => {
            let error = Error::new(e)
                .context("Could not create a CString from the query String")
                .context(context());
            log::error!("{:#}", error);
            return Err(error);
        }
    };
    let mut statement = CBox::new(ptr::null_mut(), |p| unsafe {
        sqlite3_finalize(p);
    });
    unsafe {
        let mut tail = ptr::null();
        let rc = sqlite3_prepare_v2(
            connection,
            text.as_ptr(),
            sql.len() as c_int + 1,
            &mut *statement,
            &mut tail,
        );
        if rc != SQLITE_OK {
            let error = sqlite_error(connection).context(context());
            log::error!("{:#}", error);
            return Err(error);
        }
        if statement.is_null() {
            let error = Error::msg("The query does not contain any statement").context(context());
            log::error!("{:#}", error);
            return Err(error);
        }
        if !tail.is_null() && !CStr::from_ptr(tail).to_string_lossy().trim().is_empty() {
            let error =
                Error::msg("Cannot prepare more than one statement at a time").context(context());
            log::error!("{:#}", error);
            return Err(error);
        }
    }
    Ok(statement)
}

/// Translate `sqlite://<path>[?query]` into the filename handed to sqlite.
fn filename(url: &str) -> Result<CString> {
    let Some(location) = url.strip_prefix(SQLITE_URL_PREFIX) else {
        let error = Error::msg(format!(
            "Expected sqlite connection url to start with `{}`",
            SQLITE_URL_PREFIX
        ));
        log::error!("{:#}", error);
        return Err(error);
    };
    let context = || format!("Error while decoding connection URL: `{}`", url);
    let (path, query) = match location.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (location, None),
    };
    let path = urlencoding::decode(path).with_context(context)?;
    let name = match query {
        Some(query) => format!("file:{}?{}", path, query),
        None => path.into_owned(),
    };
    CString::new(name).with_context(context)
}

impl Connection for SqliteConnection {
    type Statement = SqliteStatement;

    async fn connect(url: &str) -> Result<Self> {
        let name = filename(url)?;
        let mut connection = CBox::new(ptr::null_mut(), |p| unsafe {
            sqlite3_close(p);
        });
        unsafe {
            let rc = sqlite3_open_v2(
                name.as_ptr(),
                &mut *connection,
                SQLITE_OPEN_READWRITE | SQLITE_OPEN_CREATE | SQLITE_OPEN_URI,
                ptr::null(),
            );
            if rc != SQLITE_OK {
                let message = if connection.is_null() {
                    error_message_from_ptr(ptr::null())
                } else {
                    sqlite_error(*connection).to_string()
                };
                let error = Error::msg(message).context(format!("While opening `{}`", url));
                log::error!("{:#}", error);
                return Err(error);
            }
        }
        Ok(Self {
            connection: Some(Arc::new(connection)),
        })
    }

    async fn prepare_statement(&mut self, sql: &str) -> Result<SqliteStatement> {
        let handle = self.handle()?;
        let connection = AtomicPtr::new(**handle);
        let query = sql.to_string();
        let statement = spawn_blocking(move || {
            let connection = connection.load(Ordering::Relaxed);
            prepare(connection, &query)
        })
        .await??;
        Ok(SqliteStatement::new(handle, statement, sql.to_string()))
    }

    fn database_product_name(&self) -> Result<String> {
        Ok("SQLite".into())
    }

    fn is_closed(&self) -> bool {
        self.connection.is_none()
    }

    fn close(&mut self) -> Result<()> {
        self.connection = None;
        Ok(())
    }
}
