use crate::{
    BaseSqlFormatter, Connection, Db2SqlFormatter, DefaultSqlFormatter, OracleSqlFormatter,
    Result, SqlFormatter,
};
use std::{collections::HashMap, sync::Arc};

/// Product name reported by Oracle databases.
pub const ORACLE_FORMATTER: &str = "Oracle";
/// Product name reported by DB2 on AS/400.
pub const DB2_FORMATTER: &str = "DB2 UDB for AS/400";
/// Key of the formatter used for unknown products.
pub const DEFAULT_FORMATTER: &str = "default";

/// Formatters keyed by database product name.
///
/// Populate it at startup, then share it behind an `Arc`: lookups only read.
#[derive(Debug, Clone)]
pub struct FormatterRegistry {
    formatters: HashMap<String, Arc<dyn SqlFormatter>>,
}

impl FormatterRegistry {
    /// Registry without any formatter, not even the default one.
    pub fn empty() -> Self {
        Self {
            formatters: HashMap::new(),
        }
    }

    pub fn register(
        &mut self,
        name: impl Into<String>,
        formatter: Arc<dyn SqlFormatter>,
    ) -> &mut Self {
        self.formatters.insert(name.into(), formatter);
        self
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn SqlFormatter>> {
        let result = self.formatters.get(name).cloned();
        if result.is_none() {
            log::error!("No formatter registered for `{}`", name);
        }
        result
    }

    /// The formatter matching the product name reported by `connection`.
    ///
    /// Exact name match, unknown products get the default formatter.
    pub fn formatter_for<C: Connection>(&self, connection: &C) -> Result<Arc<dyn SqlFormatter>> {
        let product = connection.database_product_name()?;
        Ok(self.formatter_for_product(&product))
    }

    pub fn formatter_for_product(&self, product: &str) -> Arc<dyn SqlFormatter> {
        if let Some(formatter) = self.formatters.get(product) {
            return formatter.clone();
        }
        log::debug!("Using the default formatter for `{}`", product);
        self.default_formatter()
    }

    /// The formatter registered as [`DEFAULT_FORMATTER`], or a fresh
    /// [`DefaultSqlFormatter`] when missing.
    pub fn default_formatter(&self) -> Arc<dyn SqlFormatter> {
        self.get(DEFAULT_FORMATTER)
            .unwrap_or_else(|| Arc::new(DefaultSqlFormatter::default()))
    }

    pub fn len(&self) -> usize {
        self.formatters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formatters.is_empty()
    }
}

impl Default for FormatterRegistry {
    /// Oracle, DB2 and the default formatter sharing one base formatter.
    fn default() -> Self {
        let base: Arc<dyn SqlFormatter> = Arc::new(BaseSqlFormatter::new());
        let mut registry = Self::empty();
        registry
            .register(
                ORACLE_FORMATTER,
                Arc::new(OracleSqlFormatter::new(base.clone())),
            )
            .register(DB2_FORMATTER, Arc::new(Db2SqlFormatter::new(base.clone())))
            .register(DEFAULT_FORMATTER, Arc::new(DefaultSqlFormatter::new(base)));
        registry
    }
}
