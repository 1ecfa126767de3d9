use crate::{Error, Result};
use std::{env, fmt, str::FromStr};

/// Environment variable holding the process wide default [`DebugLevel`].
pub const DEBUG_LEVEL_ENV: &str = "SQLPEEK_DEBUG";

/// How much a statement created through the factory records.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DebugLevel {
    /// No proxy, the driver statement is returned as is.
    #[default]
    Off,
    /// Parameters are captured so that the statement can be rendered.
    On,
    /// Like `On`, also measures the execution time.
    Verbose,
}

impl DebugLevel {
    /// Reads [`DEBUG_LEVEL_ENV`], a missing variable means `Off`.
    pub fn from_env() -> Result<Self> {
        match env::var(DEBUG_LEVEL_ENV) {
            Ok(value) => value.parse(),
            Err(env::VarError::NotPresent) => Ok(DebugLevel::Off),
            Err(e) => {
                let error = Error::new(e).context(format!("While reading {}", DEBUG_LEVEL_ENV));
                log::error!("{:#}", error);
                Err(error)
            }
        }
    }

    pub fn is_enabled(&self) -> bool {
        *self != DebugLevel::Off
    }
}

impl FromStr for DebugLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "off" => Ok(DebugLevel::Off),
            "on" => Ok(DebugLevel::On),
            "verbose" => Ok(DebugLevel::Verbose),
            _ => Err(Error::msg(format!(
                "Unknown debug level `{}`, expected one of: off, on, verbose",
                s
            ))),
        }
    }
}

impl fmt::Display for DebugLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DebugLevel::Off => "off",
            DebugLevel::On => "on",
            DebugLevel::Verbose => "verbose",
        })
    }
}
