//! This is the `ConfigFile` struct.
//!
//! This is for finding the right default locations for various configuration files for
//! `wheatley`.  This is a configuration file/struct neutral loading engine, storing only the
//! base directory and with `load()` read the proper file, the one in the default directory or
//! the built-in copy shipped with the calling crate.
//!
//! This encapsulates the configuration file, available with `.inner()`.
//!

use std::fmt::Debug;
use std::fs;
use std::path::PathBuf;

use directories::BaseDirs;
use eyre::Result;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use crate::{makepath, ConfigError};

/// Main name for the directory base
const TAG: &str = "wheatley";

/// Every configuration file carries a version number we check at load time.
///
pub trait Versioned {
    /// Version this code understands
    const VERSION: usize;
    /// Version read from the file
    fn version(&self) -> usize;
}

/// A loaded configuration file.
///
#[derive(Debug)]
pub struct ConfigFile<T: Debug + DeserializeOwned + Versioned> {
    /// This is the base directory for all files.
    basedir: PathBuf,
    /// Where we actually loaded from (`None` for the built-in copy)
    source: Option<PathBuf>,
    inner: T,
}

impl<T> ConfigFile<T>
where
    T: Debug + DeserializeOwned + Versioned,
{
    /// Returns the path of the default config directory
    ///
    pub fn config_path() -> PathBuf {
        match BaseDirs::new() {
            Some(base) => {
                #[cfg(unix)]
                let base = base.home_dir().join(".config");

                #[cfg(windows)]
                let base = base.data_local_dir().to_path_buf();

                debug!("base = {base:?}");
                makepath!(base, TAG)
            }
            // No home, use the current directory
            None => PathBuf::from(TAG),
        }
    }

    /// Returns the path of the default file named `fname`
    ///
    pub fn default_file(fname: &str) -> PathBuf {
        let cfg = Self::config_path().join(fname);
        debug!("default = {cfg:?}");
        cfg
    }

    /// Load the file and return a struct T in the right format.
    ///
    /// Use the following search path:
    /// - file specified on CLI (must exist)
    /// - `fname` in the default basedir (base on $HOME or $LOCALAPPDATA)
    /// - the `builtin` content
    ///
    #[tracing::instrument(skip(builtin))]
    pub fn load(fname: &str, path: Option<PathBuf>, builtin: &str) -> Result<ConfigFile<T>> {
        let basedir = Self::config_path();

        let source = match path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::UnknownFile(path.to_string_lossy().to_string()).into());
                }
                Some(path.canonicalize()?)
            }
            None => {
                let def = Self::default_file(fname);
                if def.exists() {
                    Some(def)
                } else {
                    None
                }
            }
        };

        let data = match &source {
            Some(fname) => {
                trace!("Loading config file {fname:?}");
                fs::read_to_string(fname)?
            }
            None => {
                trace!("Using built-in {fname}");
                builtin.to_owned()
            }
        };

        let inner: T = hcl::from_str(&data)?;
        debug!("struct data = {inner:?}");

        if inner.version() != T::VERSION {
            return Err(ConfigError::BadFileVersion(inner.version(), T::VERSION).into());
        }

        Ok(ConfigFile {
            basedir,
            source,
            inner,
        })
    }

    /// Return the base directory
    ///
    pub fn root(&self) -> PathBuf {
        self.basedir.clone()
    }

    /// Return the file we loaded, if not the built-in one
    ///
    pub fn source(&self) -> Option<&PathBuf> {
        self.source.as_ref()
    }

    /// Return the inner configuration file
    ///
    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// Consume and return the inner configuration
    ///
    pub fn into_inner(self) -> T {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::io::Write;

    #[derive(Debug, Deserialize)]
    struct Foo {
        version: usize,
        pub name: String,
    }

    impl Versioned for Foo {
        const VERSION: usize = 1;

        fn version(&self) -> usize {
            self.version
        }
    }

    const FOO: &str = r##"
version = 1
name = "builtin"
"##;

    #[test]
    fn test_config_load_builtin() -> Result<()> {
        let cfg = ConfigFile::<Foo>::load("nonexistent-test-file.hcl", None, FOO)?;
        assert!(cfg.source().is_none());
        assert_eq!("builtin", cfg.inner().name);
        Ok(())
    }

    #[test]
    fn test_config_load_file() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(file, "version = 1\nname = \"local\"")?;

        let cfg = ConfigFile::<Foo>::load("foo.hcl", Some(file.path().to_path_buf()), FOO)?;
        assert!(cfg.source().is_some());
        assert_eq!("local", cfg.into_inner().name);
        Ok(())
    }

    #[test]
    fn test_config_load_missing_file() {
        let cfg = ConfigFile::<Foo>::load("foo.hcl", Some(PathBuf::from("/nonexistent/foo.hcl")), FOO);
        assert!(cfg.is_err());
    }

    #[test]
    fn test_config_bad_version() {
        let cfg = ConfigFile::<Foo>::load("nonexistent-test-file.hcl", None, "version = 2\nname = \"x\"");
        let err = cfg.unwrap_err();
        assert_eq!(
            Some(&ConfigError::BadFileVersion(2, 1)),
            err.downcast_ref::<ConfigError>()
        );
    }
}
