//! OAuth2 client credentials.
//!
//! The core never looks at the environment itself, the caller builds a `Credentials` and
//! hands it over.  `from_env()` is there for the usual case.
//!

use std::env;
use std::fmt::{Display, Formatter};

use tracing::trace;

use wheatley_common::ConfigError;

/// Variable holding the client ID
pub const CLIENT_ID_VAR: &str = "flight_id";
/// Variable holding the client secret
pub const CLIENT_SECRET_VAR: &str = "flight_secret";

/// Credentials to submit to the site to get the token
///
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl Credentials {
    pub fn new(client_id: &str, client_secret: &str) -> Self {
        Credentials {
            client_id: client_id.to_owned(),
            client_secret: client_secret.to_owned(),
        }
    }

    /// Read both values from the environment, failing on the first one missing or empty.
    ///
    pub fn from_env() -> Result<Self, ConfigError> {
        trace!("credentials from environment");

        let fetch = |name: &str| match env::var(name) {
            Ok(v) if !v.trim().is_empty() => Ok(v),
            _ => Err(ConfigError::MissingVariable(name.to_string())),
        };

        Ok(Credentials {
            client_id: fetch(CLIENT_ID_VAR)?,
            client_secret: fetch(CLIENT_SECRET_VAR)?,
        })
    }
}

impl Display for Credentials {
    /// Obfuscate the secret
    ///
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Credentials {{ client_id: {}, client_secret: HIDDEN }}", self.client_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_display_hides_secret() {
        let c = Credentials::new("bot", "s3cr3t");
        let s = c.to_string();
        assert!(s.contains("bot"));
        assert!(!s.contains("s3cr3t"));
    }

    // Only test we run that touches the environment, keep it that way.
    //
    #[test]
    fn test_credentials_from_env() {
        env::remove_var(CLIENT_ID_VAR);
        env::remove_var(CLIENT_SECRET_VAR);
        assert_eq!(
            Err(ConfigError::MissingVariable(CLIENT_ID_VAR.to_string())),
            Credentials::from_env()
        );

        env::set_var(CLIENT_ID_VAR, "bot");
        assert_eq!(
            Err(ConfigError::MissingVariable(CLIENT_SECRET_VAR.to_string())),
            Credentials::from_env()
        );

        env::set_var(CLIENT_SECRET_VAR, "s3cr3t");
        assert_eq!(Ok(Credentials::new("bot", "s3cr3t")), Credentials::from_env());

        env::remove_var(CLIENT_ID_VAR);
        env::remove_var(CLIENT_SECRET_VAR);
    }
}
