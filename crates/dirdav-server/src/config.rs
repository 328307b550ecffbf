//! Server configuration.
//!
//! Settings come from the command line and an optional TOML file. Both are
//! parsed into [`Settings`], merged (command line wins), and then resolved
//! once into an immutable [`ServerConfig`].

use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Default listen port.
pub const DEFAULT_PORT: &str = "5005";

/// Default TLS certificate path.
pub const DEFAULT_CERT_FILE: &str = "cert.pem";

/// Default TLS private key path.
pub const DEFAULT_KEY_FILE: &str = "key.pem";

/// Basic authentication credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user: String,
    pub password: String,
}

/// TLS certificate chain and private key, both PEM encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsConfig {
    pub cert_file: PathBuf,
    pub key_file: PathBuf,
}

/// Resolved, immutable server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Directory served as the WebDAV root.
    pub root: PathBuf,
    /// Listen port or `host:port`, as given by the user.
    pub port: String,
    /// TLS material when https mode is enabled.
    pub tls: Option<TlsConfig>,
    /// Credentials when authentication is enabled.
    pub credentials: Option<Credentials>,
    /// Reject write methods.
    pub read_only: bool,
    /// List dotfiles in directory indexes.
    pub show_hidden: bool,
}

impl ServerConfig {
    /// Create a configuration serving `root` with all defaults.
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self {
            root: root.into(),
            port: DEFAULT_PORT.to_string(),
            tls: None,
            credentials: None,
            read_only: false,
            show_hidden: false,
        }
    }

    /// Set the listen port or `host:port`.
    pub fn with_port(mut self, port: impl Into<String>) -> Self {
        self.port = port.into();
        self
    }

    /// Require Basic authentication. Empty values leave authentication off.
    pub fn with_credentials(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.credentials = credentials(user.into(), password.into());
        self
    }

    /// Enable or disable read-only mode.
    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    /// Enable or disable listing of dotfiles.
    pub fn with_show_hidden(mut self, show_hidden: bool) -> Self {
        self.show_hidden = show_hidden;
        self
    }

    /// Serve over TLS with the given certificate and key.
    pub fn with_tls<P: Into<PathBuf>>(mut self, cert_file: P, key_file: P) -> Self {
        self.tls = Some(TlsConfig {
            cert_file: cert_file.into(),
            key_file: key_file.into(),
        });
        self
    }

    /// Socket address to bind.
    ///
    /// A bare port listens on all interfaces: `5005` and `:5005` both
    /// become `0.0.0.0:5005`. Anything else is used as given.
    pub fn listen_addr(&self) -> String {
        let port = self.port.trim();
        if let Some(rest) = port.strip_prefix(':') {
            format!("0.0.0.0:{}", rest)
        } else if port.contains(':') {
            port.to_string()
        } else {
            format!("0.0.0.0:{}", port)
        }
    }

    /// URL scheme clients use to reach the server.
    pub fn scheme(&self) -> &'static str {
        if self.tls.is_some() {
            "https"
        } else {
            "http"
        }
    }
}

/// Partial settings from one source.
///
/// Every field is optional so that sources can be layered with [`Settings::merge`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    pub dir: Option<PathBuf>,
    pub port: Option<String>,
    pub https_mode: Option<bool>,
    pub https_cert_file: Option<PathBuf>,
    pub https_key_file: Option<PathBuf>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub read_only: Option<bool>,
    pub show_hidden: Option<bool>,
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Parse settings from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Fill every unset field from `fallback`.
    pub fn merge(self, fallback: Settings) -> Settings {
        Settings {
            dir: self.dir.or(fallback.dir),
            port: self.port.or(fallback.port),
            https_mode: self.https_mode.or(fallback.https_mode),
            https_cert_file: self.https_cert_file.or(fallback.https_cert_file),
            https_key_file: self.https_key_file.or(fallback.https_key_file),
            user: self.user.or(fallback.user),
            password: self.password.or(fallback.password),
            read_only: self.read_only.or(fallback.read_only),
            show_hidden: self.show_hidden.or(fallback.show_hidden),
        }
    }

    /// Apply defaults and build the final configuration.
    pub fn resolve(self) -> Result<ServerConfig> {
        let root = match self.dir {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => return Err(Error::MissingRoot),
        };

        let port = self.port.unwrap_or_else(|| DEFAULT_PORT.to_string());
        if port.trim().is_empty() {
            return Err(Error::MissingPort);
        }

        let tls = self.https_mode.unwrap_or(false).then(|| TlsConfig {
            cert_file: self
                .https_cert_file
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CERT_FILE)),
            key_file: self
                .https_key_file
                .unwrap_or_else(|| PathBuf::from(DEFAULT_KEY_FILE)),
        });

        Ok(ServerConfig {
            root,
            port,
            tls,
            credentials: credentials(
                self.user.unwrap_or_default(),
                self.password.unwrap_or_default(),
            ),
            read_only: self.read_only.unwrap_or(false),
            show_hidden: self.show_hidden.unwrap_or(false),
        })
    }
}

fn credentials(user: String, password: String) -> Option<Credentials> {
    if user.is_empty() || password.is_empty() {
        None
    } else {
        Some(Credentials { user, password })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_unset() {
        let config = Settings {
            dir: Some(PathBuf::from("/srv")),
            ..Default::default()
        }
        .resolve()
        .unwrap();

        assert_eq!(config.port, "5005");
        assert!(config.tls.is_none());
        assert!(config.credentials.is_none());
        assert!(!config.read_only);
        assert!(!config.show_hidden);
    }

    #[test]
    fn missing_dir_is_rejected() {
        assert!(matches!(
            Settings::default().resolve(),
            Err(Error::MissingRoot)
        ));
        assert!(matches!(
            Settings {
                dir: Some(PathBuf::new()),
                ..Default::default()
            }
            .resolve(),
            Err(Error::MissingRoot)
        ));
    }

    #[test]
    fn empty_port_is_a_usage_error() {
        let settings = Settings {
            dir: Some(PathBuf::from("/srv")),
            port: Some(" ".to_string()),
            ..Default::default()
        };
        let err = settings.resolve().unwrap_err();
        assert!(matches!(err, Error::MissingPort));
        assert!(err.is_usage());
        assert!(Error::MissingRoot.is_usage());
        assert!(!Error::Tls("x".to_string()).is_usage());
    }

    #[test]
    fn auth_needs_both_user_and_password() {
        let only_user = Settings {
            dir: Some(PathBuf::from("/srv")),
            user: Some("alice".to_string()),
            ..Default::default()
        };
        assert!(only_user.clone().resolve().unwrap().credentials.is_none());

        let both = Settings {
            password: Some("secret".to_string()),
            ..only_user
        };
        assert_eq!(
            both.resolve().unwrap().credentials,
            Some(Credentials {
                user: "alice".to_string(),
                password: "secret".to_string(),
            })
        );
    }

    #[test]
    fn https_mode_uses_default_pem_paths() {
        let config = Settings {
            dir: Some(PathBuf::from("/srv")),
            https_mode: Some(true),
            ..Default::default()
        }
        .resolve()
        .unwrap();

        let tls = config.tls.unwrap();
        assert_eq!(tls.cert_file, PathBuf::from("cert.pem"));
        assert_eq!(tls.key_file, PathBuf::from("key.pem"));
    }

    #[test]
    fn command_line_wins_over_file() {
        let file = Settings::from_toml_str(
            r#"
dir = "/from/file"
port = "8080"
read_only = true
"#,
        )
        .unwrap();
        let cli = Settings {
            port: Some("9090".to_string()),
            ..Default::default()
        };

        let config = cli.merge(file).resolve().unwrap();
        assert_eq!(config.root, PathBuf::from("/from/file"));
        assert_eq!(config.port, "9090");
        assert!(config.read_only);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = Settings::from_toml_str("colour = \"blue\"").unwrap_err();
        assert!(matches!(err, Error::ConfigFile(_)));
    }

    #[test]
    fn listen_addr_normalizes_bare_ports() {
        let config = ServerConfig::new("/srv");
        assert_eq!(config.listen_addr(), "0.0.0.0:5005");
        assert_eq!(config.clone().with_port(":8080").listen_addr(), "0.0.0.0:8080");
        assert_eq!(
            config.clone().with_port("127.0.0.1:8080").listen_addr(),
            "127.0.0.1:8080"
        );
        assert_eq!(config.with_port("[::1]:8080").listen_addr(), "[::1]:8080");
    }
}
