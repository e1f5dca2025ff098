//! Configuration files using serde
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    result::Result as StdResult,
};

#[cfg(feature = "toml_config")]
use crate::error::TomlError;
use crate::error::{ConfigError, Error, Error::InvalidConfig, Result};
use crate::proto::limit::DEFAULT_MAX_MESSAGE_LEN;

/// Configuration for IRC clients.
///
/// # Building a configuration programmatically
///
/// `Config` is an ordinary struct with public fields, so the easiest way to build one is with
/// `Config::default()` filling in everything left unspecified.
///
/// ```
/// use ircwire::client::prelude::Config;
///
/// let config = Config {
///     nickname: Some("test".to_owned()),
///     server: Some("irc.example.com".to_owned()),
///     ..Config::default()
/// };
/// assert_eq!(config.username(), "test");
/// ```
///
/// # Loading a configuration from a file
///
/// ## TOML (`config.toml`)
/// ```toml
/// nickname = "test"
/// server = "irc.example.com"
/// channels = ["#rust"]
/// ```
///
/// ## Rust
/// ```no_run
/// use ircwire::client::prelude::Config;
///
/// let config = Config::load("config.toml").unwrap();
/// ```
#[derive(Clone, Deserialize, Serialize, Default, PartialEq, Debug)]
pub struct Config {
    /// The client's nickname.
    pub nickname: Option<String>,
    /// The client's username (ident).
    pub username: Option<String>,
    /// The client's real name (gecos).
    pub realname: Option<String>,
    /// The user mode sent with `USER` during registration.
    pub umode: Option<String>,
    /// The server to connect to.
    pub server: Option<String>,
    /// The port to connect on.
    pub port: Option<u16>,
    /// The password to connect to the server.
    pub password: Option<String>,
    /// Whether or not to use TLS.
    pub use_tls: Option<bool>,
    /// Accept certificates that fail verification. Never enable this outside of testing.
    pub dangerously_accept_invalid_certs: Option<bool>,
    /// The text encoding spoken on the wire.
    pub encoding: Option<String>,
    /// The maximum length in bytes of a line sent to the server, excluding the CRLF.
    pub max_message_len: Option<usize>,
    /// A list of channels to join once registration completes.
    #[serde(default)]
    pub channels: Vec<String>,
    /// Free-form settings for the application built on the client.
    #[serde(default)]
    pub options: HashMap<String, String>,

    /// Where this configuration was loaded from or last saved to. Never read from a file.
    #[serde(skip_serializing)]
    #[doc(hidden)]
    pub path: Option<PathBuf>,
}

/// The on-disk formats a configuration can be stored in, picked by file extension.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Format {
    Json,
    Toml,
    Yaml,
}

impl Format {
    fn from_path(path: &Path) -> Result<Format> {
        match path.extension().and_then(|s| s.to_str()) {
            Some("json") => Ok(Format::Json),
            Some("toml") => Ok(Format::Toml),
            Some("yaml") | Some("yml") => Ok(Format::Yaml),
            Some(ext) => Err(invalid(
                path,
                ConfigError::UnknownConfigFormat {
                    format: ext.to_owned(),
                },
            )),
            None => Err(invalid(path, ConfigError::MissingExtension)),
        }
    }

    fn parse(self, data: &str) -> StdResult<Config, ConfigError> {
        match self {
            Format::Json => parse_json(data),
            Format::Toml => parse_toml(data),
            Format::Yaml => parse_yaml(data),
        }
    }

    fn render(self, config: &Config) -> StdResult<String, ConfigError> {
        match self {
            Format::Json => render_json(config),
            Format::Toml => render_toml(config),
            Format::Yaml => render_yaml(config),
        }
    }
}

fn invalid(path: &Path, cause: ConfigError) -> Error {
    InvalidConfig {
        path: path.to_string_lossy().into_owned(),
        cause,
    }
}

#[cfg(feature = "json_config")]
fn parse_json(data: &str) -> StdResult<Config, ConfigError> {
    serde_json::from_str(data).map_err(ConfigError::InvalidJson)
}

#[cfg(feature = "json_config")]
fn render_json(config: &Config) -> StdResult<String, ConfigError> {
    serde_json::to_string_pretty(config).map_err(ConfigError::InvalidJson)
}

#[cfg(not(feature = "json_config"))]
fn parse_json(_: &str) -> StdResult<Config, ConfigError> {
    Err(ConfigError::ConfigFormatDisabled { format: "JSON" })
}

#[cfg(not(feature = "json_config"))]
fn render_json(_: &Config) -> StdResult<String, ConfigError> {
    Err(ConfigError::ConfigFormatDisabled { format: "JSON" })
}

#[cfg(feature = "toml_config")]
fn parse_toml(data: &str) -> StdResult<Config, ConfigError> {
    toml::from_str(data).map_err(|e| ConfigError::InvalidToml(TomlError::Read(e)))
}

#[cfg(feature = "toml_config")]
fn render_toml(config: &Config) -> StdResult<String, ConfigError> {
    toml::to_string(config).map_err(|e| ConfigError::InvalidToml(TomlError::Write(e)))
}

#[cfg(not(feature = "toml_config"))]
fn parse_toml(_: &str) -> StdResult<Config, ConfigError> {
    Err(ConfigError::ConfigFormatDisabled { format: "TOML" })
}

#[cfg(not(feature = "toml_config"))]
fn render_toml(_: &Config) -> StdResult<String, ConfigError> {
    Err(ConfigError::ConfigFormatDisabled { format: "TOML" })
}

#[cfg(feature = "yaml_config")]
fn parse_yaml(data: &str) -> StdResult<Config, ConfigError> {
    serde_yaml::from_str(data).map_err(ConfigError::InvalidYaml)
}

#[cfg(feature = "yaml_config")]
fn render_yaml(config: &Config) -> StdResult<String, ConfigError> {
    serde_yaml::to_string(config).map_err(ConfigError::InvalidYaml)
}

#[cfg(not(feature = "yaml_config"))]
fn parse_yaml(_: &str) -> StdResult<Config, ConfigError> {
    Err(ConfigError::ConfigFormatDisabled { format: "YAML" })
}

#[cfg(not(feature = "yaml_config"))]
fn render_yaml(_: &Config) -> StdResult<String, ConfigError> {
    Err(ConfigError::ConfigFormatDisabled { format: "YAML" })
}

impl Config {
    fn path(&self) -> String {
        self.path
            .as_ref()
            .map(|buf| buf.to_string_lossy().into_owned())
            .unwrap_or_else(|| "<none>".to_owned())
    }

    /// Loads a configuration, choosing the format from the file extension: `.toml`, `.json`, or
    /// `.yaml`/`.yml`. Each format needs its crate feature; only TOML is enabled by default.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Config> {
        let path = path.as_ref();
        let format = Format::from_path(path)?;
        let data = fs::read_to_string(path)?;

        let mut config = format.parse(&data).map_err(|cause| invalid(path, cause))?;
        config.path = Some(path.to_owned());
        Ok(config)
    }

    /// Writes the configuration to `path` in the format named by its extension, and remembers
    /// `path` as where the configuration lives.
    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        let format = Format::from_path(path)?;

        let data = format.render(self).map_err(|cause| invalid(path, cause))?;
        fs::write(path, data)?;
        self.path = Some(path.to_owned());
        Ok(())
    }

    /// Gets the nickname, which every client must have.
    pub fn nickname(&self) -> Result<&str> {
        self.nickname
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| InvalidConfig {
                path: self.path(),
                cause: ConfigError::NicknameNotSpecified,
            })
    }

    /// Gets the username specified in the configuration.
    /// This defaults to the user's nickname when not specified.
    pub fn username(&self) -> &str {
        self.username
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| self.nickname().unwrap_or("user"))
    }

    /// Gets the real name specified in the configuration.
    /// This defaults to the user's nickname when not specified.
    pub fn real_name(&self) -> &str {
        self.realname
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| self.nickname().unwrap_or("ircwire"))
    }

    /// Gets the user mode sent during registration.
    /// This defaults to `+i` when not specified.
    pub fn umode(&self) -> &str {
        self.umode
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or("+i")
    }

    /// Gets the server to dial. Only `Client::connect` needs it.
    pub fn server(&self) -> Result<&str> {
        self.server
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| InvalidConfig {
                path: self.path(),
                cause: ConfigError::ServerNotSpecified,
            })
    }

    /// Gets the port, 6667 by default or 6697 when TLS is on.
    pub fn port(&self) -> u16 {
        self.port
            .unwrap_or(if self.use_tls() { 6697 } else { 6667 })
    }

    /// Gets the server password, or an empty string for none.
    pub fn password(&self) -> &str {
        self.password.as_deref().unwrap_or("")
    }

    /// Whether to wrap the connection in TLS. Off by default.
    pub fn use_tls(&self) -> bool {
        self.use_tls.unwrap_or(false)
    }

    /// Whether to skip certificate verification. Off by default.
    pub fn dangerously_accept_invalid_certs(&self) -> bool {
        self.dangerously_accept_invalid_certs.unwrap_or(false)
    }

    /// Gets the WHATWG label of the wire encoding, `UTF-8` by default.
    pub fn encoding(&self) -> &str {
        self.encoding.as_deref().unwrap_or("UTF-8")
    }

    /// Gets the maximum length of an outgoing line in bytes.
    /// This defaults to 400 when not specified.
    pub fn max_message_len(&self) -> usize {
        self.max_message_len.unwrap_or(DEFAULT_MAX_MESSAGE_LEN)
    }

    /// Gets the channels to join once registered.
    pub fn channels(&self) -> &[String] {
        &self.channels
    }

    /// Looks up an option value in the options map.
    pub fn get_option(&self, option: &str) -> Option<&str> {
        self.options.get(option).map(|s| &s[..])
    }
}
