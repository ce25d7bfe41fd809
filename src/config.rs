use std::env;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use serde::Deserialize;

use crate::holidays::DEFAULT_API_URL;

const CONFIG_FILE: &str = "config.toml";
const STORE_FILE: &str = "events.json";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	#[serde(default = "default_api_url")]
	pub api_url: String,
	#[serde(default)]
	pub store_path: Option<PathBuf>,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			api_url: default_api_url(),
			store_path: None,
		}
	}
}

fn default_api_url() -> String {
	DEFAULT_API_URL.to_string()
}

#[derive(Debug)]
pub enum ConfigError {
	Io(std::io::Error),
	TomlDecode(toml::de::Error),
}

impl Display for ConfigError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			ConfigError::Io(err) => write!(f, "io error: {err}"),
			ConfigError::TomlDecode(err) => write!(f, "failed to parse config: {err}"),
		}
	}
}

impl std::error::Error for ConfigError {}

pub fn load_config() -> Result<Config, ConfigError> {
	let raw = match fs::read_to_string(config_path()) {
		Ok(content) => content,
		Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Config::default()),
		Err(err) => return Err(ConfigError::Io(err)),
	};

	toml::from_str(&raw).map_err(ConfigError::TomlDecode)
}

pub fn resolve_store_path(cli_path: Option<PathBuf>, config: &Config) -> PathBuf {
	if let Some(path) = cli_path {
		return absolutize(path);
	}

	if let Some(path) = env::var_os("KALENDER_STORE") {
		let path = PathBuf::from(path);
		if !path.as_os_str().is_empty() {
			return absolutize(path);
		}
	}

	if let Some(path) = &config.store_path {
		return absolutize(path.clone());
	}

	state_dir().join(STORE_FILE)
}

fn config_path() -> PathBuf {
	if let Some(path) = env::var_os("KALENDER_CONFIG") {
		return PathBuf::from(path);
	}

	config_dir().join(CONFIG_FILE)
}

fn config_dir() -> PathBuf {
	if let Some(path) = env::var_os("XDG_CONFIG_HOME") {
		return PathBuf::from(path).join("kalender");
	}

	if let Some(path) = env::var_os("HOME") {
		return PathBuf::from(path).join(".config").join("kalender");
	}

	PathBuf::from(".kalender")
}

fn state_dir() -> PathBuf {
	if let Some(path) = env::var_os("KALENDER_STATE_DIR") {
		return PathBuf::from(path);
	}

	#[cfg(target_os = "windows")]
	{
		if let Some(path) = env::var_os("LOCALAPPDATA") {
			return PathBuf::from(path).join("kalender");
		}
	}

	if let Some(path) = env::var_os("XDG_STATE_HOME") {
		return PathBuf::from(path).join("kalender");
	}

	if let Some(path) = env::var_os("HOME") {
		return PathBuf::from(path)
			.join(".local")
			.join("state")
			.join("kalender");
	}

	PathBuf::from(".kalender")
}

fn absolutize(path: PathBuf) -> PathBuf {
	let path = if path.is_absolute() {
		path
	} else if let Ok(cwd) = env::current_dir() {
		cwd.join(path)
	} else {
		path
	};

	if path.exists() {
		fs::canonicalize(&path).unwrap_or(path)
	} else {
		path
	}
}

#[cfg(test)]
mod tests {
	use super::{Config, resolve_store_path};
	use crate::holidays::DEFAULT_API_URL;
	use std::path::PathBuf;

	#[test]
	fn empty_config_uses_defaults() {
		let config: Config = toml::from_str("").expect("empty config should parse");
		assert_eq!(config.api_url, DEFAULT_API_URL);
		assert!(config.store_path.is_none());
	}

	#[test]
	fn partial_config_keeps_remaining_defaults() {
		let config: Config =
			toml::from_str("store_path = \"/tmp/events.json\"").expect("config should parse");
		assert_eq!(config.api_url, DEFAULT_API_URL);
		assert_eq!(config.store_path, Some(PathBuf::from("/tmp/events.json")));
	}

	#[test]
	fn cli_path_wins_over_config_path() {
		let config = Config {
			api_url: DEFAULT_API_URL.to_string(),
			store_path: Some(PathBuf::from("/tmp/from_config.json")),
		};
		let resolved = resolve_store_path(Some(PathBuf::from("/tmp/from_cli.json")), &config);
		assert_eq!(resolved, PathBuf::from("/tmp/from_cli.json"));
	}
}
