/* Copyright © 2024-2025 Adam Train <adam@trainrelay.net>
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program. If not, see <https://www.gnu.org/licenses/>.
 */
use crate::config::config_file::Config;
use anyhow::{anyhow, Error};
use dirs::home_dir;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

const DEFAULT_CONFIG_PATH: &str = ".config/washlots/config.toml";

#[derive(Default)]
pub struct Filesystem;

impl Filesystem {
	pub fn new() -> Self {
		Self
	}

	pub fn read(&self, file_path: &str) -> Result<String, Error> {
		fs::read_to_string(file_path)
			.map_err(|e| anyhow!("failed to read {}: {}", file_path, e))
	}

	/// Fetches the config from the given path, or the default path if none.
	/// A custom path must exist; a missing default file means defaults.
	pub fn get_config(&self, custom_config_path: Option<&String>) -> Result<Config, Error> {
		let config_path = match custom_config_path {
			Some(p) => PathBuf::from(p),
			None => match home_dir() {
				Some(home) => home.join(DEFAULT_CONFIG_PATH),
				None => {
					debug!("no home directory; using default config");
					return Ok(Config::default());
				},
			},
		};

		if custom_config_path.is_none() && !config_path.exists() {
			debug!("no config at {}", config_path.display());
			return Ok(Config::default());
		}

		let content = fs::read_to_string(&config_path).map_err(|e| {
			anyhow!("failed to read config {}: {}", config_path.display(), e)
		})?;
		let config: Config = toml::from_str(&content)
			.map_err(|e| anyhow!("failed to parse config: {}", e))?;

		debug!("loaded config from {}", config_path.display());
		Ok(config)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::reports::renderer::RendererKind;

	fn scratch_file(name: &str, content: &str) -> String {
		let path = std::env::temp_dir()
			.join(format!("washlots-{}-{}", std::process::id(), name));
		fs::write(&path, content).unwrap();
		path.to_string_lossy().into_owned()
	}

	#[test]
	fn test_custom_config() {
		let path = scratch_file("config.toml", "[display]\nrenderer = \"plain\"\n");
		let config = Filesystem::new().get_config(Some(&path)).unwrap();
		assert_eq!(config.renderer(), Some(RendererKind::Plain));
		fs::remove_file(path).unwrap();
	}

	#[test]
	fn test_missing_custom_config_fails() {
		let path = "/nonexistent/washlots/config.toml".to_string();
		assert!(Filesystem::new().get_config(Some(&path)).is_err());
	}

	#[test]
	fn test_read_missing_file() {
		assert!(Filesystem::new().read("/nonexistent/lots.csv").is_err());
	}
}
