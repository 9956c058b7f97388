// Copyright 2025 JiangLong.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::domain::config::RuntimeOptions;
use crate::shared::error::{KubeError, Result};
use std::collections::HashMap;
use std::str::FromStr;

/// Parse dynamic configuration properties from -D key=value format
pub fn parse_dynamic_configs(configs: &[String]) -> Result<HashMap<String, String>> {
    let mut map = HashMap::new();

    for config in configs {
        let (key, value) = config.split_once('=').ok_or_else(|| {
            KubeError::config_error(format!(
                "Invalid config format: '{}'. Expected 'key=value'",
                config
            ))
        })?;

        let key = key.trim();
        if key.is_empty() {
            return Err(KubeError::config_error(format!(
                "Empty key in config: '{}'",
                config
            )));
        }

        map.insert(key.to_string(), value.trim().to_string());
    }

    Ok(map)
}

pub fn apply_to_runtime_options(
    configs: &HashMap<String, String>,
    options: &mut RuntimeOptions,
) -> Result<()> {
    for (key, value) in configs {
        match key.as_str() {
            "images.git-clone" => options.images.git_clone = value.clone(),
            "images.rclone" => options.images.rclone = value.clone(),
            "ports.http" => options.ports.http = parse_value(key, value)?,
            "ports.ftp" => options.ports.ftp = parse_value(key, value)?,
            "security.uid" => options.security.uid = parse_value(key, value)?,
            "media.cache-max-age" => options.media.cache_max_age = value.clone(),
            "media.s3-prefix" => options.media.s3_prefix = value.clone(),
            "media.gcs-prefix" => options.media.gcs_prefix = value.clone(),
            _ => {
                return Err(KubeError::config_error(format!(
                    "Unknown option key: '{}'",
                    key
                )))
            }
        }
    }

    Ok(())
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value.parse::<T>().map_err(|_| {
        KubeError::config_error(format!("Invalid value for '{}': '{}'", key, value))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dynamic_configs() {
        let configs = vec![
            "images.rclone=rclone/rclone:1.66".to_string(),
            " ports.ftp = 2200 ".to_string(),
        ];
        let map = parse_dynamic_configs(&configs).unwrap();
        assert_eq!(map.get("images.rclone").unwrap(), "rclone/rclone:1.66");
        assert_eq!(map.get("ports.ftp").unwrap(), "2200");
    }

    #[test]
    fn test_parse_dynamic_configs_rejects_malformed() {
        assert!(parse_dynamic_configs(&["no-equals".to_string()]).is_err());
        assert!(parse_dynamic_configs(&["=value".to_string()]).is_err());
    }

    #[test]
    fn test_apply_overrides() {
        let mut options = RuntimeOptions::default();
        let configs = parse_dynamic_configs(&[
            "images.git-clone=alpine/git".to_string(),
            "security.uid=1000".to_string(),
            "media.cache-max-age=1m".to_string(),
        ])
        .unwrap();

        apply_to_runtime_options(&configs, &mut options).unwrap();
        assert_eq!(options.images.git_clone, "alpine/git");
        assert_eq!(options.security.uid, 1000);
        assert_eq!(options.media.cache_max_age, "1m");
        assert_eq!(options.ports.http, 8080);
    }

    #[test]
    fn test_apply_rejects_bad_values() {
        let mut options = RuntimeOptions::default();
        let mut configs = HashMap::new();
        configs.insert("ports.http".to_string(), "eighty".to_string());
        assert!(apply_to_runtime_options(&configs, &mut options).is_err());

        let mut configs = HashMap::new();
        configs.insert("ports.https".to_string(), "443".to_string());
        assert!(apply_to_runtime_options(&configs, &mut options).is_err());
    }
}
