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

use crate::domain::site::Wordpress;
use crate::shared::error::KubeError;
use std::path::PathBuf;

/// Load a `Wordpress` resource from a YAML (or JSON) manifest.
pub fn load_site_from_file(file_path: &str) -> Result<Wordpress, KubeError> {
    let path = resolve_site_path(file_path)?;

    if !path.exists() {
        return Err(KubeError::ConfigError(format!(
            "Site file does not exist: {}",
            path.display()
        )));
    }

    let content = std::fs::read_to_string(&path).map_err(|e| {
        KubeError::ConfigError(format!(
            "Failed to read site file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_site(&content).map_err(|e| match e {
        KubeError::YamlParse(err) => KubeError::ConfigError(format!(
            "Failed to parse site file {}: {}",
            path.display(),
            err
        )),
        other => other,
    })
}

pub fn parse_site(content: &str) -> Result<Wordpress, KubeError> {
    let wp: Wordpress = serde_yaml::from_str(content)?;

    if wp.metadata.name.as_deref().unwrap_or_default().is_empty() {
        return Err(KubeError::invalid_resource(
            "Wordpress resource is missing metadata.name",
        ));
    }

    Ok(wp)
}

pub fn resolve_site_path(path: &str) -> Result<PathBuf, KubeError> {
    let path = PathBuf::from(path);

    if path.is_absolute() {
        Ok(path)
    } else {
        Ok(std::env::current_dir()
            .map_err(|e| KubeError::ConfigError(format!("Cannot get current directory: {}", e)))?
            .join(path))
    }
}
