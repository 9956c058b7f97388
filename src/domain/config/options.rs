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

use crate::infrastructure::constants::*;
use crate::shared::error::{KubeError, Result};
use serde::{Deserialize, Serialize};
use std::fs::read_to_string;
use std::path::Path;

/// Process-wide settings injected into every translation.
///
/// Built once at startup (defaults, then an optional TOML file, then `-D`
/// overrides) and only read afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "kebab-case")]
pub struct RuntimeOptions {
    pub images: ImageOptions,
    pub ports: PortOptions,
    pub security: SecurityOptions,
    pub media: MediaOptions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ImageOptions {
    pub git_clone: String,
    pub rclone: String,
}

impl Default for ImageOptions {
    fn default() -> Self {
        Self {
            git_clone: DEFAULT_GIT_CLONE_IMAGE.to_string(),
            rclone: DEFAULT_RCLONE_IMAGE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PortOptions {
    pub http: i32,
    pub ftp: i32,
}

impl Default for PortOptions {
    fn default() -> Self {
        Self {
            http: INTERNAL_HTTP_PORT,
            ftp: MEDIA_FTP_PORT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SecurityOptions {
    /// Used both as `runAsUser` of every container and as the pod `fsGroup`.
    pub uid: i64,
}

impl Default for SecurityOptions {
    fn default() -> Self {
        Self {
            uid: WWW_DATA_USER_ID,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct MediaOptions {
    pub cache_max_age: String,
    pub s3_prefix: String,
    pub gcs_prefix: String,
}

impl Default for MediaOptions {
    fn default() -> Self {
        Self {
            cache_max_age: MEDIA_CACHE_MAX_AGE.to_string(),
            s3_prefix: S3_PREFIX.to_string(),
            gcs_prefix: GCS_PREFIX.to_string(),
        }
    }
}

impl RuntimeOptions {
    /// Load options from a TOML file. Missing keys keep their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = read_to_string(path).map_err(|e| {
            KubeError::config_error(format!(
                "Failed to read options file {}: {}",
                path.display(),
                e
            ))
        })?;

        Ok(toml::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_compatibility_constants() {
        let options = RuntimeOptions::default();
        assert_eq!(options.ports.http, 8080);
        assert_eq!(options.ports.ftp, 2121);
        assert_eq!(options.security.uid, 33);
        assert_eq!(options.media.cache_max_age, "30s");
        assert_eq!(options.media.s3_prefix, "s3");
        assert_eq!(options.media.gcs_prefix, "gs");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[images]\ngit-clone = \"alpine/git:2.45\"\n\n[ports]\nftp = 2222"
        )
        .unwrap();

        let options = RuntimeOptions::from_file(file.path()).unwrap();
        assert_eq!(options.images.git_clone, "alpine/git:2.45");
        assert_eq!(options.images.rclone, DEFAULT_RCLONE_IMAGE);
        assert_eq!(options.ports.ftp, 2222);
        assert_eq!(options.ports.http, 8080);
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = RuntimeOptions::from_file("/nonexistent/options.toml").unwrap_err();
        assert!(matches!(err, KubeError::ConfigError(_)));
    }
}
