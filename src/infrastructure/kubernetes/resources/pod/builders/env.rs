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

use super::traits::ContainerRole;
use crate::domain::config::RuntimeOptions;
use crate::domain::site::{Component, ObjectStore, ResolvedSite};
use crate::infrastructure::constants::{CODE_SRC_MOUNT_PATH, GCS_ENV_ALLOW_LIST, S3_ENV_ALLOW_LIST};
use k8s_openapi::api::core::v1::{EnvFromSource, EnvVar, SecretEnvSource};

/// Composes `env` and `envFrom` for each container role.
///
/// Entries are appended in precedence order: computed defaults, caller env,
/// role-specific computed entries, role-specific caller entries. Duplicate
/// names are kept; the kubelet lets the last one win.
pub struct EnvironmentBuilder<'a> {
    site: ResolvedSite<'a>,
    options: &'a RuntimeOptions,
}

impl<'a> EnvironmentBuilder<'a> {
    pub fn new(site: ResolvedSite<'a>, options: &'a RuntimeOptions) -> Self {
        Self { site, options }
    }

    pub fn build_env(&self, role: ContainerRole) -> Vec<EnvVar> {
        match role {
            ContainerRole::PrimaryService | ContainerRole::PrimaryJob => self.build_app_env_vars(),
            ContainerRole::Install => {
                let mut env_vars = self.build_app_env_vars();
                if let Some(bootstrap) = self.site.bootstrap() {
                    env_vars.extend(bootstrap.env.iter().cloned());
                }
                env_vars
            }
            ContainerRole::CodeFetch => self.build_git_clone_env_vars(),
            ContainerRole::MediaBootstrap | ContainerRole::MediaSync => {
                self.build_media_sync_env_vars()
            }
        }
    }

    pub fn build_env_from(&self, role: ContainerRole) -> Vec<EnvFromSource> {
        match role {
            ContainerRole::PrimaryService | ContainerRole::PrimaryJob => self.build_app_env_from(),
            ContainerRole::Install => {
                let mut sources = self.build_app_env_from();
                if let Some(bootstrap) = self.site.bootstrap() {
                    sources.extend(bootstrap.env_from.iter().cloned());
                }
                sources
            }
            ContainerRole::CodeFetch => self
                .site
                .git()
                .map(|git| git.env_from.clone())
                .unwrap_or_default(),
            ContainerRole::MediaBootstrap | ContainerRole::MediaSync => Vec::new(),
        }
    }

    /// The rclone remote the media bucket is synced from, e.g. `gs:bucket/prefix`.
    pub fn media_stream(&self) -> Option<String> {
        let store = self.site.object_store()?;
        let scheme = match store {
            ObjectStore::S3(_) => &self.options.media.s3_prefix,
            ObjectStore::Gcs(_) => &self.options.media.gcs_prefix,
        };

        let remote = format!("{}:{}", scheme, store.bucket());
        let prefix = store
            .path_prefix()
            .split('/')
            .filter(|segment| !segment.is_empty() && *segment != ".")
            .collect::<Vec<_>>()
            .join("/");
        if prefix.is_empty() {
            Some(remote)
        } else {
            Some(format!("{}/{}", remote, prefix))
        }
    }

    fn build_app_env_vars(&self) -> Vec<EnvVar> {
        let mut env_vars = Vec::new();
        env_vars.extend(self.build_base_env_vars());
        env_vars.extend(self.site.spec().env.iter().cloned());
        env_vars.extend(self.build_media_env_vars());
        env_vars
    }

    fn build_base_env_vars(&self) -> Vec<EnvVar> {
        let Some(home) = self.site.wp.home_url() else {
            return Vec::new();
        };

        vec![
            env_var("WP_HOME", home.clone()),
            env_var("WP_SITEURL", format!("{}/wp", home)),
        ]
    }

    fn build_media_env_vars(&self) -> Vec<EnvVar> {
        let Some(store) = self.site.object_store() else {
            return Vec::new();
        };

        let mut env_vars = vec![env_var(
            "UPLOADS_FTP_HOST",
            format!("127.0.0.1:{}", self.options.ports.ftp),
        )];

        match store {
            ObjectStore::S3(s3) => {
                env_vars.extend(forward_allow_listed(&s3.env, S3_ENV_ALLOW_LIST, true));
            }
            ObjectStore::Gcs(gcs) => {
                env_vars.push(env_var(
                    "MEDIA_BUCKET",
                    format!("{}://{}", self.options.media.gcs_prefix, gcs.bucket),
                ));
                env_vars.push(env_var("MEDIA_BUCKET_PREFIX", gcs.path_prefix.clone()));
                env_vars.extend(forward_allow_listed(&gcs.env, GCS_ENV_ALLOW_LIST, true));
            }
        }

        env_vars
    }

    fn build_media_sync_env_vars(&self) -> Vec<EnvVar> {
        let Some(store) = self.site.object_store() else {
            return Vec::new();
        };

        let allow_list = match store {
            ObjectStore::S3(_) => S3_ENV_ALLOW_LIST,
            ObjectStore::Gcs(_) => GCS_ENV_ALLOW_LIST,
        };

        let mut env_vars = forward_allow_listed(store.env(), allow_list, false);
        if let Some(stream) = self.media_stream() {
            env_vars.push(env_var("RCLONE_STREAM", stream));
        }
        env_vars
    }

    fn build_git_clone_env_vars(&self) -> Vec<EnvVar> {
        let Some(git) = self.site.git() else {
            return Vec::new();
        };

        let mut env_vars = vec![
            env_var("GIT_CLONE_URL", git.repository.clone()),
            env_var("SRC_DIR", CODE_SRC_MOUNT_PATH),
        ];

        if !git.git_ref.is_empty() {
            env_vars.push(env_var("GIT_CLONE_REF", git.git_ref.clone()));
        }

        env_vars.extend(git.env.iter().cloned());
        env_vars
    }

    fn build_app_env_from(&self) -> Vec<EnvFromSource> {
        let mut sources = vec![EnvFromSource {
            secret_ref: Some(SecretEnvSource {
                name: self.site.wp.component_name(Component::Secret),
                ..Default::default()
            }),
            ..Default::default()
        }];
        sources.extend(self.site.spec().env_from.iter().cloned());
        sources
    }
}

fn env_var(name: &str, value: impl Into<String>) -> EnvVar {
    EnvVar {
        name: name.to_string(),
        value: Some(value.into()),
        ..Default::default()
    }
}

/// Keep only allow-listed entries, optionally renaming them to the name the
/// application expects. Values and `valueFrom` references are copied as-is.
fn forward_allow_listed(
    env: &[EnvVar],
    allow_list: &[(&str, &str)],
    rename: bool,
) -> Vec<EnvVar> {
    env.iter()
        .filter_map(|var| {
            allow_list
                .iter()
                .find(|(from, _)| *from == var.name)
                .map(|(_, to)| {
                    let mut forwarded = var.clone();
                    if rename {
                        forwarded.name = to.to_string();
                    }
                    forwarded
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::site::{
        CodeVolumeSpec, GCSVolumeSource, GitVolumeSource, MediaVolumeSpec, S3VolumeSource,
        Wordpress, WordpressBootstrapSpec, WordpressSpec,
    };
    use k8s_openapi::api::core::v1::{EnvVarSource, SecretKeySelector};

    fn names(env: &[EnvVar]) -> Vec<&str> {
        env.iter().map(|e| e.name.as_str()).collect()
    }

    fn value<'e>(env: &'e [EnvVar], name: &str) -> Option<&'e str> {
        env.iter()
            .rev()
            .find(|e| e.name == name)
            .and_then(|e| e.value.as_deref())
    }

    fn secret_var(name: &str) -> EnvVar {
        EnvVar {
            name: name.to_string(),
            value_from: Some(EnvVarSource {
                secret_key_ref: Some(SecretKeySelector {
                    name: "media-credentials".to_string(),
                    key: name.to_lowercase(),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    fn s3_site() -> Wordpress {
        Wordpress::new(
            "blog",
            WordpressSpec {
                domains: vec!["blog.example.com".to_string()],
                env: vec![env_var("WP_DEBUG", "true")],
                media_volume_spec: Some(MediaVolumeSpec {
                    s3_volume_source: Some(S3VolumeSource {
                        bucket: "uploads".to_string(),
                        path_prefix: "/blog/".to_string(),
                        env: vec![
                            secret_var("AWS_ACCESS_KEY_ID"),
                            secret_var("AWS_SECRET_ACCESS_KEY"),
                            env_var("ENDPOINT", "https://minio.local"),
                            env_var("UNRELATED", "dropped"),
                        ],
                    }),
                    ..Default::default()
                }),
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_app_env_precedence_order() {
        let wp = s3_site();
        let options = RuntimeOptions::default();
        let env = EnvironmentBuilder::new(ResolvedSite::new(&wp), &options)
            .build_env(ContainerRole::PrimaryService);

        assert_eq!(
            names(&env),
            vec![
                "WP_HOME",
                "WP_SITEURL",
                "WP_DEBUG",
                "UPLOADS_FTP_HOST",
                "AWS_ACCESS_KEY_ID",
                "AWS_SECRET_ACCESS_KEY",
                "S3_ENDPOINT",
            ]
        );
        assert_eq!(value(&env, "WP_HOME"), Some("http://blog.example.com"));
        assert_eq!(
            value(&env, "WP_SITEURL"),
            Some("http://blog.example.com/wp")
        );
        assert_eq!(value(&env, "UPLOADS_FTP_HOST"), Some("127.0.0.1:2121"));
        assert!(env[4].value_from.is_some());
    }

    #[test]
    fn test_media_sync_env_filters_without_renaming() {
        let wp = s3_site();
        let options = RuntimeOptions::default();
        let env = EnvironmentBuilder::new(ResolvedSite::new(&wp), &options)
            .build_env(ContainerRole::MediaSync);

        assert_eq!(
            names(&env),
            vec![
                "AWS_ACCESS_KEY_ID",
                "AWS_SECRET_ACCESS_KEY",
                "ENDPOINT",
                "RCLONE_STREAM",
            ]
        );
        assert_eq!(value(&env, "RCLONE_STREAM"), Some("s3:uploads/blog"));
    }

    #[test]
    fn test_gcs_bucket_env() {
        let wp = Wordpress::new(
            "blog",
            WordpressSpec {
                media_volume_spec: Some(MediaVolumeSpec {
                    gcs_volume_source: Some(GCSVolumeSource {
                        bucket: "b".to_string(),
                        path_prefix: "p".to_string(),
                        env: vec![
                            secret_var("GOOGLE_CREDENTIALS"),
                            secret_var("AWS_ACCESS_KEY_ID"),
                        ],
                    }),
                    ..Default::default()
                }),
                ..Default::default()
            },
        );
        let options = RuntimeOptions::default();
        let builder = EnvironmentBuilder::new(ResolvedSite::new(&wp), &options);

        let env = builder.build_env(ContainerRole::PrimaryJob);
        assert_eq!(value(&env, "MEDIA_BUCKET"), Some("gs://b"));
        assert_eq!(value(&env, "MEDIA_BUCKET_PREFIX"), Some("p"));
        assert!(names(&env).contains(&"GOOGLE_CREDENTIALS"));
        assert!(!names(&env).contains(&"AWS_ACCESS_KEY_ID"));

        let sync = builder.build_env(ContainerRole::MediaBootstrap);
        assert_eq!(names(&sync), vec!["GOOGLE_CREDENTIALS", "RCLONE_STREAM"]);
        assert_eq!(builder.media_stream().unwrap(), "gs:b/p");
    }

    #[test]
    fn test_media_stream_without_prefix() {
        let wp = Wordpress::new(
            "blog",
            WordpressSpec {
                media_volume_spec: Some(MediaVolumeSpec {
                    gcs_volume_source: Some(GCSVolumeSource {
                        bucket: "b".to_string(),
                        ..Default::default()
                    }),
                    ..Default::default()
                }),
                ..Default::default()
            },
        );
        let options = RuntimeOptions::default();
        let builder = EnvironmentBuilder::new(ResolvedSite::new(&wp), &options);
        assert_eq!(builder.media_stream().unwrap(), "gs:b");
    }

    #[test]
    fn test_media_stream_normalizes_prefix() {
        let wp = Wordpress::new(
            "blog",
            WordpressSpec {
                media_volume_spec: Some(MediaVolumeSpec {
                    s3_volume_source: Some(S3VolumeSource {
                        bucket: "b".to_string(),
                        path_prefix: "x//y/./z".to_string(),
                        ..Default::default()
                    }),
                    ..Default::default()
                }),
                ..Default::default()
            },
        );
        let options = RuntimeOptions::default();
        let builder = EnvironmentBuilder::new(ResolvedSite::new(&wp), &options);
        assert_eq!(builder.media_stream().unwrap(), "s3:b/x/y/z");
    }

    #[test]
    fn test_tls_switches_scheme() {
        let mut wp = s3_site();
        wp.spec.tls_secret_ref = "blog-tls".to_string();
        let options = RuntimeOptions::default();
        let env = EnvironmentBuilder::new(ResolvedSite::new(&wp), &options)
            .build_env(ContainerRole::PrimaryService);
        assert_eq!(value(&env, "WP_HOME"), Some("https://blog.example.com"));
    }

    #[test]
    fn test_no_domains_omits_site_urls() {
        let wp = Wordpress::new("blog", WordpressSpec::default());
        let options = RuntimeOptions::default();
        let env = EnvironmentBuilder::new(ResolvedSite::new(&wp), &options)
            .build_env(ContainerRole::PrimaryService);
        assert!(env.is_empty());
    }

    #[test]
    fn test_install_env_and_sources() {
        let wp = Wordpress::new(
            "blog",
            WordpressSpec {
                domains: vec!["blog.example.com".to_string()],
                env_from: vec![EnvFromSource {
                    prefix: Some("SITE_".to_string()),
                    ..Default::default()
                }],
                bootstrap_spec: Some(WordpressBootstrapSpec {
                    env: vec![env_var("WORDPRESS_BOOTSTRAP_USER", "admin")],
                    env_from: vec![EnvFromSource {
                        prefix: Some("BOOTSTRAP_".to_string()),
                        ..Default::default()
                    }],
                }),
                ..Default::default()
            },
        );
        let options = RuntimeOptions::default();
        let builder = EnvironmentBuilder::new(ResolvedSite::new(&wp), &options);

        let env = builder.build_env(ContainerRole::Install);
        assert_eq!(
            names(&env),
            vec!["WP_HOME", "WP_SITEURL", "WORDPRESS_BOOTSTRAP_USER"]
        );

        let sources = builder.build_env_from(ContainerRole::Install);
        assert_eq!(sources.len(), 3);
        assert_eq!(sources[0].secret_ref.as_ref().unwrap().name, "blog-wp");
        assert_eq!(sources[1].prefix.as_deref(), Some("SITE_"));
        assert_eq!(sources[2].prefix.as_deref(), Some("BOOTSTRAP_"));

        let service_sources = builder.build_env_from(ContainerRole::PrimaryService);
        assert_eq!(service_sources.len(), 2);
    }

    #[test]
    fn test_git_clone_env() {
        let mut wp = Wordpress::new(
            "blog",
            WordpressSpec {
                code_volume_spec: Some(CodeVolumeSpec {
                    git_dir: Some(GitVolumeSource {
                        repository: "foo.git".to_string(),
                        git_ref: "main".to_string(),
                        env: vec![secret_var("SSH_RSA_PRIVATE_KEY")],
                        ..Default::default()
                    }),
                    ..Default::default()
                }),
                ..Default::default()
            },
        );
        let options = RuntimeOptions::default();
        let env = EnvironmentBuilder::new(ResolvedSite::new(&wp), &options)
            .build_env(ContainerRole::CodeFetch);
        assert_eq!(
            names(&env),
            vec![
                "GIT_CLONE_URL",
                "SRC_DIR",
                "GIT_CLONE_REF",
                "SSH_RSA_PRIVATE_KEY",
            ]
        );
        assert_eq!(value(&env, "GIT_CLONE_URL"), Some("foo.git"));
        assert_eq!(value(&env, "GIT_CLONE_REF"), Some("main"));

        let code = wp.spec.code_volume_spec.as_mut().unwrap();
        code.git_dir.as_mut().unwrap().git_ref.clear();
        let env = EnvironmentBuilder::new(ResolvedSite::new(&wp), &options)
            .build_env(ContainerRole::CodeFetch);
        assert!(!names(&env).contains(&"GIT_CLONE_REF"));
    }
}
