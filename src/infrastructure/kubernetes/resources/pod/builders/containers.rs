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

use super::env::EnvironmentBuilder;
use super::traits::ContainerRole;
use super::volumes::VolumeResolver;
use crate::domain::config::RuntimeOptions;
use crate::domain::site::ResolvedSite;
use crate::infrastructure::constants::*;
use k8s_openapi::api::core::v1::{Container, ContainerPort, SecurityContext};
use tracing::debug;

/// Builds the init containers and primary containers of a site pod.
pub struct ContainerBuilder<'a> {
    site: ResolvedSite<'a>,
    options: &'a RuntimeOptions,
    env: EnvironmentBuilder<'a>,
    volumes: VolumeResolver<'a>,
}

impl<'a> ContainerBuilder<'a> {
    pub fn new(site: ResolvedSite<'a>, options: &'a RuntimeOptions) -> Self {
        Self {
            site,
            options,
            env: EnvironmentBuilder::new(site, options),
            volumes: VolumeResolver::new(site),
        }
    }

    /// Init containers in execution order: media bucket bootstrap, code
    /// fetch, then site installation. Installation needs the code in place.
    pub fn build_init_containers(&self) -> Vec<Container> {
        let mut containers = Vec::new();

        if self.site.has_external_media() {
            // The upload root must exist in the bucket or the FTP listing fails.
            let args = vec![
                "touch".to_string(),
                "-vvv".to_string(),
                format!("$(RCLONE_STREAM)/{}", UPLOADS_KEEP_PATH),
            ];
            containers.push(self.build_rclone_container(ContainerRole::MediaBootstrap, args));
        }

        if self.site.git().is_some() {
            containers.push(self.build_git_clone_container());
        }

        if let Some(install) = self.build_install_container() {
            containers.push(install);
        }

        debug!(
            init_containers = ?containers.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
            "composed init containers"
        );
        containers
    }

    pub fn build_service_container(&self) -> Container {
        let role = ContainerRole::PrimaryService;
        Container {
            ports: Some(vec![ContainerPort {
                name: Some(PORT_NAME_HTTP.to_string()),
                container_port: self.options.ports.http,
                ..Default::default()
            }]),
            resources: self.site.spec().resources.clone(),
            ..self.build_site_container(role)
        }
    }

    pub fn build_job_container(&self, cmd: &[String]) -> Container {
        Container {
            args: non_empty(cmd.to_vec()),
            ..self.build_site_container(ContainerRole::PrimaryJob)
        }
    }

    /// The FTP sidecar, present only for object-store media.
    pub fn build_media_containers(&self) -> Vec<Container> {
        if !self.site.has_external_media() {
            return Vec::new();
        }

        // Full VFS caching: thumbnails and gallery listings re-read the same
        // objects. Polling is off so idle pods make no bucket requests.
        let args = vec![
            "serve".to_string(),
            "ftp".to_string(),
            "-vvv".to_string(),
            "--vfs-cache-max-age".to_string(),
            self.options.media.cache_max_age.clone(),
            "--vfs-cache-mode".to_string(),
            "full".to_string(),
            "--vfs-cache-poll-interval".to_string(),
            "0".to_string(),
            "--poll-interval".to_string(),
            "0".to_string(),
            "$(RCLONE_STREAM)/".to_string(),
            format!("--addr=0.0.0.0:{}", self.options.ports.ftp),
        ];

        vec![self.build_rclone_container(ContainerRole::MediaSync, args)]
    }

    pub fn security_context(&self) -> SecurityContext {
        SecurityContext {
            run_as_user: Some(self.options.security.uid),
            proc_mount: Some(PROC_MOUNT_DEFAULT.to_string()),
            ..Default::default()
        }
    }

    /// Common shape of every container that runs the site image.
    fn build_site_container(&self, role: ContainerRole) -> Container {
        Container {
            name: role.container_name().to_string(),
            image: Some(self.site.wp.image()),
            volume_mounts: non_empty(self.volumes.build_volume_mounts()),
            env: non_empty(self.env.build_env(role)),
            env_from: non_empty(self.env.build_env_from(role)),
            security_context: Some(self.security_context()),
            ..Default::default()
        }
    }

    fn build_git_clone_container(&self) -> Container {
        let role = ContainerRole::CodeFetch;
        Container {
            name: role.container_name().to_string(),
            image: Some(self.options.images.git_clone.clone()),
            args: Some(vec![
                "/bin/bash".to_string(),
                "-c".to_string(),
                GIT_CLONE_SCRIPT.to_string(),
            ]),
            env: non_empty(self.env.build_env(role)),
            env_from: non_empty(self.env.build_env_from(role)),
            volume_mounts: Some(vec![self.volumes.code_src_mount()]),
            security_context: Some(self.security_context()),
            ..Default::default()
        }
    }

    /// Bootstrap credentials are passed as `$(VAR)` references so they never
    /// appear in the pod spec or the process list.
    fn build_install_container(&self) -> Option<Container> {
        self.site.bootstrap()?;

        let url = match self.site.wp.home_url() {
            Some(home) => format!("{}/", home),
            None => "$(WP_HOME)/".to_string(),
        };

        Some(Container {
            command: Some(vec![INSTALL_COMMAND.to_string()]),
            args: Some(vec![
                "$(WORDPRESS_BOOTSTRAP_TITLE)".to_string(),
                url,
                "$(WORDPRESS_BOOTSTRAP_USER)".to_string(),
                "$(WORDPRESS_BOOTSTRAP_PASSWORD)".to_string(),
                "$(WORDPRESS_BOOTSTRAP_EMAIL)".to_string(),
            ]),
            ..self.build_site_container(ContainerRole::Install)
        })
    }

    fn build_rclone_container(&self, role: ContainerRole, args: Vec<String>) -> Container {
        Container {
            name: role.container_name().to_string(),
            image: Some(self.options.images.rclone.clone()),
            args: Some(args),
            env: non_empty(self.env.build_env(role)),
            security_context: Some(self.security_context()),
            ..Default::default()
        }
    }
}

/// Empty lists are left unset so they are omitted from the manifest.
pub(crate) fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}
