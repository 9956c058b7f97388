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

use super::containers::{non_empty, ContainerBuilder};
use super::volumes::VolumeResolver;
use crate::domain::config::RuntimeOptions;
use crate::domain::site::ResolvedSite;
use crate::infrastructure::constants::*;
use crate::infrastructure::kubernetes::resources::pod::merger::merge_scheduling;
use k8s_openapi::api::core::v1::{Container, PodSecurityContext, PodSpec, PodTemplateSpec};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::ResourceExt;
use std::collections::BTreeMap;
use tracing::debug;

/// The part a generated container plays in the pod.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerRole {
    /// Clones the site repository into the code volume.
    CodeFetch,
    /// Creates the upload directory in the media bucket.
    MediaBootstrap,
    /// Runs the one-time site installation.
    Install,
    PrimaryService,
    PrimaryJob,
    /// Serves the media bucket over FTP next to the primary container.
    MediaSync,
}

impl ContainerRole {
    pub fn container_name(self) -> &'static str {
        match self {
            ContainerRole::CodeFetch => CONTAINER_NAME_GIT,
            ContainerRole::MediaBootstrap => CONTAINER_NAME_RCLONE_INIT,
            ContainerRole::Install => CONTAINER_NAME_INSTALL,
            ContainerRole::PrimaryService => CONTAINER_NAME_WORDPRESS,
            ContainerRole::PrimaryJob => CONTAINER_NAME_WP_CLI,
            ContainerRole::MediaSync => CONTAINER_NAME_RCLONE_FTP,
        }
    }
}

pub trait PodBuilder {
    fn component_name(&self) -> &'static str;

    fn site(&self) -> ResolvedSite<'_>;

    fn options(&self) -> &RuntimeOptions;

    fn get_labels(&self) -> BTreeMap<String, String> {
        self.site().wp.labels_for_component(self.component_name())
    }

    fn main_container(&self) -> Container;

    fn restart_policy(&self) -> Option<String> {
        None
    }

    /// Assemble the full pod template: init containers, the main container
    /// followed by any media sidecar, the site volumes, the pod security
    /// context and the site's scheduling hints.
    fn build(&self) -> PodTemplateSpec {
        let site = self.site();
        let options = self.options();
        let containers = ContainerBuilder::new(site, options);

        let mut main_containers = vec![self.main_container()];
        main_containers.extend(containers.build_media_containers());

        let mut spec = PodSpec {
            init_containers: non_empty(containers.build_init_containers()),
            containers: main_containers,
            volumes: Some(VolumeResolver::new(site).build_volumes()),
            restart_policy: self.restart_policy(),
            security_context: Some(PodSecurityContext {
                fs_group: Some(options.security.uid),
                ..Default::default()
            }),
            ..Default::default()
        };
        merge_scheduling(&mut spec, site.spec());

        debug!(
            site = %site.wp.name_any(),
            component = self.component_name(),
            external_media = site.has_external_media(),
            "assembled pod template"
        );

        PodTemplateSpec {
            metadata: Some(ObjectMeta {
                labels: Some(self.get_labels()),
                ..Default::default()
            }),
            spec: Some(spec),
        }
    }
}
