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

use super::builders::{ContainerBuilder, PodBuilder};
use crate::domain::config::RuntimeOptions;
use crate::domain::site::{ResolvedSite, Wordpress};
use crate::infrastructure::constants::{COMPONENT_WEB, COMPONENT_WP_CLI, RESTART_POLICY_NEVER};
use k8s_openapi::api::core::v1::{Container, PodTemplateSpec};

/// Pod template for the long-running web deployment.
pub struct WebPodBuilder<'a> {
    site: ResolvedSite<'a>,
    options: &'a RuntimeOptions,
}

impl<'a> WebPodBuilder<'a> {
    pub fn new(wp: &'a Wordpress, options: &'a RuntimeOptions) -> Self {
        Self {
            site: ResolvedSite::new(wp),
            options,
        }
    }
}

impl PodBuilder for WebPodBuilder<'_> {
    fn component_name(&self) -> &'static str {
        COMPONENT_WEB
    }

    fn site(&self) -> ResolvedSite<'_> {
        self.site
    }

    fn options(&self) -> &RuntimeOptions {
        self.options
    }

    fn main_container(&self) -> Container {
        ContainerBuilder::new(self.site, self.options).build_service_container()
    }
}

/// Pod template for one-shot wp-cli jobs. The pod is never restarted in place.
pub struct JobPodBuilder<'a> {
    site: ResolvedSite<'a>,
    options: &'a RuntimeOptions,
    cmd: Vec<String>,
}

impl<'a> JobPodBuilder<'a> {
    pub fn new(wp: &'a Wordpress, options: &'a RuntimeOptions, cmd: &[String]) -> Self {
        Self {
            site: ResolvedSite::new(wp),
            options,
            cmd: cmd.to_vec(),
        }
    }
}

impl PodBuilder for JobPodBuilder<'_> {
    fn component_name(&self) -> &'static str {
        COMPONENT_WP_CLI
    }

    fn site(&self) -> ResolvedSite<'_> {
        self.site
    }

    fn options(&self) -> &RuntimeOptions {
        self.options
    }

    fn main_container(&self) -> Container {
        ContainerBuilder::new(self.site, self.options).build_job_container(&self.cmd)
    }

    fn restart_policy(&self) -> Option<String> {
        Some(RESTART_POLICY_NEVER.to_string())
    }
}

impl Wordpress {
    /// Pod template suitable for the web deployment.
    pub fn web_pod_template_spec(&self, options: &RuntimeOptions) -> PodTemplateSpec {
        WebPodBuilder::new(self, options).build()
    }

    /// Pod template suitable for a wp-cli job running `cmd`.
    pub fn job_pod_template_spec(
        &self,
        options: &RuntimeOptions,
        cmd: &[String],
    ) -> PodTemplateSpec {
        JobPodBuilder::new(self, options, cmd).build()
    }
}
