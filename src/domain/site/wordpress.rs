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

//! The `Wordpress` custom resource: the declarative site description that
//! pod templates are generated from.

use crate::infrastructure::constants::*;
use k8s_openapi::api::core::v1::{
    Affinity, EmptyDirVolumeSource, EnvFromSource, EnvVar, HostPathVolumeSource,
    LocalObjectReference, PersistentVolumeClaimSpec, ResourceRequirements, Toleration, Volume,
    VolumeMount,
};
use kube::{CustomResource, ResourceExt};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(CustomResource, Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "wordpress.presslabs.org",
    version = "v1alpha1",
    kind = "Wordpress",
    plural = "wordpresses",
    shortname = "wp",
    namespaced
)]
#[serde(default, rename_all = "camelCase")]
pub struct WordpressSpec {
    pub image: String,
    pub tag: String,
    /// Domains served by the site. The first one is the canonical site URL.
    pub domains: Vec<String>,
    #[serde(rename = "tlsSecretRef")]
    pub tls_secret_ref: String,

    pub env: Vec<EnvVar>,
    pub env_from: Vec<EnvFromSource>,
    pub volume_mounts: Vec<VolumeMount>,
    pub volumes: Vec<Volume>,
    pub resources: Option<ResourceRequirements>,

    pub node_selector: BTreeMap<String, String>,
    pub tolerations: Vec<Toleration>,
    pub affinity: Option<Affinity>,
    pub priority_class_name: String,
    pub service_account_name: String,
    pub image_pull_secrets: Vec<LocalObjectReference>,

    #[serde(rename = "code")]
    pub code_volume_spec: Option<CodeVolumeSpec>,
    #[serde(rename = "media")]
    pub media_volume_spec: Option<MediaVolumeSpec>,
    #[serde(rename = "bootstrap")]
    pub bootstrap_spec: Option<WordpressBootstrapSpec>,
}

/// Where the site code comes from. Exactly one source is expected; see
/// [`CodeSource::resolve`](super::CodeSource::resolve) for the tie-break.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct CodeVolumeSpec {
    pub read_only: bool,
    pub mount_path: String,
    pub content_sub_path: String,
    pub config_sub_path: String,

    #[serde(rename = "git")]
    pub git_dir: Option<GitVolumeSource>,
    pub persistent_volume_claim: Option<PersistentVolumeClaimSpec>,
    pub host_path: Option<HostPathVolumeSource>,
    pub empty_dir: Option<EmptyDirVolumeSource>,
}

impl Default for CodeVolumeSpec {
    fn default() -> Self {
        Self {
            read_only: false,
            mount_path: DEFAULT_CODE_MOUNT_PATH.to_string(),
            content_sub_path: DEFAULT_CONTENT_SUB_PATH.to_string(),
            config_sub_path: DEFAULT_CONFIG_SUB_PATH.to_string(),
            git_dir: None,
            persistent_volume_claim: None,
            host_path: None,
            empty_dir: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct GitVolumeSource {
    pub repository: String,
    #[serde(rename = "reference")]
    pub git_ref: String,
    pub env: Vec<EnvVar>,
    pub env_from: Vec<EnvFromSource>,
    /// Backing volume for the checkout. Defaults to an empty emptyDir.
    pub empty_dir: Option<EmptyDirVolumeSource>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct MediaVolumeSpec {
    pub read_only: bool,

    #[serde(rename = "s3")]
    pub s3_volume_source: Option<S3VolumeSource>,
    #[serde(rename = "gcs")]
    pub gcs_volume_source: Option<GCSVolumeSource>,
    pub persistent_volume_claim: Option<PersistentVolumeClaimSpec>,
    pub host_path: Option<HostPathVolumeSource>,
    pub empty_dir: Option<EmptyDirVolumeSource>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct S3VolumeSource {
    pub bucket: String,
    #[serde(rename = "prefix")]
    pub path_prefix: String,
    /// Backend credentials. Only allow-listed names are forwarded.
    pub env: Vec<EnvVar>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct GCSVolumeSource {
    pub bucket: String,
    #[serde(rename = "prefix")]
    pub path_prefix: String,
    pub env: Vec<EnvVar>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct WordpressBootstrapSpec {
    pub env: Vec<EnvVar>,
    pub env_from: Vec<EnvFromSource>,
}

/// Named objects that belong to a site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    Secret,
    CodePvc,
    MediaPvc,
}

impl Component {
    fn suffix(self) -> &'static str {
        match self {
            Component::Secret => SECRET_SUFFIX,
            Component::CodePvc => CODE_PVC_SUFFIX,
            Component::MediaPvc => MEDIA_PVC_SUFFIX,
        }
    }
}

impl Wordpress {
    pub fn image(&self) -> String {
        format!("{}:{}", self.spec.image, self.spec.tag)
    }

    pub fn component_name(&self, component: Component) -> String {
        format!("{}{}", self.name_any(), component.suffix())
    }

    pub fn labels_for_component(&self, component: &str) -> BTreeMap<String, String> {
        let part_of = self
            .labels()
            .get(LABEL_PART_OF)
            .filter(|v| !v.is_empty())
            .cloned()
            .unwrap_or_else(|| LABEL_NAME_VALUE.to_string());

        let mut labels = BTreeMap::new();
        labels.insert(LABEL_NAME.to_string(), LABEL_NAME_VALUE.to_string());
        labels.insert(LABEL_PART_OF.to_string(), part_of);
        labels.insert(LABEL_INSTANCE.to_string(), self.name_any());
        labels.insert(LABEL_COMPONENT.to_string(), component.to_string());
        labels
    }

    /// `http` unless a TLS secret is referenced.
    pub fn scheme(&self) -> &'static str {
        if self.spec.tls_secret_ref.is_empty() {
            "http"
        } else {
            "https"
        }
    }

    /// `<scheme>://<first domain>`, or `None` when no domain is configured.
    pub fn home_url(&self) -> Option<String> {
        self.spec
            .domains
            .first()
            .map(|domain| format!("{}://{}", self.scheme(), domain))
    }
}
