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

use crate::domain::site::{CodeSource, Component, MediaSource, ResolvedSite};
use crate::infrastructure::constants::*;
use k8s_openapi::api::core::v1::{
    EmptyDirVolumeSource, PersistentVolumeClaimVolumeSource, Volume, VolumeMount,
};

/// Picks the concrete backing for the `code` and `media` volumes.
///
/// Total over every input: anything not explicitly backed by a claim or a
/// host path becomes an emptyDir.
pub struct VolumeResolver<'a> {
    site: ResolvedSite<'a>,
}

impl<'a> VolumeResolver<'a> {
    pub fn new(site: ResolvedSite<'a>) -> Self {
        Self { site }
    }

    pub fn code_volume(&self) -> Volume {
        match self.site.code {
            None => empty_dir_volume(VOLUME_NAME_CODE, None),
            Some(CodeSource::Git(git)) => {
                empty_dir_volume(VOLUME_NAME_CODE, git.empty_dir.as_ref())
            }
            Some(CodeSource::PersistentClaim(_)) => claim_volume(
                VOLUME_NAME_CODE,
                self.site.wp.component_name(Component::CodePvc),
            ),
            Some(CodeSource::HostPath(host_path)) => Volume {
                name: VOLUME_NAME_CODE.to_string(),
                host_path: Some(host_path.clone()),
                ..Default::default()
            },
            Some(CodeSource::EmptyDir(empty_dir)) => empty_dir_volume(VOLUME_NAME_CODE, empty_dir),
        }
    }

    /// Object-store media is never mounted; it is reached through the FTP
    /// sidecar, so the volume stays an empty emptyDir.
    pub fn media_volume(&self) -> Volume {
        match self.site.media {
            None | Some(MediaSource::External(_)) => empty_dir_volume(VOLUME_NAME_MEDIA, None),
            Some(MediaSource::PersistentClaim(_)) => claim_volume(
                VOLUME_NAME_MEDIA,
                self.site.wp.component_name(Component::MediaPvc),
            ),
            Some(MediaSource::HostPath(host_path)) => Volume {
                name: VOLUME_NAME_MEDIA.to_string(),
                host_path: Some(host_path.clone()),
                ..Default::default()
            },
            Some(MediaSource::EmptyDir(empty_dir)) => {
                empty_dir_volume(VOLUME_NAME_MEDIA, empty_dir)
            }
        }
    }

    /// Caller volumes first, then `code` and `media`.
    pub fn build_volumes(&self) -> Vec<Volume> {
        let mut volumes = self.site.spec().volumes.clone();
        volumes.push(self.code_volume());
        volumes.push(self.media_volume());
        volumes
    }

    /// Mounts for the containers running the site image.
    pub fn build_volume_mounts(&self) -> Vec<VolumeMount> {
        let mut mounts = self.site.spec().volume_mounts.clone();

        if let Some(code) = self.site.code_spec() {
            mounts.push(VolumeMount {
                name: VOLUME_NAME_CODE.to_string(),
                mount_path: CODE_SRC_MOUNT_PATH.to_string(),
                read_only: Some(code.read_only),
                ..Default::default()
            });
            mounts.push(VolumeMount {
                name: VOLUME_NAME_CODE.to_string(),
                mount_path: code.mount_path.clone(),
                read_only: Some(code.read_only),
                sub_path: non_empty(&code.content_sub_path),
                ..Default::default()
            });
            mounts.push(VolumeMount {
                name: VOLUME_NAME_CODE.to_string(),
                mount_path: CONFIG_MOUNT_PATH.to_string(),
                read_only: Some(true),
                sub_path: non_empty(&code.config_sub_path),
                ..Default::default()
            });
        }

        mounts
    }

    /// The single mount the code-fetch container clones into.
    pub fn code_src_mount(&self) -> VolumeMount {
        VolumeMount {
            name: VOLUME_NAME_CODE.to_string(),
            mount_path: CODE_SRC_MOUNT_PATH.to_string(),
            ..Default::default()
        }
    }
}

fn empty_dir_volume(name: &str, empty_dir: Option<&EmptyDirVolumeSource>) -> Volume {
    Volume {
        name: name.to_string(),
        empty_dir: Some(empty_dir.cloned().unwrap_or_default()),
        ..Default::default()
    }
}

fn claim_volume(name: &str, claim_name: String) -> Volume {
    Volume {
        name: name.to_string(),
        persistent_volume_claim: Some(PersistentVolumeClaimVolumeSource {
            claim_name,
            ..Default::default()
        }),
        ..Default::default()
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::site::{
        CodeVolumeSpec, GitVolumeSource, MediaVolumeSpec, S3VolumeSource, Wordpress, WordpressSpec,
    };
    use k8s_openapi::api::core::v1::{HostPathVolumeSource, PersistentVolumeClaimSpec};
    use k8s_openapi::apimachinery::pkg::api::resource::Quantity;

    fn site(code: Option<CodeVolumeSpec>, media: Option<MediaVolumeSpec>) -> Wordpress {
        Wordpress::new(
            "blog",
            WordpressSpec {
                code_volume_spec: code,
                media_volume_spec: media,
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_absent_descriptors_default_to_empty_dir() {
        let wp = site(None, None);
        let resolver = VolumeResolver::new(ResolvedSite::new(&wp));

        let volumes = resolver.build_volumes();
        assert_eq!(volumes.len(), 2);
        assert_eq!(volumes[0].name, "code");
        assert_eq!(volumes[0].empty_dir, Some(EmptyDirVolumeSource::default()));
        assert_eq!(volumes[1].name, "media");
        assert_eq!(volumes[1].empty_dir, Some(EmptyDirVolumeSource::default()));
        assert!(resolver.build_volume_mounts().is_empty());
    }

    #[test]
    fn test_git_uses_empty_dir_override() {
        let memory = EmptyDirVolumeSource {
            medium: Some("Memory".to_string()),
            size_limit: Some(Quantity("1Gi".to_string())),
        };
        let wp = site(
            Some(CodeVolumeSpec {
                git_dir: Some(GitVolumeSource {
                    repository: "foo.git".to_string(),
                    empty_dir: Some(memory.clone()),
                    ..Default::default()
                }),
                persistent_volume_claim: Some(PersistentVolumeClaimSpec::default()),
                ..Default::default()
            }),
            None,
        );
        let volume = VolumeResolver::new(ResolvedSite::new(&wp)).code_volume();
        assert_eq!(volume.empty_dir, Some(memory));
        assert!(volume.persistent_volume_claim.is_none());
    }

    #[test]
    fn test_claims_use_component_names() {
        let wp = site(
            Some(CodeVolumeSpec {
                persistent_volume_claim: Some(PersistentVolumeClaimSpec::default()),
                ..Default::default()
            }),
            Some(MediaVolumeSpec {
                persistent_volume_claim: Some(PersistentVolumeClaimSpec::default()),
                ..Default::default()
            }),
        );
        let resolver = VolumeResolver::new(ResolvedSite::new(&wp));
        let code_claim = resolver.code_volume().persistent_volume_claim.unwrap();
        assert_eq!(code_claim.claim_name, "blog-code");
        let media_claim = resolver.media_volume().persistent_volume_claim.unwrap();
        assert_eq!(media_claim.claim_name, "blog-media");
    }

    #[test]
    fn test_code_host_path_volume() {
        let host_path = HostPathVolumeSource {
            path: "/srv/code".to_string(),
            type_: Some("Directory".to_string()),
        };
        let wp = site(
            Some(CodeVolumeSpec {
                host_path: Some(host_path.clone()),
                ..Default::default()
            }),
            None,
        );
        let volume = VolumeResolver::new(ResolvedSite::new(&wp)).code_volume();
        assert_eq!(volume.name, "code");
        assert_eq!(volume.host_path, Some(host_path));
        assert!(volume.empty_dir.is_none());
    }

    #[test]
    fn test_host_path_volumes() {
        let host_path = HostPathVolumeSource {
            path: "/srv/media".to_string(),
            ..Default::default()
        };
        let wp = site(
            None,
            Some(MediaVolumeSpec {
                host_path: Some(host_path.clone()),
                ..Default::default()
            }),
        );
        let volume = VolumeResolver::new(ResolvedSite::new(&wp)).media_volume();
        assert_eq!(volume.host_path, Some(host_path));
    }

    #[test]
    fn test_external_media_is_not_mounted() {
        let wp = site(
            None,
            Some(MediaVolumeSpec {
                s3_volume_source: Some(S3VolumeSource::default()),
                persistent_volume_claim: Some(PersistentVolumeClaimSpec::default()),
                ..Default::default()
            }),
        );
        let volume = VolumeResolver::new(ResolvedSite::new(&wp)).media_volume();
        assert_eq!(volume.empty_dir, Some(EmptyDirVolumeSource::default()));
        assert!(volume.persistent_volume_claim.is_none());
    }

    #[test]
    fn test_code_mounts() {
        let wp = site(
            Some(CodeVolumeSpec {
                read_only: true,
                ..Default::default()
            }),
            None,
        );
        let mounts = VolumeResolver::new(ResolvedSite::new(&wp)).build_volume_mounts();
        assert_eq!(mounts.len(), 3);
        assert_eq!(mounts[0].mount_path, CODE_SRC_MOUNT_PATH);
        assert_eq!(mounts[1].mount_path, "/app/web/wp-content");
        assert_eq!(mounts[1].sub_path.as_deref(), Some("wp-content"));
        assert_eq!(mounts[1].read_only, Some(true));
        assert_eq!(mounts[2].mount_path, CONFIG_MOUNT_PATH);
        assert_eq!(mounts[2].sub_path.as_deref(), Some("config"));
    }
}
