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

//! Resolution of the code and media descriptors into a single active source.
//!
//! The resource models each descriptor as a set of optional fields. Callers
//! may populate several of them; the first populated field in priority order
//! wins and the rest are ignored.

use super::wordpress::{
    CodeVolumeSpec, GCSVolumeSource, GitVolumeSource, MediaVolumeSpec, S3VolumeSource,
};
use k8s_openapi::api::core::v1::{
    EmptyDirVolumeSource, HostPathVolumeSource, PersistentVolumeClaimSpec,
};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CodeSource<'a> {
    Git(&'a GitVolumeSource),
    PersistentClaim(&'a PersistentVolumeClaimSpec),
    HostPath(&'a HostPathVolumeSource),
    EmptyDir(Option<&'a EmptyDirVolumeSource>),
}

impl<'a> CodeSource<'a> {
    /// Git > PersistentVolumeClaim > HostPath > EmptyDir.
    pub fn resolve(spec: &'a CodeVolumeSpec) -> Self {
        let source = if let Some(git) = &spec.git_dir {
            CodeSource::Git(git)
        } else if let Some(pvc) = &spec.persistent_volume_claim {
            CodeSource::PersistentClaim(pvc)
        } else if let Some(host_path) = &spec.host_path {
            CodeSource::HostPath(host_path)
        } else {
            CodeSource::EmptyDir(spec.empty_dir.as_ref())
        };

        debug!(source = source.kind(), "resolved code source");
        source
    }

    pub fn git(&self) -> Option<&'a GitVolumeSource> {
        match self {
            CodeSource::Git(git) => Some(git),
            _ => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            CodeSource::Git(_) => "git",
            CodeSource::PersistentClaim(_) => "persistentVolumeClaim",
            CodeSource::HostPath(_) => "hostPath",
            CodeSource::EmptyDir(_) => "emptyDir",
        }
    }
}

/// The object-store backends served through the storage-sync sidecar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ObjectStore<'a> {
    S3(&'a S3VolumeSource),
    Gcs(&'a GCSVolumeSource),
}

impl<'a> ObjectStore<'a> {
    pub fn bucket(&self) -> &'a str {
        match self {
            ObjectStore::S3(s3) => &s3.bucket,
            ObjectStore::Gcs(gcs) => &gcs.bucket,
        }
    }

    pub fn path_prefix(&self) -> &'a str {
        match self {
            ObjectStore::S3(s3) => &s3.path_prefix,
            ObjectStore::Gcs(gcs) => &gcs.path_prefix,
        }
    }

    pub fn env(&self) -> &'a [k8s_openapi::api::core::v1::EnvVar] {
        match self {
            ObjectStore::S3(s3) => &s3.env,
            ObjectStore::Gcs(gcs) => &gcs.env,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MediaSource<'a> {
    External(ObjectStore<'a>),
    PersistentClaim(&'a PersistentVolumeClaimSpec),
    HostPath(&'a HostPathVolumeSource),
    EmptyDir(Option<&'a EmptyDirVolumeSource>),
}

impl<'a> MediaSource<'a> {
    /// S3 > GCS > PersistentVolumeClaim > HostPath > EmptyDir.
    pub fn resolve(spec: &'a MediaVolumeSpec) -> Self {
        let source = if let Some(s3) = &spec.s3_volume_source {
            MediaSource::External(ObjectStore::S3(s3))
        } else if let Some(gcs) = &spec.gcs_volume_source {
            MediaSource::External(ObjectStore::Gcs(gcs))
        } else if let Some(pvc) = &spec.persistent_volume_claim {
            MediaSource::PersistentClaim(pvc)
        } else if let Some(host_path) = &spec.host_path {
            MediaSource::HostPath(host_path)
        } else {
            MediaSource::EmptyDir(spec.empty_dir.as_ref())
        };

        debug!(source = source.kind(), "resolved media source");
        source
    }

    pub fn object_store(&self) -> Option<ObjectStore<'a>> {
        match self {
            MediaSource::External(store) => Some(*store),
            _ => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            MediaSource::External(ObjectStore::S3(_)) => "s3",
            MediaSource::External(ObjectStore::Gcs(_)) => "gcs",
            MediaSource::PersistentClaim(_) => "persistentVolumeClaim",
            MediaSource::HostPath(_) => "hostPath",
            MediaSource::EmptyDir(_) => "emptyDir",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host_path(path: &str) -> HostPathVolumeSource {
        HostPathVolumeSource {
            path: path.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_code_priority_git_wins() {
        let spec = CodeVolumeSpec {
            git_dir: Some(GitVolumeSource {
                repository: "foo.git".to_string(),
                ..Default::default()
            }),
            persistent_volume_claim: Some(PersistentVolumeClaimSpec::default()),
            host_path: Some(host_path("/srv/code")),
            empty_dir: Some(EmptyDirVolumeSource::default()),
            ..Default::default()
        };

        assert_eq!(CodeSource::resolve(&spec).kind(), "git");
        assert_eq!(
            CodeSource::resolve(&spec).git().unwrap().repository,
            "foo.git"
        );
    }

    #[test]
    fn test_code_priority_without_git() {
        let mut spec = CodeVolumeSpec {
            persistent_volume_claim: Some(PersistentVolumeClaimSpec::default()),
            host_path: Some(host_path("/srv/code")),
            ..Default::default()
        };
        assert_eq!(CodeSource::resolve(&spec).kind(), "persistentVolumeClaim");

        spec.persistent_volume_claim = None;
        assert_eq!(CodeSource::resolve(&spec).kind(), "hostPath");

        spec.host_path = None;
        assert_eq!(CodeSource::resolve(&spec), CodeSource::EmptyDir(None));
    }

    #[test]
    fn test_media_priority() {
        let mut spec = MediaVolumeSpec {
            s3_volume_source: Some(S3VolumeSource::default()),
            gcs_volume_source: Some(GCSVolumeSource::default()),
            persistent_volume_claim: Some(PersistentVolumeClaimSpec::default()),
            host_path: Some(host_path("/srv/media")),
            ..Default::default()
        };
        assert_eq!(MediaSource::resolve(&spec).kind(), "s3");

        spec.s3_volume_source = None;
        assert_eq!(MediaSource::resolve(&spec).kind(), "gcs");
        assert!(MediaSource::resolve(&spec).object_store().is_some());

        spec.gcs_volume_source = None;
        assert_eq!(MediaSource::resolve(&spec).kind(), "persistentVolumeClaim");
        assert!(MediaSource::resolve(&spec).object_store().is_none());

        spec.persistent_volume_claim = None;
        assert_eq!(MediaSource::resolve(&spec).kind(), "hostPath");

        spec.host_path = None;
        assert_eq!(MediaSource::resolve(&spec).kind(), "emptyDir");
    }

    #[test]
    fn test_object_store_accessors() {
        let gcs = GCSVolumeSource {
            bucket: "b".to_string(),
            path_prefix: "p".to_string(),
            env: Vec::new(),
        };
        let store = ObjectStore::Gcs(&gcs);
        assert_eq!(store.bucket(), "b");
        assert_eq!(store.path_prefix(), "p");
        assert!(store.env().is_empty());
    }
}
