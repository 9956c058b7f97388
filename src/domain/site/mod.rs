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

pub mod source;
pub mod wordpress;

pub use self::source::{CodeSource, MediaSource, ObjectStore};
pub use self::wordpress::{
    CodeVolumeSpec, Component, GCSVolumeSource, GitVolumeSource, MediaVolumeSpec, S3VolumeSource,
    Wordpress, WordpressBootstrapSpec, WordpressSpec,
};

/// A site with its code and media descriptors resolved to one active source
/// each. Built once per translation and shared by every builder.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedSite<'a> {
    pub wp: &'a Wordpress,
    /// `None` when the resource carries no code descriptor at all.
    pub code: Option<CodeSource<'a>>,
    pub media: Option<MediaSource<'a>>,
}

impl<'a> ResolvedSite<'a> {
    pub fn new(wp: &'a Wordpress) -> Self {
        Self {
            wp,
            code: wp.spec.code_volume_spec.as_ref().map(CodeSource::resolve),
            media: wp.spec.media_volume_spec.as_ref().map(MediaSource::resolve),
        }
    }

    pub fn spec(&self) -> &'a WordpressSpec {
        &self.wp.spec
    }

    pub fn code_spec(&self) -> Option<&'a CodeVolumeSpec> {
        self.wp.spec.code_volume_spec.as_ref()
    }

    pub fn git(&self) -> Option<&'a GitVolumeSource> {
        self.code.and_then(|code| code.git())
    }

    pub fn object_store(&self) -> Option<ObjectStore<'a>> {
        self.media.and_then(|media| media.object_store())
    }

    /// True iff media lives in an S3 or GCS bucket.
    pub fn has_external_media(&self) -> bool {
        self.object_store().is_some()
    }

    pub fn bootstrap(&self) -> Option<&'a WordpressBootstrapSpec> {
        self.wp.spec.bootstrap_spec.as_ref()
    }
}
