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

//! Pod template generation for Wordpress sites

pub mod builders;
pub mod merger;
pub mod template;
pub mod template_utils;

pub use self::builders::{
    ContainerBuilder, ContainerRole, EnvironmentBuilder, PodBuilder, VolumeResolver,
};
pub use self::merger::{merge_scheduling, override_if_set};
pub use self::template::{JobPodBuilder, WebPodBuilder};
pub use self::template_utils::{load_site_from_file, parse_site};
