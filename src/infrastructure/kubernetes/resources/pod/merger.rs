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

use crate::domain::site::WordpressSpec;
use k8s_openapi::api::core::v1::{Affinity, PodSpec, Toleration};
use std::collections::BTreeMap;

/// Values that can be "unset" without being absent, such as an empty string
/// or an empty list.
pub trait Unset {
    fn is_unset(&self) -> bool;
}

impl Unset for String {
    fn is_unset(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Unset for Vec<T> {
    fn is_unset(&self) -> bool {
        self.is_empty()
    }
}

impl<K, V> Unset for BTreeMap<K, V> {
    fn is_unset(&self) -> bool {
        self.is_empty()
    }
}

impl Unset for Affinity {
    fn is_unset(&self) -> bool {
        self.node_affinity.is_none()
            && self.pod_affinity.is_none()
            && self.pod_anti_affinity.is_none()
    }
}

/// Returns `value` when it is set, otherwise keeps `default`. An empty value
/// never replaces the platform default.
pub fn override_if_set<T: Unset + Clone>(default: Option<T>, value: Option<&T>) -> Option<T> {
    match value {
        Some(v) if !v.is_unset() => Some(v.clone()),
        _ => default,
    }
}

/// Copy the site's scheduling hints onto a pod spec. Shared by the web and
/// job templates so both follow the same override rules.
pub fn merge_scheduling(spec: &mut PodSpec, site: &WordpressSpec) {
    spec.image_pull_secrets = override_if_set(
        spec.image_pull_secrets.take(),
        Some(&site.image_pull_secrets),
    );
    spec.service_account_name = override_if_set(
        spec.service_account_name.take(),
        Some(&site.service_account_name),
    );
    spec.node_selector = override_if_set(spec.node_selector.take(), Some(&site.node_selector));
    spec.tolerations =
        override_if_set::<Vec<Toleration>>(spec.tolerations.take(), Some(&site.tolerations));
    spec.affinity = override_if_set(spec.affinity.take(), site.affinity.as_ref());
    spec.priority_class_name = override_if_set(
        spec.priority_class_name.take(),
        Some(&site.priority_class_name),
    );
}
