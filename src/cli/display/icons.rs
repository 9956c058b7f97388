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

use super::table::RowKind;

pub struct KindIcon;

impl KindIcon {
    /// Runs to completion before the pod starts
    pub const INIT: &'static str = "⏳";

    /// Primary container
    pub const MAIN: &'static str = "●";

    /// Sidecar next to the primary container
    pub const SIDECAR: &'static str = "◆";

    pub const VOLUME: &'static str = "▣";

    pub fn for_kind(kind: RowKind) -> &'static str {
        match kind {
            RowKind::Init => Self::INIT,
            RowKind::Main => Self::MAIN,
            RowKind::Sidecar => Self::SIDECAR,
            RowKind::Volume => Self::VOLUME,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_kind() {
        assert_eq!(KindIcon::for_kind(RowKind::Init), KindIcon::INIT);
        assert_eq!(KindIcon::for_kind(RowKind::Main), KindIcon::MAIN);
        assert_eq!(KindIcon::for_kind(RowKind::Sidecar), KindIcon::SIDECAR);
        assert_eq!(KindIcon::for_kind(RowKind::Volume), KindIcon::VOLUME);
    }
}
