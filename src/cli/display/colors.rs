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
use comfy_table::Color as TableColor;

#[derive(Debug, Clone)]
pub struct ColorTheme {
    pub init: TableColor,
    pub main: TableColor,
    pub sidecar: TableColor,
    pub volume: TableColor,
    pub muted: TableColor,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            init: TableColor::Yellow,
            main: TableColor::Green,
            sidecar: TableColor::Cyan,
            volume: TableColor::Magenta,
            muted: TableColor::DarkGrey,
        }
    }
}

impl ColorTheme {
    pub fn get_kind_color(&self, kind: RowKind) -> TableColor {
        match kind {
            RowKind::Init => self.init,
            RowKind::Main => self.main,
            RowKind::Sidecar => self.sidecar,
            RowKind::Volume => self.volume,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_theme() {
        let theme = ColorTheme::default();
        assert_eq!(theme.get_kind_color(RowKind::Init), TableColor::Yellow);
        assert_eq!(theme.get_kind_color(RowKind::Main), TableColor::Green);
        assert_eq!(theme.get_kind_color(RowKind::Sidecar), TableColor::Cyan);
        assert_eq!(theme.muted, TableColor::DarkGrey);
    }
}
