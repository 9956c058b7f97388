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

use super::{ColorTheme, KindIcon};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Table};
use k8s_openapi::api::core::v1::{Container, PodTemplateSpec, Volume};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Init,
    Main,
    Sidecar,
    Volume,
}

impl RowKind {
    fn label(self) -> &'static str {
        match self {
            RowKind::Init => "init",
            RowKind::Main => "main",
            RowKind::Sidecar => "sidecar",
            RowKind::Volume => "volume",
        }
    }
}

#[derive(Debug, Clone)]
pub struct SummaryRow {
    pub kind: RowKind,
    pub name: String,
    /// Image for containers, backing source for volumes
    pub source: String,
    pub details: String,
}

#[derive(Debug, Clone)]
pub struct TemplateSummary {
    pub site: String,
    pub restart_policy: String,
    pub rows: Vec<SummaryRow>,
}

impl TemplateSummary {
    pub fn from_template(site: &str, template: &PodTemplateSpec) -> Self {
        let mut rows = Vec::new();
        let Some(spec) = template.spec.as_ref() else {
            return Self {
                site: site.to_string(),
                restart_policy: "Always".to_string(),
                rows,
            };
        };

        for container in spec.init_containers.iter().flatten() {
            rows.push(container_row(RowKind::Init, container));
        }
        for (i, container) in spec.containers.iter().enumerate() {
            let kind = if i == 0 {
                RowKind::Main
            } else {
                RowKind::Sidecar
            };
            rows.push(container_row(kind, container));
        }
        for volume in spec.volumes.iter().flatten() {
            rows.push(SummaryRow {
                kind: RowKind::Volume,
                name: volume.name.clone(),
                source: volume_source(volume),
                details: String::new(),
            });
        }

        Self {
            site: site.to_string(),
            restart_policy: spec
                .restart_policy
                .clone()
                .unwrap_or_else(|| "Always".to_string()),
            rows,
        }
    }
}

fn container_row(kind: RowKind, container: &Container) -> SummaryRow {
    let mut details = Vec::new();
    for port in container.ports.iter().flatten() {
        details.push(format!(
            "port {}/{}",
            port.name.as_deref().unwrap_or("-"),
            port.container_port
        ));
    }
    let env_count = container.env.as_ref().map_or(0, Vec::len);
    if env_count > 0 {
        details.push(format!("{} env", env_count));
    }
    let env_from_count = container.env_from.as_ref().map_or(0, Vec::len);
    if env_from_count > 0 {
        details.push(format!("{} envFrom", env_from_count));
    }

    SummaryRow {
        kind,
        name: container.name.clone(),
        source: container.image.clone().unwrap_or_default(),
        details: details.join(", "),
    }
}

fn volume_source(volume: &Volume) -> String {
    if let Some(ref claim) = volume.persistent_volume_claim {
        format!("persistentVolumeClaim:{}", claim.claim_name)
    } else if let Some(ref host_path) = volume.host_path {
        format!("hostPath:{}", host_path.path)
    } else if volume.empty_dir.is_some() {
        "emptyDir".to_string()
    } else {
        "other".to_string()
    }
}

pub struct TableRenderer {
    theme: ColorTheme,
}

impl Default for TableRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TableRenderer {
    /// Create a new table renderer with default theme
    pub fn new() -> Self {
        Self {
            theme: ColorTheme::default(),
        }
    }

    /// Render the pod template as one row per container and volume
    pub fn render_template(&self, summary: &TemplateSummary) -> String {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("KIND").set_alignment(CellAlignment::Left),
                Cell::new("NAME").set_alignment(CellAlignment::Left),
                Cell::new("IMAGE / SOURCE").set_alignment(CellAlignment::Left),
                Cell::new("DETAILS").set_alignment(CellAlignment::Left),
            ]);

        for row in &summary.rows {
            let color = self.theme.get_kind_color(row.kind);
            let kind = format!("{} {}", KindIcon::for_kind(row.kind), row.kind.label());
            table.add_row(vec![
                Cell::new(kind).fg(color),
                Cell::new(&row.name),
                Cell::new(&row.source),
                Cell::new(&row.details).fg(self.theme.muted),
            ]);
        }

        let mut output = String::new();
        output.push_str(&format!(
            "╭─ Pod template: {} {} ─╮\n",
            summary.site,
            format!("[restartPolicy: {}]", summary.restart_policy).bright_black()
        ));
        output.push_str(&table.to_string());
        output.push('\n');
        output.push_str(&format!(
            "Legend: {} init  {} main  {} sidecar  {} volume\n",
            KindIcon::INIT.yellow(),
            KindIcon::MAIN.green(),
            KindIcon::SIDECAR.cyan(),
            KindIcon::VOLUME.magenta()
        ));

        output
    }
}
