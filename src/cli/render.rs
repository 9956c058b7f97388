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

use super::display::{TableRenderer, TemplateSummary};
use crate::domain::config::{apply_to_runtime_options, parse_dynamic_configs, RuntimeOptions};
use crate::domain::site::Wordpress;
use crate::infrastructure::kubernetes::resources::pod::load_site_from_file;
use clap::{Args, Parser, ValueEnum};
use k8s_openapi::api::core::v1::PodTemplateSpec;
use kube::{CustomResourceExt, ResourceExt};
use tracing::info;

/// Inputs shared by every command that generates a pod template.
#[derive(Args, Debug, Clone)]
pub struct SiteArgs {
    /// Path to the Wordpress resource manifest (YAML or JSON)
    #[arg(long, short = 'f', value_name = "PATH")]
    pub file: String,

    /// Path to a TOML file with runtime options (images, ports, uid, media cache)
    #[arg(long, value_name = "PATH")]
    pub options_file: Option<String>,

    /// Runtime option overrides (-D key=value)
    ///
    /// Keys: images.git-clone, images.rclone, ports.http, ports.ftp,
    /// security.uid, media.cache-max-age, media.s3-prefix, media.gcs-prefix
    ///
    /// Example: -Dimages.rclone=rclone/rclone:1.66 -Dmedia.cache-max-age=1m
    #[arg(short = 'D', value_name = "KEY=VALUE")]
    pub properties: Vec<String>,

    /// Generate the wp-cli job template instead of the web template
    #[arg(long)]
    pub job: bool,

    /// Command run by the wp-cli job container (after `--`)
    #[arg(last = true, value_name = "CMD")]
    pub cmd: Vec<String>,
}

impl SiteArgs {
    /// Priority: -D properties > options file > built-in defaults
    pub fn load_options(&self) -> anyhow::Result<RuntimeOptions> {
        let mut options = match self.options_file {
            Some(ref path) => RuntimeOptions::from_file(path)?,
            None => RuntimeOptions::default(),
        };

        if !self.properties.is_empty() {
            let configs = parse_dynamic_configs(&self.properties)
                .map_err(|e| anyhow::anyhow!("Failed to parse dynamic configs: {}", e))?;
            apply_to_runtime_options(&configs, &mut options)?;
        }

        Ok(options)
    }

    pub fn load_site(&self) -> anyhow::Result<Wordpress> {
        Ok(load_site_from_file(&self.file)?)
    }

    pub fn build_template(&self) -> anyhow::Result<(Wordpress, PodTemplateSpec)> {
        let options = self.load_options()?;
        let wp = self.load_site()?;

        let template = if self.job {
            wp.job_pod_template_spec(&options, &self.cmd)
        } else {
            wp.web_pod_template_spec(&options)
        };

        info!(
            site = %wp.name_any(),
            job = self.job,
            "generated pod template"
        );
        Ok((wp, template))
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

#[derive(Parser, Debug, Clone)]
pub struct RenderCommand {
    #[command(flatten)]
    pub site: SiteArgs,

    /// Output format
    #[arg(long, short = 'o', value_enum, default_value_t = OutputFormat::Yaml)]
    pub output: OutputFormat,
}

impl RenderCommand {
    pub fn execute(&self) -> anyhow::Result<()> {
        let (_, template) = self.site.build_template()?;

        let rendered = match self.output {
            OutputFormat::Yaml => serde_yaml::to_string(&template)?,
            OutputFormat::Json => serde_json::to_string_pretty(&template)?,
        };
        println!("{}", rendered);

        Ok(())
    }
}

#[derive(Parser, Debug, Clone)]
pub struct InspectCommand {
    #[command(flatten)]
    pub site: SiteArgs,
}

impl InspectCommand {
    pub fn execute(&self) -> anyhow::Result<()> {
        let (wp, template) = self.site.build_template()?;

        let summary = TemplateSummary::from_template(&wp.name_any(), &template);
        println!("{}", TableRenderer::new().render_template(&summary));

        Ok(())
    }
}

#[derive(Parser, Debug, Clone)]
pub struct CrdCommand {}

impl CrdCommand {
    pub fn execute(&self) -> anyhow::Result<()> {
        println!("{}", serde_yaml::to_string(&Wordpress::crd())?);
        Ok(())
    }
}
