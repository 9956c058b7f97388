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

use super::render::{CrdCommand, InspectCommand, RenderCommand};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "wordpress-kube",
    version,
    about = "Pod template generator for Wordpress sites on Kubernetes",
    long_about = "Renders the Pod templates for a Wordpress site's web deployment and wp-cli jobs"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Print the generated Pod template as YAML or JSON
    Render(RenderCommand),

    /// Summarize init containers, containers and volumes of the Pod template
    Inspect(InspectCommand),

    /// Print the Wordpress CustomResourceDefinition
    Crd(CrdCommand),
}
