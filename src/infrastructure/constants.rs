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

/// Internal ports
pub const INTERNAL_HTTP_PORT: i32 = 8080;
pub const MEDIA_FTP_PORT: i32 = 2121;

/// Filesystem user and group the web server runs as (www-data)
pub const WWW_DATA_USER_ID: i64 = 33;

/// Default auxiliary images
pub const DEFAULT_GIT_CLONE_IMAGE: &str = "docker.io/library/buildpack-deps:stretch-scm";
pub const DEFAULT_RCLONE_IMAGE: &str = "quay.io/presslabs/rclone:latest";

/// Media sync cache
pub const MEDIA_CACHE_MAX_AGE: &str = "30s";

/// Object store remote prefixes
pub const S3_PREFIX: &str = "s3";
pub const GCS_PREFIX: &str = "gs";

/// Volume names
pub const VOLUME_NAME_CODE: &str = "code";
pub const VOLUME_NAME_MEDIA: &str = "media";

/// Mount paths
pub const CODE_SRC_MOUNT_PATH: &str = "/var/run/presslabs.org/code/src";
pub const CONFIG_MOUNT_PATH: &str = "/app/config";

/// Code volume defaults
pub const DEFAULT_CODE_MOUNT_PATH: &str = "/app/web/wp-content";
pub const DEFAULT_CONTENT_SUB_PATH: &str = "wp-content";
pub const DEFAULT_CONFIG_SUB_PATH: &str = "config";

/// Object name suffixes
pub const SECRET_SUFFIX: &str = "-wp";
pub const CODE_PVC_SUFFIX: &str = "-code";
pub const MEDIA_PVC_SUFFIX: &str = "-media";

/// Resource labels
pub const LABEL_NAME: &str = "app.kubernetes.io/name";
pub const LABEL_PART_OF: &str = "app.kubernetes.io/part-of";
pub const LABEL_INSTANCE: &str = "app.kubernetes.io/instance";
pub const LABEL_COMPONENT: &str = "app.kubernetes.io/component";
pub const LABEL_NAME_VALUE: &str = "wordpress";

/// Components
pub const COMPONENT_WEB: &str = "web";
pub const COMPONENT_WP_CLI: &str = "wp-cli";

/// Container names
pub const CONTAINER_NAME_WORDPRESS: &str = "wordpress";
pub const CONTAINER_NAME_WP_CLI: &str = "wp-cli";
pub const CONTAINER_NAME_GIT: &str = "git";
pub const CONTAINER_NAME_INSTALL: &str = "install-wp";
pub const CONTAINER_NAME_RCLONE_INIT: &str = "rclone-init-ftp";
pub const CONTAINER_NAME_RCLONE_FTP: &str = "rclone-ftp";

/// Port names
pub const PORT_NAME_HTTP: &str = "http";

/// Restart policy
pub const RESTART_POLICY_NEVER: &str = "Never";

/// Security context
pub const PROC_MOUNT_DEFAULT: &str = "Default";

/// Install entrypoint
pub const INSTALL_COMMAND: &str = "wp-install";

/// Upload directory created in the bucket before the web server starts
pub const UPLOADS_KEEP_PATH: &str = "wp-content/uploads/.keep";

/// Backend credential names forwarded to the application, keyed by the name
/// the caller uses on the media source.
pub const S3_ENV_ALLOW_LIST: &[(&str, &str)] = &[
    ("AWS_ACCESS_KEY_ID", "AWS_ACCESS_KEY_ID"),
    ("AWS_SECRET_ACCESS_KEY", "AWS_SECRET_ACCESS_KEY"),
    ("AWS_CONFIG_FILE", "AWS_CONFIG_FILE"),
    ("ENDPOINT", "S3_ENDPOINT"),
];

pub const GCS_ENV_ALLOW_LIST: &[(&str, &str)] = &[
    ("GOOGLE_CREDENTIALS", "GOOGLE_CREDENTIALS"),
    (
        "GOOGLE_APPLICATION_CREDENTIALS",
        "GOOGLE_APPLICATION_CREDENTIALS",
    ),
];

pub const GIT_CLONE_SCRIPT: &str = r#"#!/bin/bash
set -e
set -o pipefail

export HOME="$(mktemp -d)"
export GIT_SSH_COMMAND="ssh -o UserKnownHostsFile=$HOME/.ssh/known_hosts -o StrictHostKeyChecking=no"

test -d "$HOME/.ssh" || mkdir "$HOME/.ssh"

if [ ! -z "$SSH_RSA_PRIVATE_KEY" ] ; then
    echo "$SSH_RSA_PRIVATE_KEY" > "$HOME/.ssh/id_rsa"
    chmod 0400 "$HOME/.ssh/id_rsa"
    export GIT_SSH_COMMAND="$GIT_SSH_COMMAND -o IdentityFile=$HOME/.ssh/id_rsa"
fi

if [ -z "$GIT_CLONE_URL" ] ; then
    echo "No \$GIT_CLONE_URL specified" >&2
    exit 1
fi

find "$SRC_DIR" -maxdepth 1 -mindepth 1 -print0 | xargs -0 /bin/rm -rf

set -x
git clone "$GIT_CLONE_URL" "$SRC_DIR"
cd "$SRC_DIR"
git checkout -B "$GIT_CLONE_REF" "$GIT_CLONE_REF"
"#;
