//! Google Drive access through an rclone remote

use super::tools::{require_tool, run_tool};
use crate::error::PublishError;
use std::path::Path;
use tracing::debug;

/// An rclone remote rooted at one Drive folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Drive {
    remote: String,
    folder_id: String,
}

impl Drive {
    /// Requires rclone on PATH and a non-blank folder id
    pub fn new(remote: impl Into<String>, folder_id: &str) -> Result<Self, PublishError> {
        let folder_id = folder_id.trim();
        if folder_id.is_empty() {
            return Err(PublishError::MissingFolder);
        }
        require_tool("rclone")?;

        Ok(Self {
            remote: remote.into(),
            folder_id: folder_id.to_string(),
        })
    }

    pub fn remote(&self) -> &str {
        &self.remote
    }

    /// Copy `src` to `dest` in the folder and try to fetch a share link.
    ///
    /// A failed link lookup is not an error; it just yields no link.
    pub async fn upload(
        &self,
        src: &Path,
        dest: &str,
        import_format: Option<&str>,
    ) -> Result<Option<String>, PublishError> {
        run_tool("rclone", "copyto", &self.copyto_args(src, dest, import_format)).await?;

        match run_tool("rclone", "link", &self.link_args(dest)).await {
            Ok(out) => {
                let link = out.trim();
                Ok((!link.is_empty()).then(|| link.to_string()))
            }
            Err(e) => {
                debug!("no link for {}: {}", dest, e);
                Ok(None)
            }
        }
    }

    /// Server-side copy of a Drive file into the folder, keeping its name
    pub async fn copy_by_id(&self, file_id: &str) -> Result<(), PublishError> {
        run_tool("rclone", "backend copyid", &self.copyid_args(file_id)).await?;
        Ok(())
    }

    fn target(&self, dest: &str) -> String {
        format!("{}:{}", self.remote, dest)
    }

    fn root_folder_flag(&self) -> String {
        format!("--drive-root-folder-id={}", self.folder_id)
    }

    fn copyto_args(&self, src: &Path, dest: &str, import_format: Option<&str>) -> Vec<String> {
        let mut args = vec![
            "copyto".to_string(),
            src.display().to_string(),
            self.target(dest),
            self.root_folder_flag(),
        ];
        if let Some(format) = import_format.filter(|f| !f.trim().is_empty()) {
            args.push("--drive-import-formats".to_string());
            args.push(format.to_string());
        }
        args
    }

    fn link_args(&self, dest: &str) -> Vec<String> {
        vec![
            "link".to_string(),
            self.target(dest),
            self.root_folder_flag(),
        ]
    }

    fn copyid_args(&self, file_id: &str) -> Vec<String> {
        vec![
            "backend".to_string(),
            "copyid".to_string(),
            format!("{}:", self.remote),
            file_id.to_string(),
            format!("{},root_folder_id={}:", self.remote, self.folder_id),
            "--drive-server-side-across-configs".to_string(),
        ]
    }
}

/// Whether `rclone listremotes` knows a remote called `name`
pub async fn remote_exists(name: &str) -> Result<bool, PublishError> {
    require_tool("rclone")?;
    let out = run_tool("rclone", "listremotes", &["listremotes".to_string()]).await?;
    Ok(list_contains(&out, name))
}

/// Create a Drive remote with `rclone config create`, attached to the
/// terminal so rclone can run its browser authorization
pub async fn create_drive_remote(name: &str) -> Result<(), PublishError> {
    run_attached("config create", &["config", "create", name, "drive", "scope=drive"]).await
}

/// Launch the interactive `rclone config` wizard
pub async fn run_config_wizard() -> Result<(), PublishError> {
    run_attached("config", &["config"]).await
}

async fn run_attached(action: &'static str, args: &[&str]) -> Result<(), PublishError> {
    require_tool("rclone")?;
    let status = tokio::process::Command::new("rclone")
        .args(args)
        .status()
        .await?;

    if !status.success() {
        return Err(PublishError::NonZeroExit {
            tool: "rclone",
            action,
            code: status.code().unwrap_or(-1),
            output: String::new(),
        });
    }
    Ok(())
}

fn list_contains(listing: &str, name: &str) -> bool {
    let target = name.trim();
    !target.is_empty()
        && listing
            .lines()
            .map(|line| line.trim().trim_end_matches(':'))
            .any(|remote| remote == target)
}
