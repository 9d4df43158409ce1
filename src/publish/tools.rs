use crate::error::PublishError;
use tokio::process::Command;
use tracing::debug;

pub fn tool_available(tool: &str) -> bool {
    which::which(tool).is_ok()
}

pub fn require_tool(tool: &'static str) -> Result<(), PublishError> {
    if tool_available(tool) {
        Ok(())
    } else {
        Err(PublishError::ToolMissing { tool })
    }
}

/// Run an external tool and return its combined output.
///
/// A non-zero exit becomes [`PublishError::NonZeroExit`] carrying that output.
pub async fn run_tool(
    tool: &'static str,
    action: &'static str,
    args: &[String],
) -> Result<String, PublishError> {
    debug!("running {} {}", tool, args.join(" "));

    let output = Command::new(tool).args(args).output().await?;

    let mut combined = String::from_utf8_lossy(&output.stdout).to_string();
    combined.push_str(&String::from_utf8_lossy(&output.stderr));

    if !output.status.success() {
        return Err(PublishError::NonZeroExit {
            tool,
            action,
            code: output.status.code().unwrap_or(-1),
            output: combined.trim().to_string(),
        });
    }

    Ok(combined)
}
