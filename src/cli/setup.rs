use crate::cli::SetupArgs;
use crate::config::Config;
use crate::error::ConfigError;
use crate::publish::{create_drive_remote, remote_exists, run_config_wizard, tool_available};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Password};
use tracing::debug;

const DEFAULT_REMOTE: &str = "drive";

pub async fn execute(args: SetupArgs) -> anyhow::Result<()> {
    let path = Config::resolve_path(args.config.as_deref())?;
    let theme = ColorfulTheme::default();

    println!("tess setup\n");
    println!("Config file: {}", path.display());

    // Unreadable or missing configs start from defaults
    let existing = match Config::read(&path) {
        Ok(config) => Some(config),
        Err(ConfigError::NotFound(_)) => None,
        Err(e) => {
            debug!("ignoring existing config: {}", e);
            None
        }
    };
    let has_key = existing
        .as_ref()
        .is_some_and(|c| !c.api_key.trim().is_empty());

    let prompt = if has_key {
        "API key (Enter keeps the existing key)"
    } else {
        "Lattice API key"
    };
    let entered = Password::with_theme(&theme)
        .with_prompt(prompt)
        .allow_empty_password(true)
        .interact()?;

    let current_remote = existing
        .as_ref()
        .and_then(|c| c.rclone_remote.clone())
        .unwrap_or_else(|| DEFAULT_REMOTE.to_string());
    let remote: String = Input::with_theme(&theme)
        .with_prompt("Google Drive (optional): rclone remote name")
        .default(current_remote)
        .interact_text()?;

    let config = merge(existing, &entered, &remote)?;
    config.save(&path)?;
    println!("\n✓ Wrote config to {}", path.display());

    println!("\nNext steps:");
    let remote = config.remote_name(None);
    if !tool_available("rclone") {
        println!(
            "- Optional Drive upload: install rclone (https://rclone.org) and run 'rclone config' to add remote '{}'",
            remote
        );
    } else if remote_exists(&remote).await.unwrap_or(false) {
        println!("- rclone remote '{}' found", remote);
    } else {
        let create = Confirm::with_theme(&theme)
            .with_prompt(format!(
                "rclone remote '{}' not found. Create it now (opens a browser to authorize)?",
                remote
            ))
            .default(true)
            .interact()?;
        if create {
            if let Err(e) = create_drive_remote(&remote).await {
                println!("Automatic creation failed ({}). Launching rclone wizard...", e);
                if let Err(e) = run_config_wizard().await {
                    println!("(rclone config exited with error: {})", e);
                }
            }
        } else {
            println!("- You can create it anytime via: rclone config (choose Storage: drive)");
        }
    }
    if !tool_available("pandoc") {
        println!("- Optional: install pandoc (https://pandoc.org) for DOCX/PDF export");
    }
    println!("- Run 'tess export' to generate a report, or 'tess doctor' to verify your setup");

    Ok(())
}

/// New config from prompt answers; blank answers keep what was there
fn merge(existing: Option<Config>, api_key: &str, remote: &str) -> anyhow::Result<Config> {
    let mut config = existing.unwrap_or_default();

    if !api_key.trim().is_empty() {
        config.api_key = api_key.trim().to_string();
    }
    if config.api_key.trim().is_empty() {
        anyhow::bail!("no API key provided");
    }

    let remote = remote.trim();
    config.rclone_remote = Some(if remote.is_empty() {
        DEFAULT_REMOTE.to_string()
    } else {
        remote.to_string()
    });

    Ok(config)
}
