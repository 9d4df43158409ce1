use crate::api::{LatticeClient, ReviewSource};
use crate::cli::DoctorArgs;
use crate::config::Config;
use crate::publish::{remote_exists, tool_available};

/// Directories Homebrew-style installs usually land in
const EXPECTED_PATH_DIRS: [&str; 2] = ["/usr/local/bin", "/opt/homebrew/bin"];

fn ok(msg: &str) {
    println!("✓ {}", msg);
}

fn warn(msg: &str) {
    println!("! {}", msg);
}

fn bad(msg: &str) {
    println!("✗ {}", msg);
}

/// Inspect the environment and print diagnostics; returns the process exit code
pub async fn execute(args: DoctorArgs) -> anyhow::Result<i32> {
    let path = match Config::resolve_path(args.config.as_deref()) {
        Ok(path) => path,
        Err(e) => {
            bad(&format!("determine config path: {}", e));
            return Ok(1);
        }
    };

    println!("tess doctor\n");
    println!("Config path: {}", path.display());

    let config = match Config::load(&path) {
        Ok(config) => config,
        Err(e) => {
            bad(&e.to_string());
            println!("Hint: run 'tess setup' to create a config.");
            return Ok(1);
        }
    };
    ok("Loaded config");
    println!("- api_key: {}", mask_api_key(&config.api_key));
    if let Some(remote) = &config.rclone_remote {
        println!("- rclone_remote: {}", remote);
    }

    let mut code = 0;

    match LatticeClient::from_config(&config) {
        Ok(client) => match client.current_user().await {
            Ok(me) if !me.id.trim().is_empty() => {
                ok("Lattice API reachable and token accepted");
                println!("- Current user: {} ({})", me.name, me.email);
            }
            Ok(_) => {
                bad("Lattice API returned no current user");
                code = 1;
            }
            Err(e) => {
                bad(&format!("Lattice API check failed: {}", e));
                println!("- Ensure your key is valid; a missing 'Bearer' prefix is added automatically.");
                code = 1;
            }
        },
        Err(e) => {
            bad(&format!("invalid API settings: {}", e));
            return Ok(1);
        }
    }

    if tool_available("rclone") {
        ok("rclone found");
        if let Some(remote) = &config.rclone_remote {
            match remote_exists(remote).await {
                Ok(true) => ok(&format!("rclone remote '{}' present", remote)),
                Ok(false) => warn(&format!(
                    "rclone remote '{}' not found. Run 'rclone config' and create it (Storage: drive)",
                    remote
                )),
                Err(e) => warn(&format!("could not verify rclone remotes: {}", e)),
            }
        }
    } else {
        warn("rclone not found (Drive upload disabled). Install from https://rclone.org");
    }

    if tool_available("pandoc") {
        ok("pandoc found");
    } else {
        warn("pandoc not found (DOCX/PDF export disabled). Install from https://pandoc.org");
    }

    let path_var = std::env::var("PATH").unwrap_or_default();
    if !path_has_expected_dirs(&path_var) {
        warn("/usr/local/bin or /opt/homebrew/bin not in PATH (Homebrew installs may not be visible)");
    }

    println!("\nAll done. If something looks off, try 'tess setup'.");
    Ok(code)
}

fn path_has_expected_dirs(path_var: &str) -> bool {
    EXPECTED_PATH_DIRS.iter().any(|dir| path_var.contains(dir))
}

/// Keep an auth scheme prefix and the outer four characters, star the rest
pub fn mask_api_key(key: &str) -> String {
    let key = key.trim();
    if key.is_empty() {
        return "(empty)".to_string();
    }

    let (prefix, secret) = match key.split_once(' ') {
        Some((scheme, rest))
            if ["bearer", "basic", "token", "lattice"]
                .contains(&scheme.to_lowercase().as_str()) =>
        {
            (&key[..scheme.len() + 1], rest)
        }
        _ => ("", key),
    };

    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 8 {
        return format!("{}{}", prefix, "*".repeat(chars.len()));
    }

    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}{}{}", prefix, head, "*".repeat(chars.len() - 8), tail)
}
