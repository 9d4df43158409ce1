use crate::config::Config;
use schemars::schema_for;

/// JSON Schema describing `~/.tess/config.toml`
pub fn config_schema() -> anyhow::Result<String> {
    let schema = schema_for!(Config);
    Ok(serde_json::to_string_pretty(&schema)?)
}

pub fn execute() -> anyhow::Result<()> {
    println!("{}", config_schema()?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_lists_config_keys() {
        let schema: serde_json::Value = serde_json::from_str(&config_schema().unwrap()).unwrap();
        let properties = schema["properties"].as_object().unwrap();

        for key in ["api_key", "base_url", "timeout_sec", "review_limit", "rclone_remote"] {
            assert!(properties.contains_key(key), "missing {}", key);
        }
    }
}
