use std::path::Path;

use tokio::fs;

use crate::{error::Result, types::Script};

/// Load a script from a JSON file, e.g. one written by [`save_script`] and
/// edited by hand.
pub async fn load_script(path: &Path) -> Result<Script> {
    let json_content = fs::read_to_string(path).await?;
    let script: Script = serde_json::from_str(&json_content)?;
    Ok(script.normalized())
}

/// Save a script to a file
pub async fn save_script(script: &Script, path: &Path) -> Result<()> {
    let pretty_json = serde_json::to_string_pretty(script)?;
    fs::write(path, &pretty_json).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn saved_script_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("script.json");
        let script = Script {
            raw: "a\n\nb\n\nc\n\nd".to_string(),
            intro: "a".to_string(),
            main_content: "b".to_string(),
            summary: "c".to_string(),
            cta: "d".to_string(),
            scenes: Vec::new(),
        };

        save_script(&script, &path).await.unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"mainContent\": \"b\""));
        assert_eq!(load_script(&path).await.unwrap(), script);
    }

    #[tokio::test]
    async fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_script(&dir.path().join("none.json")).await.is_err());
    }
}
