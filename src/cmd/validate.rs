use std::path::Path;

use anyhow::{Context, Result};

use bento_import::{decode_json, validate};

/// Decode a JSON export and run the validation gate.
///
/// Bytes are decoded the same way `parse` decodes them: lossy UTF-8, with a
/// leading byte-order mark ignored.
pub async fn cmd_validate(file: &Path) -> Result<()> {
    let bytes = tokio::fs::read(file)
        .await
        .with_context(|| format!("failed to read {}", file.display()))?;

    let parsed = decode_json(&String::from_utf8_lossy(&bytes))?;
    let shape = validate(&parsed)?;

    println!("✅ Valid export: {} ({} entries)", shape.label(), shape.len());
    Ok(())
}
