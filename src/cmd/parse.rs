use std::path::Path;

use anyhow::{Context, Result};

use bento_import::{parse_file, ImportOptions};

use super::output::print_json;

pub async fn cmd_parse(file: &Path, options: &ImportOptions, pretty: bool) -> Result<()> {
    let result = parse_file(file, options)
        .await
        .with_context(|| format!("failed to import {}", file.display()))?;

    print_json(&result, pretty)
}
