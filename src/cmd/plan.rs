use std::path::Path;

use anyhow::{Context, Result};

use bento_import::persist::{ExistingProfile, ImportPlan};
use bento_import::{parse_file, ImportOptions};

use super::output::print_json;

/// Show what an import would write for a user with no blocks and an empty profile.
pub async fn cmd_plan(file: &Path, options: &ImportOptions, columns: i64, pretty: bool) -> Result<()> {
    let result = parse_file(file, options)
        .await
        .with_context(|| format!("failed to import {}", file.display()))?;

    let plan = ImportPlan::build(&result, &ExistingProfile::default(), 0, columns);
    print_json(&plan, pretty)
}
