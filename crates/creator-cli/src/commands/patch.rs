//! `project-creator patch` - re-apply or check the recipe's patches on an
//! existing project.

use tracing::{info, instrument};

use creator_adapters::{LocalFilesystem, django_recipe};
use creator_core::{
    application::PatchService,
    domain::{EditOutcome, PatchSummary},
};

use crate::{
    cli::PatchArgs,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all, fields(project = %args.project_dir.display()))]
pub fn execute(args: PatchArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let mut recipe =
        django_recipe(&config.recipe_settings()).map_err(|e| CliError::Core(e.into()))?;

    if !args.only.is_empty() {
        let names: Vec<String> = args.only.iter().map(|t| t.as_str().to_string()).collect();
        recipe
            .retain_patches(&names)
            .map_err(|e| CliError::Core(e.into()))?;
    }

    let filesystem = LocalFilesystem::new();
    let patcher = PatchService::new(&filesystem);

    let summary = if args.check {
        patcher.check(&args.project_dir, &recipe.patches)?
    } else {
        patcher.apply_all(&args.project_dir, &recipe.patches)?
    };

    show_summary(&summary, args.check, &output)?;

    if args.check && summary.changed() {
        return Err(CliError::PatchCheckFailed {
            pending: summary.applied(),
        });
    }

    info!(
        applied = summary.applied(),
        already_applied = summary.already_applied(),
        check = args.check,
        "Patch command finished"
    );
    Ok(())
}

fn show_summary(summary: &PatchSummary, check: bool, out: &OutputManager) -> CliResult<()> {
    if out.is_json() {
        out.json(summary)?;
        return Ok(());
    }

    for file in &summary.files {
        out.header(&format!("{} ({})", file.path, file.name))?;
        for edit in &file.edits {
            let state = match edit.outcome {
                EditOutcome::Applied if check => "pending",
                EditOutcome::Applied => "applied",
                EditOutcome::AlreadyApplied => "already applied",
            };
            out.detail(&format!("{state:>15}  {}", edit.description))?;
        }
    }

    if !summary.changed() {
        out.success("Project is up to date")?;
    } else if check {
        out.warning(&format!("{} edit(s) pending", summary.applied()))?;
    } else {
        out.success(&format!("{} edit(s) applied", summary.applied()))?;
    }
    Ok(())
}
