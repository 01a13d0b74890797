//! The default action: create a project at `<LOCATION>`.
//!
//! Responsibility: turn CLI arguments and config into a recipe and
//! options, call the core create service, and display results. No
//! business logic lives here.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, instrument};

use creator_adapters::{LocalFilesystem, SystemCommandRunner, django_recipe};
use creator_core::{
    application::{CreateOptions, CreatePlan, CreateReport, CreateService, PipelineStep},
    domain::{ExistingPolicy, ProjectRecipe},
    prelude::PipelineObserver,
};

use crate::{
    cli::CreateArgs,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the create action.
///
/// 1. Apply CLI overrides to the loaded config
/// 2. Build the recipe and options
/// 3. `--dry-run`: print the plan and stop
/// 4. Confirm unless `--yes`, quiet or non-interactive
/// 5. Run the pipeline with a progress spinner
#[instrument(skip_all)]
pub fn execute(args: CreateArgs, mut config: AppConfig, output: OutputManager) -> CliResult<()> {
    let location = args.location.clone().ok_or_else(|| CliError::InvalidInput {
        message: "missing LOCATION (the directory to create)".into(),
    })?;

    apply_overrides(&args, &mut config);
    let recipe = django_recipe(&config.recipe_settings()).map_err(|e| CliError::Core(e.into()))?;
    let options = create_options(&args, &config);
    debug!(?options, location = %location.display(), "Create requested");

    let service = CreateService::new(
        Box::new(SystemCommandRunner::new()),
        Box::new(LocalFilesystem::new()),
    );

    let plan = service.plan(&recipe, &location, &options)?;

    if args.dry_run {
        return show_plan(&plan, &output);
    }

    if !args.yes && output.is_interactive() {
        show_plan(&plan, &output)?;
        if !confirm(&format!("Create project at {}?", location.display()))? {
            return Err(CliError::Cancelled);
        }
    }

    output.header(&format!("Creating project at {}", location.display()))?;
    info!(location = %location.display(), "Create started");

    let report = if output.is_interactive() {
        let observer = SpinnerObserver::new(output.supports_color());
        let spinner = observer.bar.clone();
        let result = service
            .with_observer(Box::new(observer))
            .create(&recipe, &location, &options);
        spinner.finish_and_clear();
        result?
    } else {
        service.create(&recipe, &location, &options)?
    };

    show_report(&report, &recipe, &output)
}

fn apply_overrides(args: &CreateArgs, config: &mut AppConfig) {
    if let Some(url) = &args.template_url {
        config.template.url = url.clone();
    }
    if let Some(branch) = &args.branch {
        config.template.branch = branch.clone();
    }
    if let Some(program) = &args.generator {
        config.generator.program = program.clone();
    }
}

fn create_options(args: &CreateArgs, config: &AppConfig) -> CreateOptions {
    CreateOptions {
        existing: if args.allow_existing_empty {
            ExistingPolicy::AllowEmpty
        } else {
            config.project.existing
        },
        keep_on_failure: args.keep_on_failure || config.project.keep_on_failure,
    }
}

// ── UI helpers ────────────────────────────────────────────────────────────────

fn show_plan(plan: &CreatePlan, out: &OutputManager) -> CliResult<()> {
    if out.is_json() {
        out.json(plan)?;
        return Ok(());
    }

    out.header("Plan")?;
    out.print(&format!("  Location: {}", plan.location.display()))?;
    if plan.reuse_existing_directory {
        out.print("  (existing empty directory is reused)")?;
    }
    out.print("  Commands:")?;
    for command in &plan.commands {
        out.detail(command)?;
    }
    out.print(&format!("  Env file: {} -> {}", plan.env_file.0, plan.env_file.1))?;
    out.print("  Patches:")?;
    for patch in &plan.patches {
        out.print(&format!("    {} ({})", patch.name, patch.path))?;
        for edit in &patch.edits {
            out.detail(&format!("  {edit}"))?;
        }
    }
    out.print("")?;
    Ok(())
}

fn show_report(report: &CreateReport, recipe: &ProjectRecipe, out: &OutputManager) -> CliResult<()> {
    if out.is_json() {
        out.json(report)?;
        return Ok(());
    }

    for file in &report.patches.files {
        out.success(&format!(
            "{}: {} edit(s) applied, {} already present",
            file.path,
            file.applied(),
            file.already_applied()
        ))?;
    }
    if !report.env_file_activated {
        out.warning(&format!(
            "{} already existed and was kept; {} left in place",
            recipe.env_file.active, recipe.env_file.example
        ))?;
    }
    out.success(&format!("Project created at {}", report.location.display()))?;

    out.print("")?;
    out.print("Next steps:")?;
    out.print(&format!("  cd {}", report.location.display()))?;
    out.print(&format!("  edit {}", recipe.env_file.active))?;
    out.print("  python manage.py migrate")?;
    Ok(())
}

#[cfg(feature = "interactive")]
fn confirm(prompt: &str) -> CliResult<bool> {
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(true)
        .interact()
        .map_err(|e| CliError::IoError {
            message: "failed to read confirmation input".into(),
            source: std::io::Error::other(e),
        })
}

#[cfg(not(feature = "interactive"))]
fn confirm(_prompt: &str) -> CliResult<bool> {
    Err(CliError::FeatureNotAvailable {
        feature: "interactive",
    })
}

/// Shows the running step on a spinner and keeps finished steps above it.
struct SpinnerObserver {
    bar: ProgressBar,
    color: bool,
}

impl SpinnerObserver {
    fn new(color: bool) -> Self {
        let bar = ProgressBar::new_spinner();
        let template = if color {
            "{spinner:.cyan} {msg}"
        } else {
            "{spinner} {msg}"
        };
        if let Ok(style) = ProgressStyle::default_spinner().template(template) {
            bar.set_style(style);
        }
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar, color }
    }

    fn mark(&self, icon: &str, text: &str) {
        if self.color {
            use owo_colors::OwoColorize;
            self.bar.println(format!("{} {}", icon.green().bold(), text));
        } else {
            self.bar.println(format!("{icon} {text}"));
        }
    }
}

impl PipelineObserver for SpinnerObserver {
    fn step_started(&self, step: &PipelineStep) {
        self.bar.set_message(format!("{step}..."));
    }

    fn step_finished(&self, step: &PipelineStep) {
        if !matches!(step, PipelineStep::Validate | PipelineStep::Cleanup) {
            self.mark("\u{2713}", &step.to_string());
        }
    }

    fn step_skipped(&self, step: &PipelineStep, reason: &str) {
        self.mark("-", &format!("{step} skipped: {reason}"));
    }
}
