use crate::cli::Cli;
use anyhow::Context;
use clap::Parser;
use section_sync_lib::{read_model_file, BoundaryPattern, SyncConfig, SyncSummary, TargetUpdate};
use similar::TextDiff;
use std::io::{self, Write};

enum OutputMode {
    Write,
    DryRun,
    Diff,
}

impl OutputMode {
    fn from_cli(cli: &Cli) -> Self {
        if cli.diff {
            OutputMode::Diff
        } else if cli.dry_run {
            OutputMode::DryRun
        } else {
            OutputMode::Write
        }
    }
}

pub fn run() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mode = OutputMode::from_cli(&cli);
    let Cli {
        files, boundary, ..
    } = cli;

    // Validation failures are reported but still exit with status 0.
    let config = match SyncConfig::from_paths(files, BoundaryPattern::new(boundary)) {
        Ok(config) => config,
        Err(err) if err.is_validation() => {
            eprintln!("{err}");
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    let summary = sync(&config, &mode)?;
    println!("{summary}");
    Ok(())
}

fn sync(config: &SyncConfig, mode: &OutputMode) -> anyhow::Result<SyncSummary> {
    if !config.boundary.has_placeholder() {
        log::warn!(
            "Boundary '{}' has no {{key}} placeholder; every marker shares the empty key",
            config.boundary
        );
    }

    let model = read_model_file(&config.model, &config.boundary).with_context(|| {
        format!("Failed to read model file: {}", config.model.display())
    })?;

    let mut summary = SyncSummary::default();
    for target in &config.targets {
        let update = TargetUpdate::load(target, &model, &config.boundary)
            .with_context(|| format!("Failed to read target file: {}", target.display()))?;

        finalize_target(mode, &update)?;
        log::info!("{}: {} section(s) replaced", target.display(), update.changes());
        summary.record(update.changes());
    }

    Ok(summary)
}

fn finalize_target(mode: &OutputMode, update: &TargetUpdate) -> anyhow::Result<()> {
    match mode {
        OutputMode::Write => update
            .write()
            .with_context(|| format!("Failed to update target file: {}", update.path.display())),
        OutputMode::DryRun => Ok(()),
        OutputMode::Diff => {
            if !update.is_modified() {
                return Ok(());
            }

            let name = update.path.display();
            let diff_output = TextDiff::from_lines(update.original.as_str(), update.updated())
                .unified_diff()
                .header(&format!("a/{name}"), &format!("b/{name}"))
                .to_string();

            io::stdout().write_all(diff_output.as_bytes())?;
            Ok(())
        }
    }
}
