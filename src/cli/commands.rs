//! Command dispatch

use std::io;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::application::services::NavigatorService;
use crate::application::ApplicationError;
use crate::cli::args::{Cli, Commands, ConfigCommands, ConsentAction};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::{CandidateDetail, Level, NavStep, ViewState};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;
use crate::tree_traits::ToTermTree;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let settings = load_settings(cli)?;
    match &cli.command {
        Some(Commands::Studies) => cmd_studies(&container(cli, settings)?),
        Some(Commands::Cros { study }) => cmd_cros(&container(cli, settings)?, study),
        Some(Commands::Tree { study, cros }) => cmd_tree(&container(cli, settings)?, study, cros),
        Some(Commands::Navigate {
            study,
            cros,
            json,
            steps,
        }) => cmd_navigate(&container(cli, settings)?, study, cros, steps, *json),
        Some(Commands::Detail { study, candidate }) => {
            cmd_detail(&container(cli, settings)?, study, candidate)
        }
        Some(Commands::Consent { candidate, action }) => {
            cmd_consent(&container(cli, settings)?, candidate, action)
        }
        Some(Commands::Config { command }) => cmd_config(command, &settings),
        Some(Commands::Completion { shell }) => {
            cmd_completion(*shell);
            Ok(())
        }
        None => Ok(()),
    }
}

/// Layered settings, then command-line overrides.
fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let cwd = std::env::current_dir().map_err(|e| InfraError::io("get current directory", e))?;
    let mut settings = Settings::load(Some(&cwd))?;
    if let Some(mode) = cli.mode {
        settings.mode = mode;
    }
    if let Some(policy) = cli.miss_policy {
        settings.miss_policy = policy;
    }
    debug!("load_settings: {:?}", settings);
    Ok(settings)
}

fn container(cli: &Cli, settings: Settings) -> CliResult<ServiceContainer> {
    let dataset = cli
        .file
        .clone()
        .or_else(|| settings.data_file.clone())
        .ok_or_else(|| CliError::Usage("no dataset given: pass --file or set data_file".into()))?;
    Ok(ServiceContainer::new(settings, &dataset))
}

/// Navigator with the study opened for `cros`, or for all of its CROs.
fn open_navigator(
    container: &ServiceContainer,
    study: &str,
    cros: &[String],
) -> CliResult<NavigatorService> {
    let mut navigator = container.navigator();
    let cro_ids: Vec<String> = if cros.is_empty() {
        navigator.cros(study)?.into_iter().map(|c| c.id).collect()
    } else {
        cros.to_vec()
    };
    navigator.open(study, &cro_ids)?;
    Ok(navigator)
}

#[instrument(skip(container))]
fn cmd_studies(container: &ServiceContainer) -> CliResult<()> {
    for study in container.navigator().studies()? {
        output::info(&format!("{}\t{}", study.id, study.name));
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_cros(container: &ServiceContainer, study: &str) -> CliResult<()> {
    for cro in container.navigator().cros(study)? {
        output::info(&format!("{}\t{}", cro.id, cro.name));
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_tree(container: &ServiceContainer, study: &str, cros: &[String]) -> CliResult<()> {
    let navigator = open_navigator(container, study, cros)?;
    if let Some(tree) = navigator.controller().tree() {
        output::info(&tree.to_term_tree());
    }
    Ok(())
}

#[instrument(skip(container, steps))]
fn cmd_navigate(
    container: &ServiceContainer,
    study: &str,
    cros: &[String],
    steps: &[NavStep],
    json: bool,
) -> CliResult<()> {
    let mut navigator = open_navigator(container, study, cros)?;
    for step in steps {
        if !step.apply(navigator.controller_mut()) {
            output::warning(&format!("step {} had no effect", step));
        }
    }

    let view = navigator.controller().view();
    if json {
        let rendered = serde_json::to_string_pretty(&view)
            .map_err(|e| InfraError::json("serialize view", e))?;
        output::info(&rendered);
    } else {
        render_view(&view);
    }
    Ok(())
}

fn render_view(view: &ViewState) {
    output::breadcrumbs(&view.breadcrumbs);
    match view.current_step {
        Some(step) => {
            output::action("Step", &step);
            output::children(step.as_str(), view.children(step));
        }
        None => {
            for level in Level::ALL {
                let items = view.children(level);
                if level != Level::Cro && !items.is_empty() {
                    let offset = view.column_offsets[level.depth() - 2];
                    output::action("Offset", &format!("{} {}px", level, offset));
                }
                output::children(level.as_str(), items);
            }
        }
    }
    if let Some(candidate) = &view.detail {
        let detail = CandidateDetail::from(candidate);
        output::header(&detail.header_title());
        output::detail_rows(&detail.rows());
    }
}

#[instrument(skip(container))]
fn cmd_detail(container: &ServiceContainer, study: &str, candidate: &str) -> CliResult<()> {
    let navigator = open_navigator(container, study, &[])?;
    let record = navigator
        .controller()
        .tree()
        .and_then(|t| t.find_candidate(candidate))
        .ok_or_else(|| ApplicationError::CandidateNotFound(candidate.to_string()))?;
    let detail = CandidateDetail::from(record);
    output::header(&detail.header_title());
    output::detail_rows(&detail.rows());
    Ok(())
}

#[instrument(skip(container))]
fn cmd_consent(
    container: &ServiceContainer,
    candidate: &str,
    action: &ConsentAction,
) -> CliResult<()> {
    let consent = container.consent();
    let outcome = match action {
        ConsentAction::Accept => consent.accept(candidate)?,
        ConsentAction::Reject => consent.reject(candidate)?,
        ConsentAction::Set { status } => consent.update(candidate, status)?,
    };
    output::success(&outcome.message);
    Ok(())
}

fn cmd_config(command: &ConfigCommands, settings: &Settings) -> CliResult<()> {
    match command {
        ConfigCommands::Show => output::info(&settings.to_toml()?),
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => output::action("global", &path.display()),
                None => output::action("global", "unavailable"),
            }
            let cwd =
                std::env::current_dir().map_err(|e| InfraError::io("get current directory", e))?;
            output::action("local", &local_config_path(&cwd).display());
        }
    }
    Ok(())
}

fn cmd_completion(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    eprintln!("Generating completion file for {shell:?}...");
    generate(shell, &mut cmd, name, &mut io::stdout());
}
