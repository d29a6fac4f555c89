use std::fs;

use anyhow::{Context, Result, anyhow, bail};
use camino::Utf8PathBuf;
use tracing::debug;

use crate::cli::{Cli, Command, ConfigCommand, ControllerArgs, ResolveViewArgs, RouteVerb};
use crate::config::{self, Ci4Config, ConfigPathSource, ResolvedConfigPath};
use crate::routes::merge::{MergeOutcome, merge};
use crate::routes::{RouteSpec, parse as route_parse};
use crate::{scaffold, views, workspace};

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        // Config management must work before a config file exists, so it
        // only resolves the path and never requires a successful load.
        Command::Config { ref command } => handle_config(&cli, command.as_ref()),
        ref other => {
            let state = AppState::new(&cli)?;
            handle_with_state(&state, other)
        }
    }
}

fn handle_with_state(state: &AppState, command: &Command) -> Result<()> {
    match command {
        Command::Controller(args) => handle_controller(state, args),
        Command::Model { name } => scaffold::model::create(&state.root, name, state.dry_run),
        Command::Service { name } => scaffold::service::create(&state.root, name, state.dry_run),
        Command::View { name } => {
            scaffold::view::create(&state.root, &state.config, name, state.dry_run)
        }
        Command::Route { verb, path } => handle_route(state, *verb, path),
        Command::ResolveView(args) => handle_resolve_view(state, args),
        Command::Config { .. } => unreachable!("config commands handled earlier"),
    }
}

/// Project root plus the resolved configuration location.
struct ProjectContext {
    root: Utf8PathBuf,
    config_path: ResolvedConfigPath,
}

fn resolve_project(cli: &Cli) -> Result<ProjectContext> {
    if let Some(chdir) = &cli.chdir {
        std::env::set_current_dir(chdir)
            .with_context(|| format!("changing directory to {}", chdir.display()))?;
    }

    let cwd = workspace::current_working_dir()?;
    let root = workspace::find_project_root(&cwd);
    debug!("project root: {root}");

    let explicit = cli
        .config
        .as_ref()
        .map(|path| {
            Utf8PathBuf::from_path_buf(path.clone())
                .map_err(|_| anyhow!("config path is not valid UTF-8"))
        })
        .transpose()?;

    let config_path = config::resolve_path(explicit.as_deref(), &root)?;
    debug!(
        "config: {} ({})",
        config_path.path,
        config_path.source.as_str()
    );

    Ok(ProjectContext { root, config_path })
}

/// Everything a scaffolding or route handler needs.
struct AppState {
    root: Utf8PathBuf,
    config: Ci4Config,
    dry_run: bool,
}

impl AppState {
    fn new(cli: &Cli) -> Result<Self> {
        let project = resolve_project(cli)?;
        let config = config::load_or_default(&project.config_path)?;

        Ok(Self {
            root: project.root,
            config,
            dry_run: cli.dry_run,
        })
    }
}

fn handle_controller(state: &AppState, args: &ControllerArgs) -> Result<()> {
    scaffold::controller::create(&state.root, &args.name, args.resource, state.dry_run)
}

fn handle_route(state: &AppState, verb: RouteVerb, path: &str) -> Result<()> {
    let spec = RouteSpec::parse(verb.into(), path)?;

    let route_file = state.root.join(state.config.route_file());
    if !route_file.exists() {
        bail!("route file not found: {}", route_file);
    }
    let content =
        fs::read_to_string(&route_file).with_context(|| format!("reading {}", route_file))?;

    if let Some(group) = &spec.group {
        let statements = route_parse::parse(&content);
        if let Some(block) = route_parse::find_group(&statements, group) {
            for route in &block.routes {
                debug!(
                    "existing {} route `{}` -> {}",
                    route.verb, route.segment, route.handler
                );
            }
        }
    }

    let merged = merge(&content, &spec);
    match merged.outcome {
        MergeOutcome::AlreadyPresent => {
            println!("Route already present: {} {}", spec.verb, path);
            return Ok(());
        }
        MergeOutcome::InsertedIntoGroup => debug!("inserted into existing group"),
        MergeOutcome::CreatedGroup => debug!("created a new group block"),
        MergeOutcome::AppendedRoute => debug!("appended a standalone route"),
    }

    if state.dry_run {
        println!("  (dry-run) would update {}", route_file);
    } else {
        fs::write(&route_file, merged.text).with_context(|| format!("writing {}", route_file))?;
    }
    println!("Added {} route: {} -> {}", spec.verb, path, spec.handler);
    Ok(())
}

fn handle_resolve_view(state: &AppState, args: &ResolveViewArgs) -> Result<()> {
    if !state.config.view_navigation_enabled() {
        bail!("view navigation is disabled (enable_view_navigation = false)");
    }

    let name = views::extract_view_name(&args.reference)
        .ok_or_else(|| anyhow!("no view reference found in `{}`", args.reference))?;
    let path = views::view_file_path(&state.root, &state.config, &name);

    if args.create {
        if state.dry_run {
            if !path.exists() {
                println!("  (dry-run) would create {}", path);
            }
        } else if views::ensure_view_file(&path, &state.config)? {
            println!("  created {}", path);
        }
    }

    println!("{path}");
    Ok(())
}

fn handle_config(cli: &Cli, command: Option<&ConfigCommand>) -> Result<()> {
    let project = resolve_project(cli)?;

    match command {
        None | Some(ConfigCommand::Show) => {
            let config = config::load_or_default(&project.config_path)?;
            println!(
                "Config from {} ({}):",
                project.config_path.path,
                project.config_path.source.as_str()
            );
            print!("{}", config::format_summary(&config));
            Ok(())
        }
        Some(ConfigCommand::Path) => {
            println!("{}", project.config_path.path);
            Ok(())
        }
        Some(ConfigCommand::Generate { path, force }) => {
            let target = match path {
                Some(path) => Utf8PathBuf::from_path_buf(path.clone())
                    .map_err(|_| anyhow!("target path is not valid UTF-8"))?,
                None => project.root.join(config::PROJECT_CONFIG_FILENAME),
            };
            config::write_example_config(&target, *force)?;
            println!("Wrote example config to {}", target);
            Ok(())
        }
        Some(ConfigCommand::Set { key, value }) => {
            let target = settable_config_path(&project);
            config::set_key(&target, key, value)?;
            println!("Set {} in {}", key, target);
            Ok(())
        }
    }
}

/// `config set` edits the file discovery found; when only the per-user
/// default is in play it creates a project-local file instead, so the
/// change stays with the project.
fn settable_config_path(project: &ProjectContext) -> Utf8PathBuf {
    match project.config_path.source {
        ConfigPathSource::Explicit | ConfigPathSource::Discovered => {
            project.config_path.path.clone()
        }
        ConfigPathSource::HomeDefault => project.root.join(config::PROJECT_CONFIG_FILENAME),
    }
}
