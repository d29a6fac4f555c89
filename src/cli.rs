use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::routes::HttpVerb;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "ci4gen",
    version,
    about = "CodeIgniter 4 scaffolding and route tools"
)]
pub struct Cli {
    /// Run as if started in this directory.
    #[arg(short = 'C', long = "chdir")]
    pub chdir: Option<PathBuf>,
    /// Use an explicit config file instead of discovery.
    #[arg(long = "config", global = true)]
    pub config: Option<PathBuf>,
    /// Print what would be written without touching the filesystem.
    #[arg(short = 'n', long = "dry-run", global = true)]
    pub dry_run: bool,
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a controller class under app/Controllers.
    Controller(ControllerArgs),
    /// Create a model class under app/Models.
    Model {
        /// Model name, e.g. `post` or `test/user`.
        name: String,
    },
    /// Create a service class under app/Services.
    Service {
        /// Service name, e.g. `Post` or `Admin/Post`.
        name: String,
    },
    /// Create a view file under the configured views folder.
    View {
        /// View path, e.g. `admin/index` or `home`.
        name: String,
    },
    /// Merge a route declaration into the route file.
    Route {
        #[arg(value_enum)]
        verb: RouteVerb,
        /// Route path, e.g. `blog/list` or `admin/dashboard`.
        path: String,
    },
    /// Resolve a view reference to its file path.
    ResolveView(ResolveViewArgs),
    /// Configuration display, patching, and template generation.
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommand>,
    },
}

#[derive(Args, Debug)]
pub struct ControllerArgs {
    /// Controller name, e.g. `admin/user` or `home`.
    pub name: String,
    /// Generate the full resource-style CRUD controller.
    #[arg(long = "resource", default_value_t = false)]
    pub resource: bool,
}

#[derive(Args, Debug)]
pub struct ResolveViewArgs {
    /// A view name (`admin/index`) or a PHP snippet containing `view('...')`.
    pub reference: String,
    /// Create the view file (and folders) when missing.
    #[arg(long = "create", default_value_t = false)]
    pub create: bool,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    Show,
    Path,
    Generate {
        #[arg()]
        path: Option<PathBuf>,
        #[arg(long = "force", default_value_t = false)]
        force: bool,
    },
    Set {
        key: String,
        value: String,
    },
}

/// Route verbs as spelled on the command line.
#[derive(ValueEnum, Clone, Copy, Debug, Eq, PartialEq)]
pub enum RouteVerb {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl From<RouteVerb> for HttpVerb {
    fn from(verb: RouteVerb) -> Self {
        match verb {
            RouteVerb::Get => HttpVerb::Get,
            RouteVerb::Post => HttpVerb::Post,
            RouteVerb::Put => HttpVerb::Put,
            RouteVerb::Delete => HttpVerb::Delete,
            RouteVerb::Patch => HttpVerb::Patch,
        }
    }
}

/// Helper entry point so `main` can stay minimal.
pub fn parse() -> Cli {
    Cli::parse()
}
