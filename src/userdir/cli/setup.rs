use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use userdir::form::NewUserForm;
use userdir::model::UserId;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.3.2" for releases, "0.3.2@abc1234 2024-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "userdir", bin_name = "userdir", version = get_version())]
#[command(about = "Browse, search and extend a remote user directory", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,

    /// Read and write config.json in this directory instead of the platform default
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub config_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(flatten)]
    Browse(BrowseCommands),

    #[command(flatten)]
    Manage(ManageCommands),

    #[command(flatten)]
    Misc(MiscCommands),
}

#[derive(Subcommand, Debug)]
pub enum BrowseCommands {
    /// List users as cards
    #[command(alias = "ls", display_order = 1)]
    List {
        /// Only users whose name, email or company contains this text
        #[arg(short, long)]
        search: Option<String>,

        /// Sort key: name, email, company or id
        #[arg(long)]
        sort: Option<String>,

        /// Sort descending
        #[arg(long)]
        desc: bool,
    },

    /// Show every detail of one user
    #[command(alias = "v", display_order = 2)]
    View {
        /// Id of the user
        id: UserId,
    },

    /// Start an interactive session (the default)
    #[command(display_order = 3)]
    Shell,
}

#[derive(Subcommand, Debug)]
pub enum ManageCommands {
    /// Add a user to the directory
    #[command(alias = "a", display_order = 10)]
    Add(AddArgs),
}

#[derive(Subcommand, Debug)]
pub enum MiscCommands {
    /// Get or set configuration
    #[command(display_order = 20)]
    Config {
        /// Configuration key (endpoint, timeout-secs, default-sort)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[derive(Args, Debug, Default)]
pub struct AddArgs {
    #[arg(long, default_value = "")]
    pub name: String,
    #[arg(long, default_value = "")]
    pub username: String,
    #[arg(long, default_value = "")]
    pub email: String,
    #[arg(long, default_value = "")]
    pub phone: String,
    /// Website; https:// is added when no scheme is given
    #[arg(long, default_value = "")]
    pub website: String,
    #[arg(long, default_value = "")]
    pub street: String,
    #[arg(long, default_value = "")]
    pub suite: String,
    #[arg(long, default_value = "")]
    pub city: String,
    #[arg(long, default_value = "")]
    pub zipcode: String,
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub lat: String,
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub lng: String,
    /// Company name
    #[arg(long, default_value = "")]
    pub company: String,
    #[arg(long, default_value = "")]
    pub catch_phrase: String,
    #[arg(long, default_value = "")]
    pub bs: String,
}

impl From<AddArgs> for NewUserForm {
    fn from(args: AddArgs) -> Self {
        NewUserForm {
            name: args.name,
            username: args.username,
            email: args.email,
            phone: args.phone,
            website: args.website,
            street: args.street,
            suite: args.suite,
            city: args.city,
            zipcode: args.zipcode,
            lat: args.lat,
            lng: args.lng,
            company_name: args.company,
            catch_phrase: args.catch_phrase,
            bs: args.bs,
        }
    }
}
