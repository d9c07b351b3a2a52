//! bannerctl - banner resolution and management over PostgreSQL
//!
//! Provides:
//! - Banner lookup for a (tag, feature) pair (`resolve`)
//! - Paginated listing and single-banner inspection (`list`, `show`)
//! - Creation, partial update and deletion (`create`, `update`, `delete`)
//! - Configuration management (`config`)

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

mod commands;
mod config;
mod tracing_setup;

use commands::banner::{CreateArgs, DeleteArgs, ListArgs, ResolveArgs, ShowArgs, UpdateArgs};
use commands::GlobalArgs;

#[derive(Parser, Debug)]
#[command(
    name = "bannerctl",
    author,
    version,
    about = "Resolve and manage feature banners stored in PostgreSQL",
    long_about = "Resolve the banner shown for a tag and feature, and create, list, \
                  patch or delete banners. Output is JSON on stdout; logs go to stderr."
)]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(long, global = true)]
    debug: bool,

    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve the active banner for a tag and feature
    Resolve(ResolveArgs),
    /// List banners for a tag and feature (ordered by id)
    List(ListArgs),
    /// Show a banner by id
    Show(ShowArgs),
    /// Create a banner
    Create(CreateArgs),
    /// Patch a banner; omitted fields keep their values
    Update(UpdateArgs),
    /// Delete a banner by id
    Delete(DeleteArgs),
    /// Manage bannerctl configuration (init, show, path)
    Config(config::ConfigArgs),
    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(Parser, Debug)]
struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    shell: Shell,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)] // PowerShell is a proper noun, not a suffix
enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Before parsing so clap's env fallbacks see .env values
    let dotenv = bannerctl_core::config::load_dotenv();

    let cli = Cli::parse();
    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug }).ok();
    dotenv.log();

    let global = cli.global;
    match cli.command {
        Commands::Resolve(args) => commands::run_resolve(args, &global).await?,
        Commands::List(args) => commands::run_list(args, &global).await?,
        Commands::Show(args) => commands::run_show(args, &global).await?,
        Commands::Create(args) => commands::run_create(args, &global).await?,
        Commands::Update(args) => commands::run_update(args, &global).await?,
        Commands::Delete(args) => commands::run_delete(args, &global).await?,
        Commands::Config(args) => config::run_config(args, &global)?,
        Commands::Completions(args) => run_completions(args)?,
    }
    Ok(())
}

fn run_completions(args: CompletionsArgs) -> Result<()> {
    use clap::CommandFactory;
    use clap_complete::{generate, Shell as CompletionShell};
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();

    let shell = match args.shell {
        Shell::Bash => CompletionShell::Bash,
        Shell::Zsh => CompletionShell::Zsh,
        Shell::Fish => CompletionShell::Fish,
        Shell::PowerShell => CompletionShell::PowerShell,
        Shell::Elvish => CompletionShell::Elvish,
    };

    generate(shell, &mut cmd, bin_name, &mut io::stdout());

    Ok(())
}
