use {
    anyhow::Result,
    clap::{Args, Parser, Subcommand},
    log::error,
    nuget_publish::config::Config,
};

#[derive(Parser)]
#[command(name = "nuget-publish", about = "NuGet release automation", version)]
struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Resolve versions, publish new packages, tag the commit (default)")]
    Publish,
}

#[derive(Args, Debug)]
pub struct GlobalOptions {
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[tokio::main]
async fn main() {
    if let Err(err) = try_main().await {
        error!("Error: {err}");
        for (i, cause) in err.chain().skip(1).enumerate() {
            error!("  {}: {}", i.saturating_add(1), cause);
        }
        std::process::exit(1);
    }
}

async fn try_main() -> Result<()> {
    let cli = Cli::parse();

    if cli.global.verbose {
        std::env::set_var("RUST_LOG", "debug");
    } else if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let config = Config::from_env();

    match cli.command.unwrap_or(Commands::Publish) {
        Commands::Publish => nuget_publish::commands::publish::run(&config).await?,
    }

    Ok(())
}
