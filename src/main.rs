use clap::Parser;
use log::*;
use std::{process, rc::Rc};

use release_note::{
    Orchestrator, OrchestratorConfig, Result,
    cli::Args,
    config::Config,
    forge::{github::Github, manager::ForgeManager},
};

fn initialize_logger(debug: bool) -> Result<()> {
    let filter = if debug {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    };

    let config = simplelog::ConfigBuilder::new()
        .add_filter_allow_str("release_note")
        .build();

    simplelog::TermLogger::init(
        filter,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    Ok(())
}

async fn run(args: Args) -> Result<()> {
    let config = Config::load(args.config.as_deref()).await?;
    let rule = config.classification_rule()?;
    let remote = args.get_remote(&config)?;

    let orchestrator_config = OrchestratorConfig::builder()
        .rule(rule)
        .commit_template(config.commit_template.clone())
        .downloads(config.downloads.clone())
        .owner(remote.owner.clone())
        .repo(remote.repo.clone())
        .dry_run(args.dry_run)
        .build()?;

    let github = Github::new(remote)?;
    let forge = ForgeManager::new(
        Box::new(github.clone()),
        Box::new(github.clone()),
        Box::new(github),
    );

    let orchestrator =
        Orchestrator::new(Rc::new(orchestrator_config), Rc::new(forge))?;

    orchestrator.run(args.tag.as_deref()).await?;

    Ok(())
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();

    initialize_logger(args.debug)?;

    if let Err(err) = run(args).await {
        error!("{err}");
        process::exit(1);
    }

    Ok(())
}
