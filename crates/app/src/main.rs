use clap::Parser;
use engine::{Engine, GroupRepository};

use crate::{
    error::{AppError, Result},
    repository::JsonFileRepository,
};

mod error;
mod report;
mod repository;
mod settings;

fn main() -> Result<()> {
    let args = settings::Args::parse();
    let settings = settings::load(&args)?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "splitter={level},engine={level}",
            level = settings.level
        ))
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| AppError::Logging(err.to_string()))?;

    let repository = JsonFileRepository::new(&settings.snapshot);
    tracing::info!("Loading groups from {}...", repository.path().display());
    let mut engine = Engine::builder().groups(repository.load()?).build()?;

    let group_ids = match settings.group.as_deref() {
        Some(wanted) => vec![report::resolve_group(&engine, wanted)?],
        None => engine.groups().iter().map(|group| group.id.clone()).collect(),
    };
    if args.person.is_some() && group_ids.len() != 1 {
        return Err(AppError::Usage(
            "--person needs exactly one group, select it with --group".to_string(),
        ));
    }

    let mut reports = Vec::with_capacity(group_ids.len());
    for group_id in &group_ids {
        reports.push(report::build(&mut engine, group_id, args.person.as_deref())?);
    }

    println!("{}", serde_json::to_string_pretty(&reports)?);
    Ok(())
}
