//! `herbtrace` - inspect a store snapshot with the chain engine

mod snapshot;

use anyhow::{bail, Context};
use clap::{value_parser, Arg, ArgMatches, Command};
use herbtrace_engine::{EngineConfig, TraceEngine};
use herbtrace_model::{PackageId, PlantId};
use serde::Serialize;
use snapshot::Snapshot;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn snapshot_arg() -> Arg {
    Arg::new("snapshot")
        .long("snapshot")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("JSON snapshot with plants, packages and traces")
}

fn package_arg() -> Arg {
    Arg::new("package")
        .long("package")
        .value_parser(value_parser!(PackageId))
        .help("Package identifier")
}

fn cli() -> Command {
    Command::new("herbtrace")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Botanical chain-of-custody inspector")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Engine configuration (TOML)"),
        )
        .subcommand(
            Command::new("chain")
                .about("Resolve the traceability chain of a package")
                .arg(snapshot_arg())
                .arg(package_arg().required(true)),
        )
        .subcommand(
            Command::new("assess")
                .about("Adjudicate the quality of a package's members")
                .arg(snapshot_arg())
                .arg(package_arg().required(true)),
        )
        .subcommand(
            Command::new("journey")
                .about("List trace events for a plant or package, oldest first")
                .arg(snapshot_arg())
                .arg(
                    Arg::new("plant")
                        .long("plant")
                        .value_parser(value_parser!(PlantId))
                        .conflicts_with("package")
                        .help("Plant identifier"),
                )
                .arg(package_arg()),
        )
        .subcommand(
            Command::new("scan")
                .about("Decode a scanned label code")
                .arg(Arg::new("code").required(true).help("Code as printed on the label")),
        )
}

fn load_engine(matches: &ArgMatches) -> anyhow::Result<TraceEngine> {
    let config = match matches.get_one::<PathBuf>("config") {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            EngineConfig::from_toml_str(&raw)?
        }
        None => EngineConfig::default(),
    };
    Ok(TraceEngine::new(config)?)
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn load_snapshot(matches: &ArgMatches) -> anyhow::Result<Snapshot> {
    let path = matches
        .get_one::<PathBuf>("snapshot")
        .context("--snapshot is required")?;
    Snapshot::load(path)
}

fn package_id(matches: &ArgMatches) -> anyhow::Result<PackageId> {
    matches
        .get_one::<PackageId>("package")
        .copied()
        .context("--package is required")
}

fn run(matches: &ArgMatches) -> anyhow::Result<()> {
    let (command, sub) = matches.subcommand().context("missing command")?;
    // --config is global, so it is visible on the subcommand's matches
    let engine = load_engine(sub)?;

    match command {
        "chain" => {
            let snapshot = load_snapshot(sub)?;
            let chain =
                engine.resolve_chain(package_id(sub)?, &snapshot.plants, &snapshot.packages)?;
            print_json(&chain)
        }
        "assess" => {
            let snapshot = load_snapshot(sub)?;
            let package_id = package_id(sub)?;
            let package = snapshot
                .packages
                .iter()
                .find(|p| p.id == package_id)
                .with_context(|| format!("package {package_id} not in snapshot"))?;
            let verdict = engine.assess_package_quality(&package.plant_ids, &snapshot.plants);
            print_json(&verdict)
        }
        "journey" => {
            let snapshot = load_snapshot(sub)?;
            let events = if let Some(plant_id) = sub.get_one::<PlantId>("plant") {
                engine.plant_journey(*plant_id, &snapshot.traces)
            } else if let Some(package_id) = sub.get_one::<PackageId>("package") {
                engine.package_journey(*package_id, &snapshot.traces)
            } else {
                bail!("one of --plant or --package is required");
            };
            print_json(&events)
        }
        "scan" => {
            let code = sub.get_one::<String>("code").context("code is required")?;
            print_json(&engine.scan(code)?)
        }
        other => bail!("unknown command: {other}"),
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let matches = cli().get_matches();
    run(&matches)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        cli().debug_assert();
    }

    #[test]
    fn journey_rejects_both_subjects() {
        let plant = PlantId::new().to_string();
        let package = PackageId::new().to_string();
        let result = cli().try_get_matches_from([
            "herbtrace",
            "journey",
            "--snapshot",
            "s.json",
            "--plant",
            plant.as_str(),
            "--package",
            package.as_str(),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn scan_reports_foreign_codes() {
        let matches = cli().try_get_matches_from(["herbtrace", "scan", "LOT-42"]).unwrap();
        let err = run(&matches).unwrap_err();
        assert!(err.to_string().contains("unknown code prefix"));
    }

    #[test]
    fn chain_and_assess_run_against_snapshot() {
        let plants = vec![herbtrace_test_utils::plant_with_results(&[true])];
        let package = herbtrace_test_utils::package_all(&plants);
        let id = package.id.to_string();
        let snapshot = Snapshot {
            plants,
            packages: vec![package],
            traces: Vec::new(),
        };
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), serde_json::to_vec(&snapshot).unwrap()).unwrap();
        let path = file.path().to_string_lossy().into_owned();

        for command in ["chain", "assess"] {
            let matches = cli()
                .try_get_matches_from([
                    "herbtrace",
                    command,
                    "--snapshot",
                    path.as_str(),
                    "--package",
                    id.as_str(),
                ])
                .unwrap();
            run(&matches).unwrap();
        }
    }

    #[test]
    fn package_ids_are_parsed() {
        let id = PackageId::new();
        let raw = id.to_string();
        let matches = cli()
            .try_get_matches_from([
                "herbtrace",
                "chain",
                "--snapshot",
                "s.json",
                "--package",
                raw.as_str(),
            ])
            .unwrap();
        let (_, sub) = matches.subcommand().unwrap();
        assert_eq!(package_id(sub).unwrap(), id);
    }
}
