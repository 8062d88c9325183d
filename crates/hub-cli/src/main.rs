use anyhow::Result;
use chrono::NaiveDate;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use hub_cli::{
    export_summary, init_logging, run_export, run_submit, ExportArgs, HubConfig, LogConfig,
    LogFormat, SubmitArgs,
};
use hub_model::{AdminIdentity, DocumentKind};
use hub_workflow::TREND_REPORT_CATEGORY;
use std::io::IsTerminal;
use std::path::PathBuf;

fn cli() -> Command {
    Command::new("chemhub")
        .version(hub_cli::VERSION)
        .about("ChemAI Knowledge Hub: document export and admin submissions")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Path to a TOML config file"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("Increase log verbosity (-v info, -vv debug, -vvv trace)"),
        )
        .arg(
            Arg::new("log-format")
                .long("log-format")
                .global(true)
                .default_value("pretty")
                .value_parser(LogFormat::NAMES)
                .help("Log output format"),
        )
        .subcommand(
            Command::new("export")
                .about("Export a JSON catalog as plain-text documents")
                .arg(
                    Arg::new("catalog")
                        .long("catalog")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Catalog file (JSON array of entries)"),
                )
                .arg(
                    Arg::new("kind")
                        .long("kind")
                        .value_parser(DocumentKind::ALL.map(DocumentKind::as_str))
                        .help("Only export entries of this kind"),
                )
                .arg(
                    Arg::new("out")
                        .long("out")
                        .value_parser(value_parser!(PathBuf))
                        .help("Download directory (overrides export.output_dir)"),
                )
                .arg(
                    Arg::new("date")
                        .long("date")
                        .value_parser(parse_date)
                        .help("Date printed in study notes, YYYY-MM-DD (default: today)"),
                ),
        )
        .subcommand(
            Command::new("submit")
                .about("Run one admin submission through the upload workflow")
                .arg(
                    Arg::new("title")
                        .long("title")
                        .required(true)
                        .help("Submission title"),
                )
                .arg(
                    Arg::new("file")
                        .long("file")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("File to upload (PDF, JPG or PNG)"),
                )
                .arg(
                    Arg::new("category")
                        .long("category")
                        .default_value(TREND_REPORT_CATEGORY)
                        .help("Submission category"),
                )
                .arg(
                    Arg::new("admin")
                        .long("admin")
                        .action(ArgAction::SetTrue)
                        .help("Run with admin rights regardless of config"),
                ),
        )
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, hub_export::DATE_FORMAT)
        .map_err(|err| format!("expected YYYY-MM-DD: {err}"))
}

fn log_config(matches: &ArgMatches) -> LogConfig {
    let format = matches
        .get_one::<String>("log-format")
        .and_then(|name| name.parse().ok())
        .unwrap_or_default();
    LogConfig::from_verbosity(matches.get_count("verbose"))
        .with_format(format)
        .with_ansi(std::io::stderr().is_terminal())
}

async fn run(matches: &ArgMatches) -> Result<()> {
    let config = HubConfig::load_or_default(matches.get_one::<PathBuf>("config").map(PathBuf::as_path))?;

    match matches.subcommand() {
        Some(("export", args)) => {
            let kind = args
                .get_one::<String>("kind")
                .map(|kind| kind.parse::<DocumentKind>())
                .transpose()?;
            let export = ExportArgs {
                catalog: args.get_one::<PathBuf>("catalog").cloned().unwrap_or_default(),
                kind,
                out: args.get_one::<PathBuf>("out").cloned(),
                date: args.get_one::<NaiveDate>("date").copied(),
            };
            let docs = run_export(&config, &export)?;
            for doc in &docs {
                if doc.delivered {
                    println!("{}", doc.filename);
                } else {
                    eprintln!("not written: {}", doc.filename);
                }
            }
            println!("{}", export_summary(&docs));
        }
        Some(("submit", args)) => {
            let config = if args.get_flag("admin") {
                config.with_admin(AdminIdentity::admin())
            } else {
                config
            };
            let submit = SubmitArgs {
                title: args.get_one::<String>("title").cloned().unwrap_or_default(),
                file: args.get_one::<PathBuf>("file").cloned().unwrap_or_default(),
                category: args
                    .get_one::<String>("category")
                    .cloned()
                    .unwrap_or_else(|| TREND_REPORT_CATEGORY.to_string()),
            };
            let notification = run_submit(&config, &submit).await?;
            println!("{}", notification.message());
        }
        _ => unreachable!("subcommand is required"),
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    let matches = cli().get_matches();

    if let Err(err) = init_logging(&log_config(&matches)) {
        eprintln!("error: failed to initialize logging: {err}");
        std::process::exit(1);
    }

    if let Err(err) = run(&matches).await {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
