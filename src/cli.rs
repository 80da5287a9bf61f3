use clap::{crate_authors, crate_description, crate_version, Arg, ArgAction, Command};
use std::env;
use std::io::Write;
use std::path::PathBuf;
use std::process::exit;

use desec_sync::common::Result;
use desec_sync::desec::DesecClient;
use desec_sync::jsonfile::read_desired;
use desec_sync::resources::Resource;
use desec_sync::service::DesecSync;
use desec_sync::{Config, Session};

fn default_level() -> Option<log::LevelFilter> {
    env::var("RUST_LOG")
        .is_err()
        .then_some(log::LevelFilter::Info)
}

fn setup_logger() {
    // Adapted from env_logger examples. <3 Systemd support
    match env::var("RUST_LOG_STYLE") {
        Ok(s) if s == "SYSTEMD" => {
            let mut builder = env_logger::Builder::from_default_env();
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "<{}>{}: {}",
                    match record.level() {
                        log::Level::Error => 3,
                        log::Level::Warn => 4,
                        log::Level::Info => 6,
                        log::Level::Debug => 7,
                        log::Level::Trace => 7,
                    },
                    record.target(),
                    record.args()
                )
            });
            if let Some(level) = default_level() {
                builder.filter_level(level);
            }
            builder.init();
        }
        _ => {
            let mut builder = pretty_env_logger::formatted_builder();
            match default_level() {
                Some(level) => builder.filter_level(level),
                None => builder.parse_filters(&env::var("RUST_LOG").unwrap_or_default()),
            };
            builder.init();
        }
    };
}

fn load_config() -> Result<Config> {
    let desec = config::Config::builder()
        .add_source(config::Environment::with_prefix("DESEC").try_parsing(true))
        .build()
        .and_then(|c| c.try_deserialize::<desec_sync::desec::Config>())
        .map_err(|err| {
            desec_sync::common::ConfigSnafu {
                message: err.to_string(),
                prefix: "desec",
            }
            .build()
        })?;
    Ok(Config { desec })
}

fn print_json(value: &impl serde::Serialize) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(err) => tracing::error!(error = err.to_string(), "Failed to encode output"),
    }
}

fn run(session: &Session<DesecClient>, args: &clap::ArgMatches) -> Result<()> {
    if let Some(id) = args.get_one::<String>("import") {
        match session.rrsets().import(id)? {
            Some(rrset) => print_json(&rrset),
            None => tracing::warn!(id, "Record set does not exist"),
        }
    }

    if let Some(id) = args.get_one::<String>("destroy") {
        session.rrsets().delete(id)?;
        tracing::info!(id, "Record set destroyed");
    }

    if let Some(source) = args.get_one::<PathBuf>("sync") {
        let desired = read_desired(source)?;
        let diff = DesecSync::new(session).sync(desired, args.get_flag("dry-run"))?;
        for rrset in diff.create.iter() {
            println!("+ {}", rrset.id());
        }
        for rrset in diff.update.iter() {
            println!("~ {}", rrset.id());
        }
    }

    Ok(())
}

pub(crate) fn main() {
    let cli = Command::new("desec-sync")
        .about(format!(
            "{}\n{} {}",
            crate_description!(),
            "Configuration is managed using DESEC_* environment variables.",
            "See the docs for more information.",
        ))
        .arg(
            Arg::new("check")
                .action(ArgAction::SetTrue)
                .short('t')
                .long("test")
                .help("Check the configuration"),
        )
        .arg(
            Arg::new("dry-run")
                .action(ArgAction::SetTrue)
                .long("dry-run")
                .help("Show changes without applying them"),
        )
        .arg(
            Arg::new("import")
                .long("import")
                .value_name("ID")
                .help("Print the record set with id domain/subname/type"),
        )
        .arg(
            Arg::new("destroy")
                .long("destroy")
                .value_name("ID")
                .help("Delete the record set with id domain/subname/type"),
        )
        .arg(
            Arg::new("sync")
                .long("sync")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Create or update the record sets listed in a JSON file"),
        )
        .version(crate_version!())
        .author(crate_authors!("\n"));

    let args = cli.get_matches();

    setup_logger();

    let session = match load_config().and_then(Config::into_session) {
        Ok(s) => s,
        Err(err) => {
            println!("{err}");
            exit(2);
        }
    };

    if args.get_flag("check") {
        tracing::info!("Configuration is valid.");
        exit(0);
    }

    if let Err(err) = run(&session, &args) {
        tracing::error!(error = err.to_string(), "Failed");
        exit(1);
    }
}
