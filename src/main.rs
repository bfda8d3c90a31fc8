use anyhow::Result;
use clap::{Arg, ArgAction, Command};

use hostmon::commands;

fn cli() -> Command {
    Command::new("hostmon")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Sample host CPU, memory, disk, process, network and sensor metrics")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("info")
                .about("Show OS, hostname, user and CPU model")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print as JSON")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("snapshot")
                .about("Take one snapshot of every metric family")
                .arg(
                    Arg::new("top")
                        .short('t')
                        .long("top")
                        .value_name("N")
                        .help("Number of processes to show, highest CPU first")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print as JSON")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("watch")
                .about("Stream snapshots as JSON lines on the sampling schedule")
                .arg(
                    Arg::new("interval")
                        .short('i')
                        .long("interval")
                        .value_name("MS")
                        .help("Base sampling interval in milliseconds (minimum 1000)")
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(
                    Arg::new("count")
                        .short('n')
                        .long("count")
                        .value_name("N")
                        .help("Stop after N lines")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    Arg::new("top")
                        .short('t')
                        .long("top")
                        .value_name("N")
                        .help("Number of processes per line, highest CPU first")
                        .value_parser(clap::value_parser!(usize)),
                ),
        )
        .subcommand(
            Command::new("config")
                .about("Inspect or change persisted settings")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .subcommand(Command::new("show").about("Print the current configuration"))
                .subcommand(Command::new("path").about("Print the configuration file path"))
                .subcommand(
                    Command::new("set-interval")
                        .about("Set the base sampling interval")
                        .arg(
                            Arg::new("ms")
                                .help("Interval in milliseconds")
                                .required(true)
                                .index(1)
                                .value_parser(clap::value_parser!(u64)),
                        ),
                ),
        )
}

fn main() -> Result<()> {
    hostmon::init_logging();

    let matches = cli().get_matches();

    match matches.subcommand() {
        Some(("info", sub_matches)) => commands::info(sub_matches),
        Some(("snapshot", sub_matches)) => commands::snapshot(sub_matches),
        Some(("watch", sub_matches)) => commands::watch(sub_matches),
        Some(("config", sub_matches)) => commands::config::execute(sub_matches),
        _ => Ok(()),
    }
}
