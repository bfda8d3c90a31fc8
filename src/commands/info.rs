use anyhow::Result;
use clap::ArgMatches;
use colored::Colorize;

use crate::core::system_monitor::{Identity, ProcFs};
use crate::core::Config;

pub fn execute(matches: &ArgMatches) -> Result<()> {
    let config = Config::load()?;
    let identity = Identity::probe(&ProcFs::new(&config.proc_root, &config.sys_root));

    if matches.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&identity)?);
        return Ok(());
    }

    println!("{}", "System".cyan().bold());
    println!("  {:<10} {}", "OS:".white(), identity.os);
    println!("  {:<10} {}", "Host:".white(), identity.hostname);
    println!("  {:<10} {}", "User:".white(), identity.username);
    println!("  {:<10} {}", "CPU:".white(), identity.cpu_model);

    Ok(())
}
