use crate::config::{CLIENT_ID_ENV, CLIENT_SECRET_ENV, Config};

pub fn cmd_init() -> anyhow::Result<()> {
    if Config::create_default_if_missing()? {
        println!("✓ Config file created. Edit config.toml and run again.");
    } else {
        println!("config.toml already exists, leaving it untouched.");
    }

    println!();
    println!("API credentials are read from the environment (or a .env file):");
    println!("  {CLIENT_ID_ENV}=<client id>");
    println!("  {CLIENT_SECRET_ENV}=<client secret>");
    Ok(())
}
