use clap::Parser;
use knigge::{
    literal,
    options::{self, ResolvedOptions, StaticConfig},
    term::Atom,
    Error, InternalResult,
};
use std::{io::Read, path::PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Validate delegation options and print the resolved record.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Module the options belong to, used as the default config key
    #[arg(short, long)]
    consumer: String,

    /// Options literal, e.g. "otp_app: :my_app, warn: false"
    #[arg(short, long, conflicts_with = "file")]
    options: Option<String>,

    /// Read the options literal from a file instead (stdin if neither is given)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Application config entry used to resolve placeholders, as APP:KEY=VALUE
    #[arg(short, long = "env", value_name = "APP:KEY=VALUE")]
    env: Vec<String>,

    /// Print the record as JSON
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn read_source(cli: &Cli) -> InternalResult<String> {
    if let Some(options) = &cli.options {
        return Ok(options.clone());
    }
    if let Some(path) = &cli.file {
        debug!("Reading options from {:?}", path);
        return Ok(std::fs::read_to_string(path)?);
    }
    let mut source = String::new();
    std::io::stdin().read_to_string(&mut source)?;
    Ok(source)
}

fn parse_env(entries: &[String]) -> InternalResult<StaticConfig> {
    let mut config = StaticConfig::new();
    for entry in entries {
        let (path, value) = entry
            .split_once('=')
            .ok_or_else(|| Error::internal(format!("Expected APP:KEY=VALUE, got: {}", entry)))?;
        let (otp_app, key) = path
            .split_once(':')
            .ok_or_else(|| Error::internal(format!("Expected APP:KEY=VALUE, got: {}", entry)))?;
        config.put(otp_app.trim(), key.trim(), literal::parse_term(value)?);
    }
    Ok(config)
}

fn print_record(resolved: &ResolvedOptions) {
    println!("implementation:   {}", resolved.implementation());
    if let Some(behaviour) = resolved.behaviour() {
        println!("behaviour:        {}", behaviour);
    }
    println!("delegate_at:      {}", resolved.delegate_at());
    println!("do_not_delegate:  {}", resolved.do_not_delegate());
    println!("warn:             {}", resolved.warn());
    if let Some(config_key) = resolved.config_key() {
        println!("config_key:       {}", config_key);
    }
    println!("check_if_exists?: {}", resolved.check_if_exists());
}

fn run(cli: &Cli) -> InternalResult<()> {
    let source = read_source(cli)?;
    let raw = literal::parse_options(&source)?;
    debug!("raw options: {}", raw);

    let consumer = Atom::new(cli.consumer.as_str());
    let resolved = options::new(&raw, &consumer)?;
    info!("options valid for {}", consumer);

    if cli.json {
        let json = serde_json::to_string_pretty(&resolved)
            .map_err(|e| Error::internal(format!("Failed to serialize options: {}", e)))?;
        println!("{}", json);
    } else {
        print_record(&resolved);
    }

    if !cli.env.is_empty() {
        let config = parse_env(&cli.env)?;
        let module = resolved.implementation().resolve(&config)?;
        println!("resolved:         {}", module);
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
