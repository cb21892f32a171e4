//! `shacklog` - CLI for logging amateur radio contacts
//!
//! This binary provides the command-line interface: the interactive entry
//! form, one-shot logging, and log/configuration inspection.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use clap::Parser;

use shacklog::cli::{Cli, Command, ConfigCommand, EntryCommand, LogCommand, StatsCommand};
use shacklog::{adif, form, init_logging, Config, Form, LogFile};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone())?;

    // Execute the command; no subcommand means the interactive entry form.
    match cli
        .command
        .unwrap_or_else(|| Command::Entry(EntryCommand::default()))
    {
        Command::Entry(cmd) => handle_entry(&config, &cmd),
        Command::Log(cmd) => handle_log(&config, &cmd),
        Command::Stats(cmd) => handle_stats(&config, &cmd),
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

fn open_log(
    config: &Config,
    override_path: Option<&std::path::Path>,
) -> Result<LogFile, Box<dyn std::error::Error>> {
    let path = override_path.map_or_else(|| config.log_path(), std::path::Path::to_path_buf);
    Ok(LogFile::open(path)?)
}

fn handle_entry(config: &Config, cmd: &EntryCommand) -> Result<(), Box<dyn std::error::Error>> {
    let log = open_log(config, cmd.log.as_deref())?;
    let mut entry_form = Form::new(config);

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    form::run_session(&mut entry_form, &log, &mut stdin.lock(), &mut stdout.lock())?;
    Ok(())
}

fn handle_log(config: &Config, cmd: &LogCommand) -> Result<(), Box<dyn std::error::Error>> {
    let log = open_log(config, cmd.log.as_deref())?;
    let mut entry_form = Form::new(config);

    // Date and time default to now; explicit flags override below.
    entry_form.fill_now();

    entry_form.set("CALL", &cmd.call)?;
    entry_form.set("MODE", &cmd.mode)?;
    if let Some(date) = &cmd.date {
        entry_form.set("QSO_DATE", date)?;
    }
    if let Some(time) = &cmd.time {
        entry_form.set("TIME_ON", time)?;
    }
    if let Some(freq) = &cmd.freq {
        entry_form.set("FREQ", freq)?;
    }
    if let Some(band) = &cmd.band {
        entry_form.set("BAND", band)?;
    }
    if let Some(rst) = &cmd.rst_sent {
        entry_form.set("RST_SENT", rst)?;
    }
    if let Some(rst) = &cmd.rst_rcvd {
        entry_form.set("RST_RCVD", rst)?;
    }
    if let Some(power) = &cmd.power {
        entry_form.set("TX_PWR", power)?;
    }
    if let Some(comment) = &cmd.comment {
        entry_form.set("COMMENT", comment)?;
    }
    for assignment in &cmd.field {
        let Some((name, value)) = assignment.split_once('=') else {
            return Err(format!("--field expects NAME=VALUE, got '{assignment}'").into());
        };
        entry_form.set(name, value)?;
    }

    match entry_form.submit() {
        Ok(qso) => {
            let record = adif::record(&qso);
            log.append(&qso)?;
            println!("Logged: {record}");
            Ok(())
        }
        Err(errors) => {
            for err in errors {
                eprintln!("{err}");
            }
            Err("QSO not logged".into())
        }
    }
}

fn handle_stats(config: &Config, cmd: &StatsCommand) -> Result<(), Box<dyn std::error::Error>> {
    let path = config.log_path();
    if !path.exists() {
        println!("No log file at {}", path.display());
        return Ok(());
    }

    let stats = LogFile::open(&path)?.stats()?;
    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("Log file:  {}", stats.path.display());
        println!("Size:      {} bytes", stats.size_bytes);
        println!("Records:   {}", stats.records);
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[log]");
                println!("  Log file:      {}", config.log_path().display());
                println!();
                println!("[entry]");
                println!("  Bands:         {}", config.entry.bands.join(", "));
                println!("  Modes:         {}", config.entry.modes.join(", "));
                println!();
                if config.custom_fields.is_empty() {
                    println!("No custom fields configured.");
                } else {
                    println!("[custom fields]");
                    for field in &config.custom_fields {
                        println!(
                            "  {:<12} label={:?} kind={:?} uppercase={}",
                            field.field,
                            field.label(),
                            field.kind,
                            field.uppercase
                        );
                    }
                }
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
