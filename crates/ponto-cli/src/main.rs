//! ponto - NFC badge-scan attendance relay
//!
//! Reads badge UIDs from a keyboard-emulating NFC reader (one per line on
//! stdin) and relays each scan, enriched with a roster lookup and the
//! theory-day flag, to the attendance-collection endpoint.
//!
//! Crate structure:
//! - `ponto-core` - Shared types, errors and constants
//! - `ponto-config` - Configuration store (JSON document, roster, calendar)
//! - `ponto-hardware` - Scan source, feedback signaler, autostart
//! - `ponto-delivery` - HTTP delivery client
//! - `ponto-engine` - Debounce, classification, roster resolution, intake loop

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::MakeWriterExt;

use ponto_config::ConfigStore;
use ponto_core::OperatingMode;
use ponto_core::constants::WEEKDAY_NAMES;
use ponto_delivery::{AttendanceClient, PayloadMode};
use ponto_engine::Session;
use ponto_hardware::console::StdinScanSource;
use ponto_hardware::{AnyAutostart, AnySignaler, AutostartManager};

/// NFC badge-scan attendance relay
#[derive(Parser, Debug)]
#[command(name = "ponto", version, about)]
struct Args {
    /// Override the collection endpoint URL for this run (not persisted)
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Run unattended: never prompt on the console for registration
    #[arg(short, long)]
    background: bool,

    /// Send the legacy two-field payload without the theory-day flag
    #[arg(long)]
    legacy_payload: bool,

    /// Write a default configuration file and exit
    #[arg(long)]
    create_config: bool,

    /// Add a calendar theory-day override and exit
    #[arg(long, value_name = "DD/MM/YYYY")]
    add_theory_day: Option<String>,

    /// Remove a calendar theory-day override and exit
    #[arg(long, value_name = "DD/MM/YYYY")]
    remove_theory_day: Option<String>,

    /// List configured theory days and exit
    #[arg(long)]
    list_theory_days: bool,

    /// List registered roster entries and exit
    #[arg(long)]
    list_roster: bool,

    /// Register the program to start with the user session and exit
    #[arg(long)]
    install_autostart: bool,

    /// Remove the startup registration and exit
    #[arg(long)]
    uninstall_autostart: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Management commands talk to the operator directly and exit
    if args.create_config {
        let path = ConfigStore::write_default(None)
            .context("não foi possível criar o arquivo de configuração")?;
        println!("Arquivo de configuração criado: {}", path.display());
        return Ok(());
    }

    if let Some(date) = &args.add_theory_day {
        return add_theory_day(date);
    }

    if let Some(date) = &args.remove_theory_day {
        return remove_theory_day(date);
    }

    if args.list_theory_days {
        list_theory_days();
        return Ok(());
    }

    if args.list_roster {
        list_roster();
        return Ok(());
    }

    if args.install_autostart {
        AnyAutostart::detect()
            .install()
            .context("não foi possível instalar a inicialização automática")?;
        println!("Ponto instalado para iniciar com a sessão do usuário.");
        return Ok(());
    }

    if args.uninstall_autostart {
        AnyAutostart::detect()
            .uninstall()
            .context("não foi possível remover a inicialização automática")?;
        println!("Ponto removido da inicialização da sessão do usuário.");
        return Ok(());
    }

    let mut store = ConfigStore::discover();

    init_logging(store.config().log_file.as_deref())?;

    // Single-run override; never written back to the file
    if let Some(endpoint) = args.endpoint {
        store.config_mut().endpoint = endpoint;
    }

    let mode = if args.background {
        OperatingMode::Unattended
    } else {
        OperatingMode::Interactive
    };

    let payload_mode = if args.legacy_payload {
        PayloadMode::Legacy
    } else {
        PayloadMode::Full
    };

    let signaler = AnySignaler::detect();
    let client = AttendanceClient::new(store.config().endpoint.clone(), payload_mode)?;

    info!(
        config_file = %store
            .path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "builtin defaults".to_string()),
        endpoint = %client.endpoint(),
        mode = %mode,
        feedback = %signaler.name(),
        "ponto_started"
    );

    let session = Session::new(store, StdinScanSource::new(), signaler, client, mode);
    session.run().await?;

    info!("ponto_shutdown_complete");
    Ok(())
}

/// Initialize structured logging with configurable level via RUST_LOG.
/// Default: INFO. When a log file is configured, output is teed to it.
fn init_logging(log_file: Option<&Path>) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match log_file {
        Some(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("não foi possível criar o diretório de log {}", parent.display())
                })?;
            }
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| {
                    format!("não foi possível abrir o arquivo de log {}", path.display())
                })?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(std::io::stdout.and(Arc::new(file)))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .init();
        }
    }

    Ok(())
}

fn add_theory_day(date: &str) -> anyhow::Result<()> {
    let mut store = ConfigStore::discover();
    match store.config_mut().add_special_day(date) {
        Ok(true) => {
            store
                .save()
                .context("não foi possível salvar a configuração")?;
            println!("Dia especial de teoria adicionado: {date}");
        }
        Ok(false) => {
            println!("Data {date} já está na lista de dias especiais.");
        }
        Err(e) => {
            anyhow::bail!("data inválida '{date}': {e}. Use o formato dd/mm/yyyy");
        }
    }
    Ok(())
}

fn remove_theory_day(date: &str) -> anyhow::Result<()> {
    let mut store = ConfigStore::discover();
    if store.config_mut().remove_special_day(date) {
        store
            .save()
            .context("não foi possível salvar a configuração")?;
        println!("Dia especial de teoria removido: {date}");
    } else {
        println!("Data {date} não encontrada na lista de dias especiais.");
    }
    Ok(())
}

fn list_theory_days() {
    let store = ConfigStore::discover();
    let config = store.config();

    println!("\n=== Configuração de Dias de Teoria ===");
    println!("\nDias fixos semanais:");
    for &day in &config.dias_teoria {
        match WEEKDAY_NAMES.get(day as usize) {
            // "-feira" only applies to Monday through Friday
            Some(name) if day <= 4 => println!("  - {name}-feira"),
            Some(name) => println!("  - {name}"),
            None => println!("  - dia inválido ({day})"),
        }
    }

    println!("\nDias especiais:");
    if config.dias_especiais_teoria.is_empty() {
        println!("  (nenhum dia especial configurado)");
    } else {
        for date in &config.dias_especiais_teoria {
            println!("  - {date}");
        }
    }
    println!();
}

fn list_roster() {
    let store = ConfigStore::discover();
    let roster = store.config().merged_roster();

    println!("\n=== Alunos cadastrados ===");
    if roster.is_empty() {
        println!("  (nenhum aluno cadastrado)");
    } else {
        for (badge, entry) in &roster {
            match &entry.email {
                Some(email) => println!("  {badge}  {}  <{email}>", entry.nome),
                None => println!("  {badge}  {}", entry.nome),
            }
        }
    }
    println!();
}
