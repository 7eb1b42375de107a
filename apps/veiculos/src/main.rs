use std::{path::PathBuf, sync::Arc};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    Collaborators, HttpVehicleService, ListState, StickySignals, VehiclesListController,
};
use shared::domain::{StateCode, StateRef, Vehicle, VehicleCode, VehicleFilter, VehicleKind};
use tracing_subscriber::EnvFilter;

mod config;
mod console;

use console::{ConsoleDialogs, ConsoleNavigator};

#[derive(Parser, Debug)]
#[command(name = "veiculos", about = "Vehicle and trailer registry")]
struct Cli {
    /// Registry API base url; overrides the settings file and environment.
    #[arg(long)]
    api_url: Option<String>,
    #[arg(long, default_value = "veiculos.toml")]
    config: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List vehicles, optionally filtered.
    List {
        /// Plate prefix.
        #[arg(long)]
        search: Option<String>,
        /// `veiculo` or `reboque`.
        #[arg(long)]
        tipo: Option<String>,
        /// State code.
        #[arg(long)]
        estado: Option<i64>,
        /// Number of pages to load.
        #[arg(long, default_value_t = 1)]
        pages: usize,
    },
    /// Soft-delete a vehicle.
    Delete {
        codigo: i64,
        /// Do not ask for confirmation.
        #[arg(long)]
        yes: bool,
    },
    /// Open the form for a new vehicle.
    New,
    /// Open the form of an existing vehicle.
    Edit { codigo: i64 },
    /// Show what the configured operator may do.
    Permissions,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let mut settings = config::load_settings(&cli.config)?;
    if let Some(api_url) = cli.api_url {
        settings.api_base_url = api_url;
    }

    let service = HttpVehicleService::with_timeout(&settings.api_base_url, settings.request_timeout())
        .with_context(|| format!("cannot use registry url '{}'", settings.api_base_url))?;
    let assume_yes = matches!(cli.command, Command::Delete { yes: true, .. });

    let controller = VehiclesListController::new(
        Collaborators {
            service: Arc::new(service),
            permissions: Arc::new(settings.permission_table()),
            navigator: Arc::new(ConsoleNavigator),
            dialogs: Arc::new(ConsoleDialogs::new(assume_yes)),
            signals: Arc::new(StickySignals::new()),
        },
        settings.controller_options(),
    );

    match cli.command {
        Command::List {
            search,
            tipo,
            estado,
            pages,
        } => {
            let vehicle_kind = match tipo.as_deref() {
                Some(raw) => Some(
                    VehicleKind::parse(raw)
                        .with_context(|| format!("unknown vehicle type '{raw}'"))?,
                ),
                None => None,
            };
            let filter = VehicleFilter {
                vehicle_kind,
                state: estado.map(|code| StateRef::new(StateCode(code))),
            };

            controller.search(search.unwrap_or_default(), filter).await;
            for _ in 1..pages {
                if !controller.can_fetch_more() {
                    break;
                }
                controller.fetch_next_page().await;
            }

            print_listing(&controller.snapshot());
        }
        Command::Delete { codigo, .. } => {
            if !controller.can_delete() {
                bail!("operator is not allowed to delete vehicles");
            }
            let vehicle = Vehicle::new(VehicleCode(codigo), String::new());
            if !controller.request_delete(&vehicle).await {
                bail!("vehicle {codigo} was not deleted");
            }
            println!("{} vehicles remain", controller.snapshot().total_count);
        }
        Command::New => {
            if !controller.can_create() {
                bail!("operator is not allowed to create vehicles");
            }
            controller.create();
        }
        Command::Edit { codigo } => {
            if !controller.can_edit() {
                bail!("operator is not allowed to edit vehicles");
            }
            controller.edit(&Vehicle::new(VehicleCode(codigo), String::new()));
        }
        Command::Permissions => {
            println!("cadastrar={}", controller.can_create());
            println!("editar={}", controller.can_edit());
            println!("apagar={}", controller.can_delete());
        }
    }

    Ok(())
}

fn print_listing(state: &ListState) {
    for vehicle in &state.results {
        let tipo = vehicle
            .tipo
            .and_then(VehicleKind::code)
            .unwrap_or("-");
        let uf = vehicle
            .estado
            .as_ref()
            .and_then(|estado| estado.sigla.as_deref())
            .unwrap_or("--");
        let tara = vehicle
            .tara
            .map(|tara| format!("{tara:.0} kg"))
            .unwrap_or_default();
        println!(
            "{:>8}  {:<8}  {:<8}  {:<2}  {}",
            vehicle.codigo, vehicle.placa, tipo, uf, tara
        );
    }

    let more = if state.can_fetch_more() {
        " (more available)"
    } else {
        ""
    };
    println!("{} of {} vehicles{more}", state.results.len(), state.total_count);
}
