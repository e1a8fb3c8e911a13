// src/handlers.rs
//
// Linha de comando. Cada subcomando corresponde a uma tela do CRM.

pub mod customers;
pub mod dashboard;
pub mod lookup;
pub mod pipeline;
pub mod records;

use clap::{Parser, Subcommand};

use crate::{common::error::AppError, config::AppState, models::dashboard::AutomationKind, ui::Interaction};

#[derive(Parser, Debug)]
#[command(name = "crm")]
#[command(about = "Cliente de linha de comando do CRM")]
pub struct Cli {
    /// Responde "sim" a todas as confirmações
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// KPIs e alertas
    Dashboard,
    /// Dispara uma automação (score, convert, inactive, renewal)
    Automation { kind: AutomationKind },
    /// Funil de vendas
    #[command(subcommand)]
    Pipeline(pipeline::PipelineCommand),
    /// Clientes, notas, interações e anexos
    #[command(subcommand)]
    Customers(customers::CustomersCommand),
    #[command(subcommand)]
    Deals(records::DealsCommand),
    #[command(subcommand)]
    Activities(records::ActivitiesCommand),
    #[command(subcommand)]
    Contacts(records::ContactsCommand),
    /// Consulta CNPJ ou CEP sem salvar nada
    #[command(subcommand)]
    Lookup(lookup::LookupCommand),
}

pub async fn run(command: Command, state: &AppState, ui: &dyn Interaction) -> Result<(), AppError> {
    match command {
        Command::Dashboard => dashboard::show(state).await,
        Command::Automation { kind } => dashboard::automation(state, kind, ui).await,
        Command::Pipeline(cmd) => pipeline::run(cmd, state, ui).await,
        Command::Customers(cmd) => customers::run(cmd, state, ui).await,
        Command::Deals(cmd) => records::deals(cmd, state, ui).await,
        Command::Activities(cmd) => records::activities(cmd, state, ui).await,
        Command::Contacts(cmd) => records::contacts(cmd, state, ui).await,
        Command::Lookup(cmd) => lookup::run(cmd, state, ui).await,
    }
}
