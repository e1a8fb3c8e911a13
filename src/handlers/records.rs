// src/handlers/records.rs
//
// Deals, atividades e contatos: CRUD simples sobre o RecordService.

use chrono::NaiveDate;
use clap::Subcommand;
use rust_decimal::Decimal;

use crate::{
    common::{
        error::AppError,
        format::{format_brl, format_date},
    },
    config::AppState,
    models::{
        crm::{ContactDraft, ContactUpdate},
        ids::RecordId,
        sales::{ActivityDraft, ActivityStatus, ActivityType, ActivityUpdate, DealDraft, DealUpdate},
    },
    ui::Interaction,
};

pub const DEFAULT_STAGE: &str = "Prospecção";

// =========================================================================
//  DEALS
// =========================================================================

#[derive(Subcommand, Debug)]
pub enum DealsCommand {
    List,
    Create {
        title: String,
        customer_id: RecordId,
        #[arg(long, default_value = "0")]
        value: Decimal,
        #[arg(long, default_value = DEFAULT_STAGE)]
        stage: String,
        #[arg(long, default_value_t = 50)]
        probability: u8,
        #[arg(long)]
        description: Option<String>,
        /// AAAA-MM-DD
        #[arg(long)]
        close_date: Option<NaiveDate>,
    },
    /// Edita um deal. O estágio só muda pelo pipeline.
    Update {
        id: RecordId,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        value: Option<Decimal>,
        #[arg(long)]
        probability: Option<u8>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        close_date: Option<NaiveDate>,
    },
    Delete { id: RecordId },
}

pub async fn deals(cmd: DealsCommand, state: &AppState, ui: &dyn Interaction) -> Result<(), AppError> {
    let service = &state.deal_service;

    match cmd {
        DealsCommand::List => {
            for deal in service.list().await? {
                println!(
                    "[{}] {} · {} · {} · {}% · {}",
                    deal.id,
                    deal.title,
                    deal.stage,
                    format_brl(deal.value),
                    deal.probability,
                    deal.status.as_deref().unwrap_or("open")
                );
            }
        }
        DealsCommand::Create {
            title,
            customer_id,
            value,
            stage,
            probability,
            description,
            close_date,
        } => {
            let draft = DealDraft {
                title,
                description,
                value,
                stage,
                customer_id,
                probability,
                expected_close_date: close_date,
            };
            let deal = service.create(&draft).await?;
            println!("Deal criado: [{}] {}", deal.id, deal.title);
        }
        DealsCommand::Update {
            id,
            title,
            value,
            probability,
            description,
            close_date,
        } => {
            let update = DealUpdate {
                title,
                description,
                value,
                probability,
                expected_close_date: close_date,
            };
            let deal = service.update(&id, &update).await?;
            println!("Deal atualizado: [{}] {}", deal.id, deal.title);
        }
        DealsCommand::Delete { id } => {
            service.delete(&id, ui).await?;
        }
    }
    Ok(())
}

// =========================================================================
//  ATIVIDADES
// =========================================================================

#[derive(Subcommand, Debug)]
pub enum ActivitiesCommand {
    List {
        /// Só as pendentes
        #[arg(long)]
        pending: bool,
    },
    Create {
        title: String,
        customer_id: RecordId,
        #[arg(long = "type", default_value = "task")]
        activity_type: ActivityType,
        #[arg(long)]
        deal_id: Option<RecordId>,
        /// AAAA-MM-DD
        #[arg(long)]
        due_date: Option<NaiveDate>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Marca como concluída
    Complete { id: RecordId },
    Delete { id: RecordId },
}

pub async fn activities(cmd: ActivitiesCommand, state: &AppState, ui: &dyn Interaction) -> Result<(), AppError> {
    let service = &state.activity_service;

    match cmd {
        ActivitiesCommand::List { pending } => {
            let all = service.list().await?;
            for a in all.iter().filter(|a| !pending || a.status == ActivityStatus::Pending) {
                let due = a.due_date.as_ref().map(format_date).unwrap_or_default();
                println!("[{}] {} · {} · {} {}", a.id, a.title, a.activity_type, a.status, due);
            }
        }
        ActivitiesCommand::Create {
            title,
            customer_id,
            activity_type,
            deal_id,
            due_date,
            description,
        } => {
            let draft = ActivityDraft {
                title,
                description,
                activity_type,
                status: ActivityStatus::Pending,
                customer_id,
                deal_id,
                due_date,
            };
            let activity = service.create(&draft).await?;
            println!("Atividade criada: [{}] {}", activity.id, activity.title);
        }
        ActivitiesCommand::Complete { id } => {
            let update = ActivityUpdate {
                status: Some(ActivityStatus::Completed),
                ..Default::default()
            };
            let activity = service.update(&id, &update).await?;
            println!("✅ {} concluída", activity.title);
        }
        ActivitiesCommand::Delete { id } => {
            service.delete(&id, ui).await?;
        }
    }
    Ok(())
}

// =========================================================================
//  CONTATOS
// =========================================================================

#[derive(Subcommand, Debug)]
pub enum ContactsCommand {
    List {
        /// Só os contatos deste cliente
        #[arg(long)]
        customer_id: Option<RecordId>,
    },
    Create {
        customer_id: RecordId,
        name: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        position: Option<String>,
    },
    Update {
        id: RecordId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        position: Option<String>,
    },
    Delete { id: RecordId },
}

pub async fn contacts(cmd: ContactsCommand, state: &AppState, ui: &dyn Interaction) -> Result<(), AppError> {
    let service = &state.contact_service;

    match cmd {
        ContactsCommand::List { customer_id } => {
            let all = service.list().await?;
            for c in all
                .iter()
                .filter(|c| customer_id.as_ref().is_none_or(|id| &c.customer_id == id))
            {
                println!(
                    "[{}] {} · {} · {}",
                    c.id,
                    c.name,
                    c.position.as_deref().unwrap_or("-"),
                    c.email.as_deref().unwrap_or("-")
                );
            }
        }
        ContactsCommand::Create {
            customer_id,
            name,
            email,
            phone,
            position,
        } => {
            let draft = ContactDraft {
                name,
                email,
                phone,
                position,
                customer_id,
            };
            let contact = service.create(&draft).await?;
            println!("Contato criado: [{}] {}", contact.id, contact.name);
        }
        ContactsCommand::Update {
            id,
            name,
            email,
            phone,
            position,
        } => {
            let update = ContactUpdate {
                name,
                email,
                phone,
                position,
            };
            let contact = service.update(&id, &update).await?;
            println!("Contato atualizado: [{}] {}", contact.id, contact.name);
        }
        ContactsCommand::Delete { id } => {
            service.delete(&id, ui).await?;
        }
    }
    Ok(())
}
