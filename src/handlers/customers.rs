// src/handlers/customers.rs

use std::path::PathBuf;

use clap::{Args, Subcommand};
use tracing::info;

use crate::{
    common::error::AppError,
    config::AppState,
    models::{
        crm::{Customer, CustomerStatus},
        customer_form::{CustomerEditor, CustomerForm},
        ids::RecordId,
    },
    services::CustomerService,
    ui::Interaction,
    views::customers::{CustomerFilter, export_csv, render_details, render_list},
};

#[derive(Subcommand, Debug)]
pub enum CustomersCommand {
    List(FilterArgs),
    /// Exporta a lista filtrada em CSV
    Export {
        #[command(flatten)]
        filter: FilterArgs,
        /// Arquivo de saída (padrão: stdout)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Ficha com notas, interações e anexos
    Show { id: RecordId },
    Create(CustomerArgs),
    Update {
        id: RecordId,
        #[command(flatten)]
        fields: CustomerArgs,
    },
    Delete { id: RecordId },
    #[command(subcommand)]
    Note(NoteCommand),
    #[command(subcommand)]
    Interaction(InteractionCommand),
    #[command(subcommand)]
    Attach(AttachCommand),
}

#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// Busca em nome, email, empresa e CNPJ
    #[arg(long, short, default_value = "")]
    pub search: String,
    #[arg(long)]
    pub status: Option<CustomerStatus>,
    /// pequeno, medio, grande...
    #[arg(long)]
    pub categoria: Option<String>,
}

impl From<FilterArgs> for CustomerFilter {
    fn from(args: FilterArgs) -> Self {
        CustomerFilter {
            search: args.search,
            status: args.status,
            categoria: args.categoria,
        }
    }
}

/// Campos informados na linha de comando. CNPJ e CEP disparam o autopreenchimento;
/// os demais campos informados prevalecem sobre ele.
#[derive(Args, Debug, Default)]
pub struct CustomerArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub company: Option<String>,
    #[arg(long)]
    pub status: Option<CustomerStatus>,
    #[arg(long)]
    pub cnpj: Option<String>,
    #[arg(long)]
    pub cep: Option<String>,
    #[arg(long)]
    pub numero: Option<String>,
    #[arg(long)]
    pub complemento: Option<String>,
    #[arg(long)]
    pub categoria: Option<String>,
    #[arg(long)]
    pub segmento: Option<String>,
    /// Pode repetir; substitui as tags atuais
    #[arg(long = "tag")]
    pub tags: Vec<String>,
    /// site, indicacao, linkedin, evento, cold_call...
    #[arg(long)]
    pub origem: Option<String>,
    #[arg(long)]
    pub responsavel: Option<String>,
    #[arg(long)]
    pub observacoes: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum NoteCommand {
    Add {
        customer_id: RecordId,
        content: String,
        #[arg(long)]
        author: Option<String>,
    },
    Delete { note_id: RecordId },
    /// Fixa ou desafixa a nota
    Pin { note_id: RecordId },
}

#[derive(Subcommand, Debug)]
pub enum InteractionCommand {
    Add {
        customer_id: RecordId,
        titulo: String,
        #[arg(long, default_value = "ligacao")]
        tipo: String,
        #[arg(long, default_value = "")]
        descricao: String,
        #[arg(long, default_value = "")]
        responsavel: String,
        #[arg(long, default_value = "")]
        resultado: String,
    },
    Delete { interaction_id: RecordId },
}

#[derive(Subcommand, Debug)]
pub enum AttachCommand {
    Upload { customer_id: RecordId, path: PathBuf },
    Delete { attachment_id: RecordId },
}

pub async fn run(cmd: CustomersCommand, state: &AppState, ui: &dyn Interaction) -> Result<(), AppError> {
    let service = &state.customer_service;

    match cmd {
        CustomersCommand::List(filter) => {
            let all = service.list().await?;
            let filter = CustomerFilter::from(filter);
            print!("{}", render_list(&filter.apply(&all)));
        }
        CustomersCommand::Export { filter, output } => {
            let all = service.list().await?;
            let filter = CustomerFilter::from(filter);
            let visible = filter.apply(&all);
            let csv = export_csv(&visible);
            match output {
                Some(path) => {
                    tokio::fs::write(&path, format!("{csv}\n")).await?;
                    info!("📄 {} cliente(s) exportados para {}", visible.len(), path.display());
                }
                None => println!("{csv}"),
            }
        }
        CustomersCommand::Show { id } => {
            let customer = service.get(&id).await?;
            let details = service.load_details(&id).await?;
            print!("{}", render_details(&customer, &details));
        }
        CustomersCommand::Create(fields) => {
            let editor = CustomerEditor::new(CustomerForm::new(state.config.default_customer_status));
            let customer = fill_and_save(state, None, editor, fields, ui).await?;
            println!("Cliente criado: [{}] {}", customer.id, customer.name);
        }
        CustomersCommand::Update { id, fields } => {
            let current = service.get(&id).await?;
            let editor = CustomerEditor::new(CustomerForm::from_customer(&current));
            let customer = fill_and_save(state, Some(&id), editor, fields, ui).await?;
            println!("Cliente atualizado: [{}] {}", customer.id, customer.name);
        }
        CustomersCommand::Delete { id } => {
            service.delete(&id, ui).await?;
        }
        CustomersCommand::Note(cmd) => note(service, cmd).await?,
        CustomersCommand::Interaction(cmd) => interaction(service, cmd).await?,
        CustomersCommand::Attach(AttachCommand::Upload { customer_id, path }) => {
            let attachment = service.upload_attachment(&customer_id, &path, ui).await?;
            println!("[{}] {}", attachment.id, attachment.filename);
        }
        CustomersCommand::Attach(AttachCommand::Delete { attachment_id }) => {
            service.delete_attachment(&attachment_id).await?;
        }
    }

    Ok(())
}

async fn fill_and_save(
    state: &AppState,
    editing: Option<&RecordId>,
    mut editor: CustomerEditor,
    fields: CustomerArgs,
    ui: &dyn Interaction,
) -> Result<Customer, AppError> {
    if let Some(cnpj) = &fields.cnpj {
        state.enrichment_service.cnpj_changed(&mut editor, cnpj, ui).await;
    }
    if let Some(cep) = &fields.cep {
        state.enrichment_service.cep_changed(&mut editor, cep, ui).await;
    }

    let form = &mut editor.form;
    let overrides = [
        (fields.name, &mut form.name),
        (fields.email, &mut form.email),
        (fields.phone, &mut form.phone),
        (fields.company, &mut form.company),
        (fields.numero, &mut form.numero),
        (fields.complemento, &mut form.complemento),
        (fields.categoria, &mut form.categoria),
        (fields.segmento, &mut form.segmento),
        (fields.origem, &mut form.origem),
        (fields.responsavel, &mut form.responsavel),
        (fields.observacoes, &mut form.observacoes),
    ];
    for (value, slot) in overrides {
        if let Some(value) = value {
            *slot = value;
        }
    }
    if !fields.tags.is_empty() {
        form.tags = fields.tags;
    }
    if let Some(status) = fields.status {
        form.status = status;
    }

    state.customer_service.save(editing, &editor, ui).await
}

async fn note(service: &CustomerService, cmd: NoteCommand) -> Result<(), AppError> {
    match cmd {
        NoteCommand::Add {
            customer_id,
            content,
            author,
        } => match service.add_note(&customer_id, &content, author.as_deref()).await? {
            Some(note) => println!("Nota criada: [{}]", note.id),
            None => println!("Nota vazia ignorada"),
        },
        NoteCommand::Delete { note_id } => service.delete_note(&note_id).await?,
        NoteCommand::Pin { note_id } => {
            let state = service.toggle_pin(&note_id).await?;
            println!("{}", if state.pinned { "📌 Nota fixada" } else { "Nota desafixada" });
        }
    }
    Ok(())
}

async fn interaction(service: &CustomerService, cmd: InteractionCommand) -> Result<(), AppError> {
    match cmd {
        InteractionCommand::Add {
            customer_id,
            titulo,
            tipo,
            descricao,
            responsavel,
            resultado,
        } => {
            let mut draft = CustomerService::interaction_draft(&customer_id, &tipo, &titulo);
            draft.descricao = descricao;
            draft.responsavel = responsavel;
            draft.resultado = resultado;
            match service.add_interaction(draft).await? {
                Some(i) => println!("Interação registrada: [{}]", i.id),
                None => println!("Interação sem título ignorada"),
            }
        }
        InteractionCommand::Delete { interaction_id } => service.delete_interaction(&interaction_id).await?,
    }
    Ok(())
}
