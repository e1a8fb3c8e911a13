// src/handlers/lookup.rs

use clap::Subcommand;

use crate::{
    common::{error::AppError, format::format_brl},
    config::AppState,
    models::customer_form::{CustomerEditor, CustomerForm, LookupField},
    services::LookupOutcome,
    ui::Interaction,
};

#[derive(Subcommand, Debug)]
pub enum LookupCommand {
    /// Dados da Receita para o CNPJ (com ou sem pontuação)
    Cnpj { cnpj: String },
    /// Endereço do CEP
    Cep { cep: String },
}

pub async fn run(cmd: LookupCommand, state: &AppState, ui: &dyn Interaction) -> Result<(), AppError> {
    let mut editor = CustomerEditor::new(CustomerForm::new(state.config.default_customer_status));
    let service = &state.enrichment_service;

    let (field, outcome) = match &cmd {
        LookupCommand::Cnpj { cnpj } => (LookupField::Cnpj, service.cnpj_changed(&mut editor, cnpj, ui).await),
        LookupCommand::Cep { cep } => (LookupField::Cep, service.cep_changed(&mut editor, cep, ui).await),
    };

    check_outcome(field, outcome)?;
    print_form(&editor.form, field);
    Ok(())
}

fn check_outcome(field: LookupField, outcome: LookupOutcome) -> Result<(), AppError> {
    match outcome {
        LookupOutcome::Applied => Ok(()),
        // a chave digitada não chega a virar consulta
        LookupOutcome::Skipped => Err(AppError::LookupMiss(format!(
            "{} deve ter {} dígitos",
            field.label(),
            field.required_digits()
        ))),
        LookupOutcome::Stale | LookupOutcome::Failed => Err(AppError::LookupMiss(format!(
            "Consulta de {} sem resultado",
            field.label()
        ))),
    }
}

fn print_form(form: &CustomerForm, field: LookupField) {
    let mut rows = vec![
        ("CEP", &form.cep),
        ("Logradouro", &form.logradouro),
        ("Bairro", &form.bairro),
        ("Cidade", &form.municipio),
        ("UF", &form.uf),
    ];
    if field == LookupField::Cnpj {
        let company = [
            ("CNPJ", &form.cnpj),
            ("Nome", &form.name),
            ("Razão social", &form.razao_social),
            ("Nome fantasia", &form.nome_fantasia),
            ("Porte", &form.porte),
            ("Natureza jurídica", &form.natureza_juridica),
            ("Atividade principal", &form.atividade_principal),
            ("Abertura", &form.data_abertura),
            ("Situação", &form.situacao),
            ("Email", &form.email),
            ("Telefone", &form.phone),
            ("Número", &form.numero),
            ("Complemento", &form.complemento),
        ];
        rows.splice(0..0, company);
    }

    for (label, value) in rows {
        if !value.is_empty() {
            println!("{label}: {value}");
        }
    }
    if let Some(capital) = form.capital_social {
        println!("Capital social: {}", format_brl(capital));
    }
}
