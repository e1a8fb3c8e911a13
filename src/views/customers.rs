// src/views/customers.rs

use std::fmt::Write;

use crate::{
    common::format::{format_brl, format_date},
    models::crm::{Attachment, Customer, CustomerStatus, Interaction, Note},
};

pub const CSV_HEADER: [&str; 7] = ["Nome", "Email", "Telefone", "Empresa", "Status", "CNPJ", "Cidade"];

// --- LISTA ---

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerFilter {
    pub search: String,
    pub status: Option<CustomerStatus>,
    /// Comparação exata, como o select de categoria.
    pub categoria: Option<String>,
}

impl CustomerFilter {
    pub fn matches(&self, customer: &Customer) -> bool {
        if let Some(status) = self.status {
            if customer.status != status {
                return false;
            }
        }
        if let Some(categoria) = &self.categoria {
            if customer.categoria.as_ref() != Some(categoria) {
                return false;
            }
        }

        let term = self.search.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }

        let contains = |field: &Option<String>| {
            field
                .as_deref()
                .is_some_and(|v| v.to_lowercase().contains(&term))
        };

        customer.name.to_lowercase().contains(&term)
            || contains(&customer.email)
            || contains(&customer.company)
            || customer
                .cnpj
                .as_deref()
                .is_some_and(|cnpj| cnpj.contains(self.search.trim()))
    }

    /// Mantém a ordem de exibição.
    pub fn apply<'a>(&self, customers: &'a [Customer]) -> Vec<&'a Customer> {
        customers.iter().filter(|c| self.matches(c)).collect()
    }
}

pub fn export_csv(customers: &[&Customer]) -> String {
    let mut lines = Vec::with_capacity(customers.len() + 1);
    lines.push(CSV_HEADER.join(","));

    for c in customers {
        let row = [
            c.name.as_str(),
            c.email.as_deref().unwrap_or(""),
            c.phone.as_deref().unwrap_or(""),
            c.company.as_deref().unwrap_or(""),
            c.status.as_str(),
            c.cnpj.as_deref().unwrap_or(""),
            c.municipio.as_deref().unwrap_or(""),
        ];
        lines.push(row.iter().map(|f| csv_field(f)).collect::<Vec<_>>().join(","));
    }

    lines.join("\n")
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

pub fn render_list(customers: &[&Customer]) -> String {
    if customers.is_empty() {
        return "Nenhum cliente encontrado\n".to_string();
    }

    let mut out = String::new();
    for c in customers {
        let _ = write!(out, "[{}] {} · {}", c.id, c.name, c.status);
        if let Some(email) = &c.email {
            let _ = write!(out, " · {email}");
        }
        if let Some(company) = &c.company {
            let _ = write!(out, " · {company}");
        }
        if let Some(categoria) = &c.categoria {
            let _ = write!(out, " · {categoria}");
        }
        if !c.tags.is_empty() {
            let _ = write!(out, " · #{}", c.tags.join(" #"));
        }
        out.push('\n');
    }
    let _ = writeln!(out, "{} cliente(s)", customers.len());
    out
}

// --- DETALHE ---

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerDetails {
    pub notes: Vec<Note>,
    pub interactions: Vec<Interaction>,
    pub attachments: Vec<Attachment>,
}

impl CustomerDetails {
    /// Fixadas primeiro; dentro de cada grupo a ordem do backend.
    pub fn new(mut notes: Vec<Note>, interactions: Vec<Interaction>, attachments: Vec<Attachment>) -> Self {
        notes.sort_by_key(|n| !n.pinned);
        Self {
            notes,
            interactions,
            attachments,
        }
    }
}

pub fn render_details(customer: &Customer, details: &CustomerDetails) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} [{}] · {}", customer.name, customer.id, customer.status);

    let optional = [
        ("Email", &customer.email),
        ("Telefone", &customer.phone),
        ("Empresa", &customer.company),
        ("CNPJ", &customer.cnpj),
        ("Razão social", &customer.razao_social),
        ("Situação", &customer.situacao),
        ("CEP", &customer.cep),
        ("Cidade", &customer.municipio),
        ("UF", &customer.uf),
        ("Categoria", &customer.categoria),
        ("Segmento", &customer.segmento),
        ("Origem", &customer.origem),
        ("Responsável", &customer.responsavel),
        ("Observações", &customer.observacoes),
    ];
    for (label, value) in optional {
        if let Some(v) = value.as_deref().filter(|v| !v.is_empty()) {
            let _ = writeln!(out, "  {label}: {v}");
        }
    }
    if !customer.tags.is_empty() {
        let _ = writeln!(out, "  Tags: {}", customer.tags.join(", "));
    }
    if let Some(valor) = customer.valor_contrato {
        let _ = writeln!(out, "  Contrato: {}", format_brl(valor));
    }
    if let Some(score) = customer.score {
        let _ = writeln!(out, "  Score: {score}");
    }

    let _ = writeln!(out, "\nNotas ({}):", details.notes.len());
    for note in &details.notes {
        let pin = if note.pinned { "📌 " } else { "" };
        let author = note.author.as_deref().unwrap_or("Sistema");
        let _ = writeln!(out, "  {}[{}] {} ({})", pin, note.id, note.content, author);
    }

    let _ = writeln!(out, "\nInterações ({}):", details.interactions.len());
    for i in &details.interactions {
        let when = i.data.as_ref().map(format_date).unwrap_or_default();
        let _ = writeln!(out, "  [{}] {} · {} {}", i.id, i.tipo, i.titulo, when);
    }

    let _ = writeln!(out, "\nAnexos ({}):", details.attachments.len());
    for a in &details.attachments {
        let size = a.file_size.map(|s| format!(" · {s} bytes")).unwrap_or_default();
        let _ = writeln!(out, "  [{}] {}{}", a.id, a.filename, size);
    }

    out
}
