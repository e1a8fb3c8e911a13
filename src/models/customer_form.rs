// src/models/customer_form.rs
//
// Estado tipado do formulário de cliente e do autopreenchimento CNPJ/CEP.

use rust_decimal::Decimal;

use crate::models::{
    crm::{Customer, CustomerDraft, CustomerStatus},
    lookup::{AddressFragment, CEP_DIGITS, CNPJ_DIGITS, RegistryRecord, only_digits},
};

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn non_empty_opt(value: Option<&String>) -> Option<String> {
    value.and_then(|v| non_empty(v))
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub status: CustomerStatus,

    pub cnpj: String,
    pub razao_social: String,
    pub nome_fantasia: String,
    pub porte: String,
    pub natureza_juridica: String,
    pub capital_social: Option<Decimal>,
    pub cep: String,
    pub logradouro: String,
    pub numero: String,
    pub complemento: String,
    pub bairro: String,
    pub municipio: String,
    pub uf: String,
    pub atividade_principal: String,
    pub data_abertura: String,
    pub situacao: String,

    pub categoria: String,
    pub segmento: String,
    pub tags: Vec<String>,
    pub origem: String,
    pub responsavel: String,
    pub observacoes: String,
}

impl CustomerForm {
    pub fn new(status: CustomerStatus) -> Self {
        Self {
            status,
            ..Default::default()
        }
    }

    /// Carrega um cliente existente para edição.
    pub fn from_customer(c: &Customer) -> Self {
        let s = |v: &Option<String>| v.clone().unwrap_or_default();
        Self {
            name: c.name.clone(),
            email: s(&c.email),
            phone: s(&c.phone),
            company: s(&c.company),
            status: c.status,
            cnpj: s(&c.cnpj),
            razao_social: s(&c.razao_social),
            nome_fantasia: s(&c.nome_fantasia),
            porte: s(&c.porte),
            natureza_juridica: s(&c.natureza_juridica),
            capital_social: c.capital_social,
            cep: s(&c.cep),
            logradouro: s(&c.logradouro),
            numero: s(&c.numero),
            complemento: s(&c.complemento),
            bairro: s(&c.bairro),
            municipio: s(&c.municipio),
            uf: s(&c.uf),
            atividade_principal: s(&c.atividade_principal),
            data_abertura: s(&c.data_abertura),
            situacao: s(&c.situacao),
            categoria: s(&c.categoria),
            segmento: s(&c.segmento),
            tags: c.tags.clone(),
            origem: s(&c.origem),
            responsavel: s(&c.responsavel),
            observacoes: s(&c.observacoes),
        }
    }

    pub fn to_draft(&self) -> CustomerDraft {
        CustomerDraft {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: non_empty(&self.phone),
            company: non_empty(&self.company),
            status: self.status,
            cnpj: non_empty(&self.cnpj),
            razao_social: non_empty(&self.razao_social),
            nome_fantasia: non_empty(&self.nome_fantasia),
            porte: non_empty(&self.porte),
            natureza_juridica: non_empty(&self.natureza_juridica),
            capital_social: self.capital_social,
            cep: non_empty(&self.cep),
            logradouro: non_empty(&self.logradouro),
            numero: non_empty(&self.numero),
            complemento: non_empty(&self.complemento),
            bairro: non_empty(&self.bairro),
            municipio: non_empty(&self.municipio),
            uf: non_empty(&self.uf),
            atividade_principal: non_empty(&self.atividade_principal),
            data_abertura: non_empty(&self.data_abertura),
            situacao: non_empty(&self.situacao),
            categoria: non_empty(&self.categoria),
            segmento: non_empty(&self.segmento),
            tags: self.tags.iter().filter_map(|t| non_empty(t)).collect(),
            origem: non_empty(&self.origem),
            responsavel: non_empty(&self.responsavel),
            observacoes: non_empty(&self.observacoes),
        }
    }
}

// --- MERGE DO AUTOPREENCHIMENTO ---

/// Atualização parcial vinda de uma consulta.
/// `None` mantém o valor do formulário; `Some(v)` sobrescreve, mesmo vazio.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub razao_social: Option<String>,
    pub nome_fantasia: Option<String>,
    pub porte: Option<String>,
    pub natureza_juridica: Option<String>,
    pub capital_social: Option<Option<Decimal>>,
    pub cep: Option<String>,
    pub logradouro: Option<String>,
    pub numero: Option<String>,
    pub complemento: Option<String>,
    pub bairro: Option<String>,
    pub municipio: Option<String>,
    pub uf: Option<String>,
    pub atividade_principal: Option<String>,
    pub data_abertura: Option<String>,
    pub situacao: Option<String>,
}

impl CustomerPatch {
    /// Precedência por campo:
    /// - registro e endereço: o valor da consulta sempre vence;
    /// - nome/empresa: nome fantasia, senão razão social, senão mantém;
    /// - e-mail/telefone: só sobrescreve se a consulta trouxe algo.
    pub fn from_registry(r: &RegistryRecord) -> Self {
        let owned = |v: &Option<String>| Some(v.clone().unwrap_or_default());
        let display_name =
            non_empty_opt(r.nome_fantasia.as_ref()).or_else(|| non_empty(&r.razao_social));

        Self {
            name: display_name.clone(),
            company: display_name,
            email: non_empty_opt(r.email.as_ref()),
            phone: non_empty_opt(r.telefone.as_ref()),
            razao_social: Some(r.razao_social.clone()),
            nome_fantasia: owned(&r.nome_fantasia),
            porte: owned(&r.porte),
            natureza_juridica: owned(&r.natureza_juridica),
            capital_social: Some(r.capital_social),
            cep: owned(&r.cep),
            logradouro: owned(&r.logradouro),
            numero: owned(&r.numero),
            complemento: owned(&r.complemento),
            bairro: owned(&r.bairro),
            municipio: owned(&r.municipio),
            uf: owned(&r.uf),
            atividade_principal: owned(&r.atividade_principal),
            data_abertura: owned(&r.data_abertura),
            situacao: owned(&r.situacao),
        }
    }

    /// CEP só mexe no endereço.
    pub fn from_address(a: &AddressFragment) -> Self {
        let owned = |v: &Option<String>| Some(v.clone().unwrap_or_default());
        Self {
            logradouro: owned(&a.logradouro),
            bairro: owned(&a.bairro),
            municipio: owned(&a.municipio),
            uf: owned(&a.uf),
            ..Default::default()
        }
    }

    pub fn apply(self, form: &mut CustomerForm) {
        fn set(target: &mut String, value: Option<String>) {
            if let Some(v) = value {
                *target = v;
            }
        }

        set(&mut form.name, self.name);
        set(&mut form.email, self.email);
        set(&mut form.phone, self.phone);
        set(&mut form.company, self.company);
        set(&mut form.razao_social, self.razao_social);
        set(&mut form.nome_fantasia, self.nome_fantasia);
        set(&mut form.porte, self.porte);
        set(&mut form.natureza_juridica, self.natureza_juridica);
        if let Some(capital) = self.capital_social {
            form.capital_social = capital;
        }
        set(&mut form.cep, self.cep);
        set(&mut form.logradouro, self.logradouro);
        set(&mut form.numero, self.numero);
        set(&mut form.complemento, self.complemento);
        set(&mut form.bairro, self.bairro);
        set(&mut form.municipio, self.municipio);
        set(&mut form.uf, self.uf);
        set(&mut form.atividade_principal, self.atividade_principal);
        set(&mut form.data_abertura, self.data_abertura);
        set(&mut form.situacao, self.situacao);
    }
}

// --- CONSULTAS EM ANDAMENTO ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupField {
    Cnpj,
    Cep,
}

impl LookupField {
    pub fn required_digits(&self) -> usize {
        match self {
            LookupField::Cnpj => CNPJ_DIGITS,
            LookupField::Cep => CEP_DIGITS,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LookupField::Cnpj => "CNPJ",
            LookupField::Cep => "CEP",
        }
    }
}

/// Uma consulta disparada por uma edição. Só vale enquanto for a mais recente
/// do seu campo (última requisição vence).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTicket {
    pub field: LookupField,
    pub key: String,
    seq: u64,
}

#[derive(Debug, Clone, Copy, Default)]
struct LookupSlot {
    seq: u64,
    loading: bool,
}

#[derive(Debug, Clone)]
pub struct CustomerEditor {
    pub form: CustomerForm,
    cnpj: LookupSlot,
    cep: LookupSlot,
}

impl CustomerEditor {
    pub fn new(form: CustomerForm) -> Self {
        Self {
            form,
            cnpj: LookupSlot::default(),
            cep: LookupSlot::default(),
        }
    }

    fn slot(&self, field: LookupField) -> &LookupSlot {
        match field {
            LookupField::Cnpj => &self.cnpj,
            LookupField::Cep => &self.cep,
        }
    }

    fn slot_mut(&mut self, field: LookupField) -> &mut LookupSlot {
        match field {
            LookupField::Cnpj => &mut self.cnpj,
            LookupField::Cep => &mut self.cep,
        }
    }

    /// Grava o texto digitado e, se ele tiver o número exato de dígitos,
    /// devolve o ticket da consulta a disparar. Toda edição invalida as
    /// consultas anteriores do mesmo campo.
    pub fn edit(&mut self, field: LookupField, raw: &str) -> Option<LookupTicket> {
        match field {
            LookupField::Cnpj => self.form.cnpj = raw.to_string(),
            LookupField::Cep => self.form.cep = raw.to_string(),
        }

        let digits = only_digits(raw);
        let slot = self.slot_mut(field);
        slot.seq += 1;
        slot.loading = digits.len() == field.required_digits();

        slot.loading.then(|| LookupTicket {
            field,
            key: digits,
            seq: slot.seq,
        })
    }

    pub fn is_loading(&self, field: LookupField) -> bool {
        self.slot(field).loading
    }

    /// Enquanto houver consulta em voo o formulário não pode ser enviado.
    pub fn can_submit(&self) -> bool {
        !self.cnpj.loading && !self.cep.loading
    }

    pub fn is_current(&self, ticket: &LookupTicket) -> bool {
        self.slot(ticket.field).seq == ticket.seq
    }

    /// Encerra o ticket. `false` se ele já foi superado e o resultado deve ser descartado.
    pub fn settle(&mut self, ticket: &LookupTicket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.slot_mut(ticket.field).loading = false;
        true
    }
}
