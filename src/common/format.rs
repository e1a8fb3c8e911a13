// src/common/format.rs
//
// Formatação pt-BR para exibição. Nenhum cálculo de negócio acontece aqui:
// percentuais e totais já chegam prontos do backend.

use chrono::NaiveDateTime;
use rust_decimal::{Decimal, RoundingStrategy};

/// `R$ 1.234,56`
pub fn format_brl(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    format!("{}R$ {},{}", sign, group_thousands(int_part), frac_part)
}

/// Igual ao `toLocaleString('pt-BR')`: até 3 casas, sem zeros à direita.
pub fn format_number(value: Decimal) -> String {
    let rounded = value
        .round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    let text = rounded.abs().to_string();
    match text.split_once('.') {
        Some((int_part, frac_part)) => format!("{}{},{}", sign, group_thousands(int_part), frac_part),
        None => format!("{}{}", sign, group_thousands(&text)),
    }
}

pub fn format_percent(value: Decimal) -> String {
    format!("{}%", format_number(value))
}

pub fn format_date(value: &NaiveDateTime) -> String {
    value.format("%d/%m/%Y").to_string()
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}
