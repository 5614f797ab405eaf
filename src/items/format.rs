//! Text formatting for row titles and subtitles.

use chrono::{DateTime, Utc};

/// How much of a transfer date is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
  /// `1/5/24, 3:04 PM`
  Short,
  /// `January 5, 2024 at 3:04 PM`
  Long,
}

pub fn format_date(date: &DateTime<Utc>, style: DateStyle) -> String {
  match style {
    DateStyle::Short => date.format("%-m/%-d/%y, %-I:%M %p").to_string(),
    DateStyle::Long => date.format("%B %-d, %Y at %-I:%M %p").to_string(),
  }
}

fn currency_symbol(code: &str) -> Option<&'static str> {
  match code.to_ascii_uppercase().as_str() {
    "USD" => Some("$"),
    "EUR" => Some("€"),
    "GBP" => Some("£"),
    "JPY" => Some("¥"),
    "BRL" => Some("R$"),
    _ => None,
  }
}

/// Minor unit digits shown for a currency.
fn fraction_digits(code: &str) -> u32 {
  match code.to_ascii_uppercase().as_str() {
    "JPY" | "KRW" => 0,
    _ => 2,
  }
}

/// Formats an amount with the currency's decimals and thousands separators,
/// prefixed by the currency symbol, or by the code when the symbol is unknown.
pub fn format_currency(amount: f64, code: &str) -> String {
  let digits = fraction_digits(code);
  let scale = 10u64.pow(digits);
  let units = (amount.abs() * scale as f64).round() as u64;
  let whole = (units / scale).to_string();

  let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
  for (index, digit) in whole.chars().enumerate() {
    if index > 0 && (whole.len() - index) % 3 == 0 {
      grouped.push(',');
    }
    grouped.push(digit);
  }
  if digits > 0 {
    grouped.push_str(&format!(".{:0width$}", units % scale, width = digits as usize));
  }

  let sign = if amount < 0.0 && units > 0 { "-" } else { "" };
  match currency_symbol(code) {
    Some(symbol) => format!("{sign}{symbol}{grouped}"),
    None => format!("{sign}{} {grouped}", code.to_ascii_uppercase()),
  }
}

/// Hides all but the last four digits of a card number.
pub fn mask_card_number(number: &str) -> String {
  let digits: Vec<char> = number.chars().filter(char::is_ascii_digit).collect();
  if digits.len() < 4 {
    return number.to_string();
  }
  let last_four: String = digits[digits.len() - 4..].iter().collect();
  format!("•••• {last_four}")
}
