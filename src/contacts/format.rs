use std::fmt::Display;
use chrono::{DateTime, TimeZone};

pub const MOBILE_DIGITS: usize = 11;
pub const LANDLINE_DIGITS: usize = 10;

pub fn strip_formatting(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

// Splits an all-digit string into "(AA) B-C" with the given group sizes.
fn format_phone(input: &str, digits: usize, middle: usize) -> String {
    if input.is_empty() {
        return String::new();
    }

    let numbers = strip_formatting(input);
    if numbers.len() != digits {
        return input.to_string();
    }

    let (area, rest) = numbers.split_at(2);
    let (first, last) = rest.split_at(middle);
    format!("({}) {}-{}", area, first, last)
}

/// `11999887766` -> `(11) 99988-7766`. Anything that is not 11 digits
/// is returned unchanged.
pub fn format_mobile(mobile: &str) -> String {
    format_phone(mobile, MOBILE_DIGITS, 5)
}

/// `1133334444` -> `(11) 3333-4444`. Anything that is not 10 digits
/// is returned unchanged.
pub fn format_landline(landline: &str) -> String {
    format_phone(landline, LANDLINE_DIGITS, 4)
}

/// Digits of a phone field as the user types, capped at `max`.
pub fn sanitize_phone_input(input: &str, max: usize) -> String {
    input.chars()
        .filter(|c| c.is_ascii_digit())
        .take(max)
        .collect()
}

pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max).collect();
    out.push_str("...");
    out
}

/// `DD/MM/YYYY`
pub fn format_date<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where Tz::Offset: Display {
    date.format("%d/%m/%Y").to_string()
}

/// `DD/MM/YYYY HH:MM`
pub fn format_date_time<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where Tz::Offset: Display {
    date.format("%d/%m/%Y %H:%M").to_string()
}

fn plural(n: i64, singular: &str, plural: &str) -> String {
    match n {
        1 => format!("{} {} atrás", n, singular),
        _ => format!("{} {} atrás", n, plural),
    }
}

/// How long ago `date` was relative to `now`, in the wording of the
/// contact cards ("3 dias atrás", "agora mesmo").
pub fn elapsed_since<Tz1: TimeZone, Tz2: TimeZone>(date: &DateTime<Tz1>, now: &DateTime<Tz2>) -> String {
    let seconds = now.clone().signed_duration_since(date.clone()).num_seconds();
    let minutes = seconds / 60;
    let hours   = minutes / 60;
    let days    = hours / 24;
    let months  = days / 30;
    let years   = days / 365;

    if years > 0 {
        plural(years, "ano", "anos")
    } else if months > 0 {
        plural(months, "mes", "meses")
    } else if days > 0 {
        plural(days, "dia", "dias")
    } else if hours > 0 {
        plural(hours, "hora", "horas")
    } else if minutes > 0 {
        plural(minutes, "minuto", "minutos")
    } else {
        "agora mesmo".into()
    }
}
