//! Spanish, weekday-first rendering of dispatch dates.

use jiff::civil::{Date, Weekday};

use super::TimeWindow;

/// Render a date as `jueves 22 de octubre`.
pub fn format_dispatch_date(date: Date) -> String {
    format!(
        "{} {} de {}",
        weekday_name(date.weekday()),
        date.day(),
        month_name(date.month())
    )
}

/// Render a window as `09:00 – 13:00`.
pub fn format_window(window: TimeWindow) -> String {
    format!("{:02}:00 – {:02}:00", window.start_hour, window.end_hour)
}

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Monday => "lunes",
        Weekday::Tuesday => "martes",
        Weekday::Wednesday => "miércoles",
        Weekday::Thursday => "jueves",
        Weekday::Friday => "viernes",
        Weekday::Saturday => "sábado",
        Weekday::Sunday => "domingo",
    }
}

fn month_name(month: i8) -> &'static str {
    match month {
        1 => "enero",
        2 => "febrero",
        3 => "marzo",
        4 => "abril",
        5 => "mayo",
        6 => "junio",
        7 => "julio",
        8 => "agosto",
        9 => "septiembre",
        10 => "octubre",
        11 => "noviembre",
        _ => "diciembre",
    }
}
