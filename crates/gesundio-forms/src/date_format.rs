//! Calendar-widget date formats (`MM/dd/yyyy` style) and their strftime
//! equivalents.

use jiff::civil::{Date, DateTime, Time};

pub const DEFAULT_DATE_FORMAT: &str = "MM/dd/yyyy";

/// Appended to a date-only format when the time selector is shown.
const TIME_SUFFIX: &str = " h:mm aa";

/// Translate widget tokens to strftime. Letters outside the known token set
/// are copied through unchanged.
pub fn to_strftime(format: &str) -> String {
    let chars: Vec<char> = format.chars().collect();
    let mut out = String::with_capacity(format.len() + 8);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let mut run = 1;
        while i + run < chars.len() && chars[i + run] == c {
            run += 1;
        }

        let token = match (c, run) {
            ('y', 4) => Some("%Y"),
            ('y', 2) => Some("%y"),
            ('M', 4) => Some("%B"),
            ('M', 3) => Some("%b"),
            ('M', 2) => Some("%m"),
            ('M', 1) => Some("%-m"),
            ('d', 2) => Some("%d"),
            ('d', 1) => Some("%-d"),
            ('H', 2) => Some("%H"),
            ('H', 1) => Some("%-H"),
            ('h', 2) => Some("%I"),
            ('h', 1) => Some("%-I"),
            ('m', 2) => Some("%M"),
            ('s', 2) => Some("%S"),
            ('a', 1 | 2) => Some("%p"),
            _ => None,
        };

        match token {
            Some(t) => out.push_str(t),
            None => {
                for _ in 0..run {
                    if c == '%' {
                        out.push_str("%%");
                    } else {
                        out.push(c);
                    }
                }
            }
        }
        i += run;
    }

    out
}

fn has_time_tokens(format: &str) -> bool {
    format.contains(['H', 'h', 'm', 's'])
}

/// The effective widget format for a field.
pub fn effective_format(format: Option<&str>, show_time_select: bool) -> String {
    let base = format.unwrap_or(DEFAULT_DATE_FORMAT);
    if show_time_select && !has_time_tokens(base) {
        format!("{base}{TIME_SUFFIX}")
    } else {
        base.to_string()
    }
}

/// Render a value the way the control displays it.
pub fn display(value: DateTime, format: &str) -> String {
    value.strftime(&to_strftime(format)).to_string()
}

/// Parse typed input in the widget format. Date-only formats yield midnight.
pub fn parse(input: &str, format: &str) -> Option<DateTime> {
    let pattern = to_strftime(format);
    if has_time_tokens(format) {
        DateTime::strptime(&pattern, input.trim()).ok()
    } else {
        Date::strptime(&pattern, input.trim())
            .ok()
            .map(|d| d.to_datetime(Time::midnight()))
    }
}
