//! Display formatting for cell values: thousands grouping with a comma
//! decimal separator, and `YYYY-MM-DD` -> `DD.MM.YYYY` dates.

/// Parses a displayed number: whitespace (including group separators) is
/// stripped and a comma decimal separator becomes a period.
pub fn parse_decimal(value: &str) -> Option<f64> {
    let cleaned: String = value
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    cleaned.parse().ok()
}

/// Groups the integer digits in clusters of three separated by spaces and
/// reattaches any fractional part after a comma.
///
/// Unparsable input comes back trimmed but otherwise unchanged, so one bad
/// cell can never break a render. The fractional part is the value's
/// canonical decimal form: `"10,50"` collapses to `"10,5"`.
pub fn format_number_with_spaces(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let Some(num) = parse_decimal(trimmed) else {
        return trimmed.to_string();
    };

    let canonical = if num.fract() == 0.0 && num.abs() < 1e15 {
        format!("{}", num as i64)
    } else {
        format!("{num}")
    };

    let (int_part, frac_part) = match canonical.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (canonical.as_str(), None),
    };

    let grouped = group_digits(int_part);

    match frac_part {
        Some(frac) => format!("{grouped},{frac}"),
        None => grouped,
    }
}

fn group_digits(int_part: &str) -> String {
    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int_part),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    for (i, ch) in digits.chars().enumerate() {
        let pos_from_right = digits.len() - i;
        if i > 0 && pos_from_right % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }

    format!("{sign}{grouped}")
}

/// `YYYY-MM-DD` -> `DD.MM.YYYY`; anything of another shape is returned
/// unchanged, empty input stays empty.
pub fn format_date_ru(date_str: &str) -> String {
    if date_str.is_empty() {
        return String::new();
    }

    let parts: Vec<&str> = date_str.split('-').collect();
    match parts.as_slice() {
        [year, month, day] => format!("{day}.{month}.{year}"),
        _ => date_str.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_integers_in_threes() {
        assert_eq!(format_number_with_spaces("1234567"), "1 234 567");
        assert_eq!(format_number_with_spaces("1000"), "1 000");
        assert_eq!(format_number_with_spaces("999"), "999");
        assert_eq!(format_number_with_spaces("-1234567"), "-1 234 567");
    }

    #[test]
    fn keeps_comma_decimal_separator() {
        assert_eq!(format_number_with_spaces("1234567,89"), "1 234 567,89");
        assert_eq!(format_number_with_spaces("10.5"), "10,5");
    }

    #[test]
    fn unparsable_input_passes_through() {
        assert_eq!(format_number_with_spaces("abc"), "abc");
        assert_eq!(format_number_with_spaces("  abc  "), "abc");
        assert_eq!(format_number_with_spaces(""), "");
    }

    #[test]
    fn already_grouped_input_round_trips() {
        assert_eq!(format_number_with_spaces("1 234 567"), "1 234 567");
    }

    #[test]
    fn trailing_zero_fraction_collapses() {
        // Known quirk carried over from the original: canonical decimal form.
        assert_eq!(format_number_with_spaces("10,50"), "10,5");
    }

    #[test]
    fn formats_iso_dates() {
        assert_eq!(format_date_ru("2025-12-08"), "08.12.2025");
        assert_eq!(format_date_ru("not-a-date"), "not-a-date");
        assert_eq!(format_date_ru("2025-12"), "2025-12");
        assert_eq!(format_date_ru(""), "");
    }

    #[test]
    fn parses_displayed_numbers() {
        assert_eq!(parse_decimal("65 350,5"), Some(65350.5));
        assert_eq!(parse_decimal("12"), Some(12.0));
        assert_eq!(parse_decimal("abc"), None);
        assert_eq!(parse_decimal(""), None);
    }
}
