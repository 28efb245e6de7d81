use chrono::NaiveDate;

/// Render a `YYYYMMDD` quote date as `YYYY.MM.DD`; anything else is returned unchanged.
pub fn format_quote_date(date: &str) -> String {
    match NaiveDate::parse_from_str(date, "%Y%m%d") {
        Ok(parsed) if date.len() == 8 => parsed.format("%Y.%m.%d").to_string(),
        _ => date.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_compact_dates() {
        assert_eq!(format_quote_date("20180120"), "2018.01.20");
    }

    #[test]
    fn leaves_other_strings_alone() {
        assert_eq!(format_quote_date("2018-01-20"), "2018-01-20");
        assert_eq!(format_quote_date("latest"), "latest");
    }
}
