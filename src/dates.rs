use crate::error::ParseError;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Turns a free-text release date into a partial ISO date.
///
/// `"Feb 26th, 1987"` becomes `"1987-02-26"`, `"Feb 1987"` becomes `"1987-02"`
/// and `"1987"` stays `"1987"`. The last token is always the year, the first
/// of the remaining ones is the month, and a token between them is the day.
pub fn normalize(value: &str) -> Result<String, ParseError> {
    let mut tokens: Vec<&str> = value.split_whitespace().collect();

    let year = tokens.pop().ok_or_else(|| ParseError::Date(value.to_string()))?;
    let mut result = year.to_string();

    if tokens.is_empty() {
        return Ok(result);
    }

    let month =
        month_number(tokens.remove(0)).ok_or_else(|| ParseError::Date(value.to_string()))?;
    result.push_str(&format!("-{:02}", month));

    if let Some(day) = tokens.pop() {
        let day = day_number(day).ok_or_else(|| ParseError::Date(value.to_string()))?;
        result.push('-');
        result.push_str(&day);
    }

    Ok(result)
}

fn month_number(abbrev: &str) -> Option<usize> {
    MONTHS.iter().position(|m| *m == abbrev).map(|idx| idx + 1)
}

/// Leading one or two digits of a day token, zero-padded
fn day_number(token: &str) -> Option<String> {
    let digits: String = token.chars().take_while(|c| c.is_ascii_digit()).take(2).collect();
    match digits.len() {
        0 => None,
        1 => Some(format!("0{}", digits)),
        _ => Some(digits),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_only() {
        assert_eq!(normalize("1987").unwrap(), "1987");
    }

    #[test]
    fn test_month_and_year() {
        assert_eq!(normalize("Feb 1987").unwrap(), "1987-02");
        assert_eq!(normalize("Dec 2001").unwrap(), "2001-12");
    }

    #[test]
    fn test_full_date() {
        assert_eq!(normalize("Feb 26th, 1987").unwrap(), "1987-02-26");
        assert_eq!(normalize("Jan 1st, 1990").unwrap(), "1990-01-01");
    }

    #[test]
    fn test_single_digit_day() {
        assert_eq!(normalize("Mar 5th, 1993").unwrap(), "1993-03-05");
        assert_eq!(normalize("Mar 5, 1993").unwrap(), "1993-03-05");
        assert_eq!(normalize("Mar 7 1993").unwrap(), "1993-03-07");
    }

    #[test]
    fn test_extra_whitespace() {
        assert_eq!(normalize("  Aug   3rd,  1995 ").unwrap(), "1995-08-03");
    }

    #[test]
    fn test_unknown_month() {
        assert_eq!(
            normalize("Febr 1987"),
            Err(ParseError::Date("Febr 1987".to_string()))
        );
        assert!(normalize("feb 1987").is_err());
    }

    #[test]
    fn test_day_without_digits() {
        assert!(normalize("Feb th, 1987").is_err());
    }

    #[test]
    fn test_empty() {
        assert!(normalize("").is_err());
        assert!(normalize("   ").is_err());
    }
}
