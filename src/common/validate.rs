// Client-side validation helpers. These are UX checks only; the backend
// re-validates everything.

/// Email shape check used before invite/profile requests: one `@`, a
/// non-empty local part, and a dotted domain. No whitespace anywhere.
pub fn is_valid_email(email: &str) -> bool {
    if email.is_empty() || email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Today's date in `YYYY-MM-DD`, the form the backend exchanges deadlines in.
pub fn today_ymd() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

/// Deadlines are fixed-width ISO strings, so lexicographic order is
/// chronological order.
pub fn deadline_in_past(deadline: &str, today: &str) -> bool {
    deadline < today
}

/// `YYYY-MM-DD...` -> `DD.MM.YYYY` for display. Anything malformed is
/// returned unchanged.
pub fn format_date_dmy(date: &str) -> String {
    let head = date.get(..10).unwrap_or(date);
    let parts: Vec<&str> = head.split('-').collect();
    if parts.len() != 3 {
        return date.to_string();
    }
    format!("{}.{}.{}", parts[2], parts[1], parts[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert!(is_valid_email("student@example.com"));
        assert!(is_valid_email("a.b+c@mail.uni.edu"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("no-at-sign.com"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@nodot"));
        assert!(!is_valid_email("user@.com"));
        assert!(!is_valid_email("user name@example.com"));
    }

    #[test]
    fn deadline_comparison_is_chronological() {
        assert!(deadline_in_past("2024-04-30", "2024-05-01"));
        assert!(!deadline_in_past("2024-05-01", "2024-05-01"));
        assert!(!deadline_in_past("2024-12-01", "2024-05-01"));
    }

    #[test]
    fn dmy_formatting() {
        assert_eq!(format_date_dmy("2024-05-07"), "07.05.2024");
        assert_eq!(format_date_dmy("2024-05-07T10:30:00Z"), "07.05.2024");
        assert_eq!(format_date_dmy("garbage"), "garbage");
        assert_eq!(format_date_dmy(""), "");
    }
}
