//! Company-name extraction from free-text LinkedIn headlines.
//!
//! Headlines embed the employer using one of a few informal conventions:
//! `"Role @ Company"`, `"Role at Company"` or `"Role - Company"`, optionally
//! followed by `" | more text"`. Delimiters are tried in that fixed order and
//! the first one present wins.

/// In-band value for "could not be determined".
pub const NOT_AVAILABLE: &str = "N/A";

/// Extract a company name from a headline, or [`NOT_AVAILABLE`].
///
/// Only the first occurrence of the winning delimiter splits the text; later
/// occurrences stay in the result up to the first `|`. The `" at "` form
/// lowercases the whole headline before splitting, so its result is lowercase.
/// Headlines with none of the delimiters yield [`NOT_AVAILABLE`].
pub fn extract_company(position: Option<&str>) -> String {
    let position = match position {
        Some(p) if !p.is_empty() => p,
        _ => return NOT_AVAILABLE.to_string(),
    };

    if let Some((_, rest)) = position.split_once('@') {
        return before_pipe(rest);
    }

    let lowered = position.to_lowercase();
    if let Some((_, rest)) = lowered.split_once(" at ") {
        return before_pipe(rest);
    }

    if let Some((_, rest)) = position.split_once('-') {
        return before_pipe(rest);
    }

    NOT_AVAILABLE.to_string()
}

/// True when `company` is a usable value rather than the sentinel.
pub fn is_known(company: &str) -> bool {
    company != NOT_AVAILABLE
}

fn before_pipe(text: &str) -> String {
    let head = text.split_once('|').map_or(text, |(head, _)| head);
    head.trim().to_string()
}
