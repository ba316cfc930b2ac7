//! Validation of raw console answers into typed values.
//!
//! The core never sees raw text; everything the user types goes through one
//! of these parsers first.

use crate::app::shell::MenuChoice;
use crate::core::selection::Selection;

/// Upper bound on how many indices one range may expand to.
const MAX_RANGE: usize = 10_000;

/// Main-menu answer; empty input picks [`MenuChoice::DEFAULT`].
pub fn parse_menu_choice(input: &str) -> Option<MenuChoice> {
    let input = input.trim();
    if input.is_empty() {
        return Some(MenuChoice::DEFAULT);
    }
    input.parse::<u8>().ok().and_then(MenuChoice::from_number)
}

/// Comma-separated indices and inclusive ranges, e.g. `1, 3-5`.
///
/// `0` or an empty answer cancels. Anything unparseable is an error with a
/// short reason suitable for display.
pub fn parse_selection(input: &str) -> Result<Selection, String> {
    let input = input.trim();
    if input.is_empty() || input == "0" {
        return Ok(Selection::Cancel);
    }

    let mut indices = Vec::new();
    for part in input.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        if let Some((lo, hi)) = part.split_once('-') {
            let lo = parse_index(lo)?;
            let hi = parse_index(hi)?;
            if lo > hi {
                return Err(format!("range `{part}` runs backwards"));
            }
            if hi - lo >= MAX_RANGE {
                return Err(format!("range `{part}` is too large"));
            }
            indices.extend(lo..=hi);
        } else {
            indices.push(parse_index(part)?);
        }
    }

    if indices.is_empty() {
        Ok(Selection::Cancel)
    } else {
        Ok(Selection::Indices(indices))
    }
}

fn parse_index(s: &str) -> Result<usize, String> {
    let s = s.trim();
    s.parse::<usize>()
        .map_err(|_| format!("`{s}` is not a number"))
}

/// Yes/no answer; empty input yields `default`.
pub fn parse_confirm(input: &str, default: bool) -> Option<bool> {
    match input.trim().to_lowercase().as_str() {
        "" => Some(default),
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_defaults_and_validates() {
        assert_eq!(parse_menu_choice(""), Some(MenuChoice::BrowseAndMerge));
        assert_eq!(parse_menu_choice(" 2 "), Some(MenuChoice::Import));
        assert_eq!(parse_menu_choice("0"), Some(MenuChoice::Exit));
        assert_eq!(parse_menu_choice("7"), None);
        assert_eq!(parse_menu_choice("one"), None);
    }

    #[test]
    fn selection_lists_and_ranges() {
        assert_eq!(
            parse_selection("3, 1,5-7"),
            Ok(Selection::Indices(vec![3, 1, 5, 6, 7]))
        );
        assert_eq!(parse_selection("2,,"), Ok(Selection::Indices(vec![2])));
    }

    #[test]
    fn selection_cancel_forms() {
        assert_eq!(parse_selection(""), Ok(Selection::Cancel));
        assert_eq!(parse_selection(" 0 "), Ok(Selection::Cancel));
        assert_eq!(parse_selection(" , "), Ok(Selection::Cancel));
    }

    #[test]
    fn selection_rejects_garbage() {
        assert!(parse_selection("a,b").is_err());
        assert!(parse_selection("5-2").is_err());
        assert!(parse_selection("-3").is_err());
        assert!(parse_selection("1-999999").is_err());
    }

    #[test]
    fn confirm_answers() {
        assert_eq!(parse_confirm("", true), Some(true));
        assert_eq!(parse_confirm("N", true), Some(false));
        assert_eq!(parse_confirm("yes", false), Some(true));
        assert_eq!(parse_confirm("maybe", true), None);
    }
}
