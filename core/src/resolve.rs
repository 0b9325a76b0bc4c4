//! Option table lookup.
//!
//! Linear scans over the caller's table. Matching is exact and
//! case-sensitive; when a table declares the same name twice, the first
//! entry in table order wins.

use crate::OptionSpec;

/// Finds the descriptor whose short form is `key`.
///
/// # Examples
///
/// ```
/// use optable_core::{OptionSpec, find_short};
///
/// let table = [
///     OptionSpec::flag(Some('f'), Some("flag")),
///     OptionSpec::string(Some('s'), Some("string")),
/// ];
/// assert_eq!(find_short(&table, 's').and_then(|o| o.long), Some("string"));
/// assert!(find_short(&table, 'S').is_none());
/// ```
pub fn find_short<'t, 'a>(
    table: &'t [OptionSpec<'a>],
    key: char,
) -> Option<&'t OptionSpec<'a>> {
    table.iter().find(|spec| spec.matches_short(key))
}

/// Finds the descriptor whose long form is `name` (without the leading `--`).
///
/// # Examples
///
/// ```
/// use optable_core::{OptionSpec, find_long};
///
/// let table = [OptionSpec::integer(Some('n'), Some("number"))];
/// assert_eq!(find_long(&table, "number").and_then(|o| o.short), Some('n'));
/// assert!(find_long(&table, "--number").is_none());
/// ```
pub fn find_long<'t, 'a>(
    table: &'t [OptionSpec<'a>],
    name: &str,
) -> Option<&'t OptionSpec<'a>> {
    table.iter().find(|spec| spec.matches_long(name))
}

/// Mutable counterpart of [`find_short`].
pub fn find_short_mut<'t, 'a>(
    table: &'t mut [OptionSpec<'a>],
    key: char,
) -> Option<&'t mut OptionSpec<'a>> {
    table.iter_mut().find(|spec| spec.matches_short(key))
}

/// Mutable counterpart of [`find_long`].
pub fn find_long_mut<'t, 'a>(
    table: &'t mut [OptionSpec<'a>],
    name: &str,
) -> Option<&'t mut OptionSpec<'a>> {
    table.iter_mut().find(|spec| spec.matches_long(name))
}

/// Index of the first descriptor whose short form is `key`.
pub fn position_short(table: &[OptionSpec<'_>], key: char) -> Option<usize> {
    table.iter().position(|spec| spec.matches_short(key))
}

/// Index of the first descriptor whose long form is `name`.
pub fn position_long(table: &[OptionSpec<'_>], name: &str) -> Option<usize> {
    table.iter().position(|spec| spec.matches_long(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> [OptionSpec<'static>; 4] {
        [
            OptionSpec::flag(Some('f'), Some("flag")),
            OptionSpec::string(None, Some("name")),
            OptionSpec::integer(Some('n'), None),
            OptionSpec::string(Some('f'), Some("flag")).with_help("shadowed"),
        ]
    }

    #[test]
    fn test_first_match_wins() {
        let table = table();
        assert_eq!(position_short(&table, 'f'), Some(0));
        assert_eq!(position_long(&table, "flag"), Some(0));
        assert_eq!(find_long(&table, "flag").map(|o| o.help), Some(""));
    }

    #[test]
    fn test_absent_forms_never_match() {
        let table = table();
        assert_eq!(position_short(&table, 'n'), Some(2));
        assert_eq!(position_long(&table, "n"), None);
        assert_eq!(position_long(&table, "name"), Some(1));
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let table = table();
        assert!(find_short(&table, 'F').is_none());
        assert!(find_long(&table, "Flag").is_none());
    }

    #[test]
    fn test_mutable_lookup_edits_first_match() {
        let mut table = table();
        if let Some(spec) = find_long_mut(&mut table, "flag") {
            spec.help = "edited";
        }
        if let Some(spec) = find_short_mut(&mut table, 'n') {
            spec.help = "count";
        }
        assert_eq!(table[0].help, "edited");
        assert_eq!(table[3].help, "shadowed");
        assert_eq!(table[2].help, "count");
        assert!(find_short_mut(&mut table, 'x').is_none());
    }

    #[test]
    fn test_empty_table() {
        assert!(find_short(&[], 'x').is_none());
        assert!(position_long(&[], "x").is_none());
    }
}
