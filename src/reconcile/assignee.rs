//! Fuzzy assignee resolution
//!
//! Maps a name fragment typed by the user to exactly one forge account.
//! Matching is a plain substring test after both sides are transliterated
//! to ASCII and lower-cased, so "jose" finds "José García".

use crate::error::AmbiguityError;
use crate::types::Account;

/// Transliterate to ASCII, then lower-case
pub fn normalize_name(name: &str) -> String {
    deunicode::deunicode(name).to_lowercase()
}

/// Indices of the names containing `pattern`, in input order
pub fn match_names<'a, I>(pattern: &str, names: I) -> Vec<usize>
where
    I: IntoIterator<Item = &'a str>,
{
    let needle = normalize_name(pattern);
    names
        .into_iter()
        .enumerate()
        .filter(|(_, name)| normalize_name(name).contains(&needle))
        .map(|(idx, _)| idx)
        .collect()
}

/// Closest candidate to `input`, compared on the raw strings
pub fn did_you_mean<'a, I>(input: &str, candidates: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<(f64, &str)> = None;
    for candidate in candidates {
        let score = strsim::jaro_winkler(input, candidate);
        // Ties keep the earlier candidate
        if best.is_none_or(|(top, _)| score > top) {
            best = Some((score, candidate));
        }
    }
    best.map(|(_, c)| c.to_string())
}

/// Resolve `pattern` to exactly one account
///
/// Zero matches fails with [`AmbiguityError::NotFound`] carrying the closest
/// display name; several matches fail with
/// [`AmbiguityError::MultipleMatches`] listing them in the order of
/// `accounts`.
pub fn resolve_assignee(pattern: &str, accounts: &[Account]) -> Result<Account, AmbiguityError> {
    let names: Vec<&str> = accounts.iter().map(|a| a.display_name.as_str()).collect();
    let matches = match_names(pattern, names.iter().copied());

    match matches.as_slice() {
        [] => Err(AmbiguityError::NotFound {
            pattern: pattern.to_string(),
            suggestion: did_you_mean(pattern, names.iter().copied()),
        }),
        [idx] => Ok(accounts[*idx].clone()),
        _ => Err(AmbiguityError::MultipleMatches {
            pattern: pattern.to_string(),
            matches: matches.iter().map(|&i| names[i].to_string()).collect(),
        }),
    }
}
