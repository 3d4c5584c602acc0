use once_cell::sync::Lazy;
use regex::Regex;

/// Unexpanded extended-format name left behind by BetterBibTeX exports.
static PREFIX_ARTIFACT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"family=([\w. ]+), given=([\w. ]+), prefix=([\w. ]+), useprefix=(true|false)")
        .unwrap()
});

/// How many names survive when an author list is shortened.
const SHORTEN_KEEP: usize = 10;

/// Author strings shorter than this are never shortened.
const SHORTEN_THRESHOLD: usize = 1024;

/// Rewrites extended-format name artifacts like
/// `family=Marneffe, given=Marie, prefix=de, useprefix=true`
/// into the plain `de Marneffe, Marie` form.
pub fn fix_name_prefixes(authors: &str) -> String {
    PREFIX_ARTIFACT
        .replace_all(authors, "${3} ${1}, ${2}")
        .into_owned()
}

/// Truncates very long author lists to the first [`SHORTEN_KEEP`] names plus
/// a count of the omitted ones.
///
/// Lists under [`SHORTEN_THRESHOLD`] characters, and lists that split into
/// [`SHORTEN_KEEP`] or fewer names, come back unchanged.
pub fn shorten_author_list(authors: &str) -> String {
    if authors.chars().count() < SHORTEN_THRESHOLD {
        return authors.to_string();
    }
    let names: Vec<&str> = authors.split(" and ").map(str::trim).collect();
    if names.len() <= SHORTEN_KEEP {
        return authors.to_string();
    }
    let removed = names.len() - SHORTEN_KEEP;
    let mut kept: Vec<String> = names[..SHORTEN_KEEP]
        .iter()
        .map(|n| n.to_string())
        .collect();
    kept.push(format!("{} additional authors", removed));
    kept.join(" and ")
}
