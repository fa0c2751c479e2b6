//! Column-name alias resolution.

use std::collections::HashMap;

/// Normalize a column name for alias comparison: lowercase, with spaces and
/// underscores removed.
///
/// # Examples
///
/// ```
/// use lcdata_schema::normalize_name;
///
/// assert_eq!(normalize_name("Flux_Err"), "fluxerr");
/// assert_eq!(normalize_name("host gal RA"), "hostgalra");
/// ```
pub fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|ch| *ch != '_' && *ch != ' ')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Find the available name matching the highest-priority alias.
///
/// `names` are compared after [`normalize_name`]; `aliases` are expected to be
/// normalized already. Aliases are tried in order and the original spelling of
/// the first available match is returned. When two names normalize to the same
/// string, the later one shadows the earlier.
pub fn find_alias<N, A>(names: &[N], aliases: &[A]) -> Option<String>
where
    N: AsRef<str>,
    A: AsRef<str>,
{
    let name_map: HashMap<String, &str> = names
        .iter()
        .map(|name| (normalize_name(name.as_ref()), name.as_ref()))
        .collect();

    aliases
        .iter()
        .find_map(|alias| name_map.get(alias.as_ref()))
        .map(|name| (*name).to_string())
}
