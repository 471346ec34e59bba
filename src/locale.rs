use std::env;

/// Locale tags to try for `Key[locale]` lookups, most specific first.
pub fn language_names() -> Vec<String> {
    language_names_from(|var| env::var(var).ok())
}

/// Only the first non-empty of `LANGUAGE`, `LC_ALL`, `LC_MESSAGES`, `LANG`
/// counts; `LANGUAGE` may hold a colon-separated list.
fn language_names_from(get: impl Fn(&str) -> Option<String>) -> Vec<String> {
    let Some(value) = ["LANGUAGE", "LC_ALL", "LC_MESSAGES", "LANG"]
        .into_iter()
        .filter_map(|var| get(var))
        .find(|v| !v.trim().is_empty())
    else {
        return Vec::new();
    };

    let mut out = Vec::new();
    for loc in value.split(':').map(str::trim).filter(|s| !s.is_empty()) {
        for variant in expand_locale(loc) {
            if !out.contains(&variant) {
                out.push(variant);
            }
        }
    }
    out
}

/// `fr_FR.UTF-8@euro` => `fr_FR@euro`, `fr@euro`, `fr_FR`, `fr`.
pub fn expand_locale(locale: &str) -> Vec<String> {
    let locale = locale.trim();

    let (rest, modifier) = match locale.split_once('@') {
        Some((r, m)) if !m.is_empty() => (r, Some(m)),
        Some((r, _)) => (r, None),
        None => (locale, None),
    };
    // drop encoding
    let rest = rest.split('.').next().unwrap_or(rest);
    let (lang, country) = match rest.split_once('_') {
        Some((l, c)) if !c.is_empty() => (l, Some(c)),
        Some((l, _)) => (l, None),
        None => (rest, None),
    };
    if lang.is_empty() || lang == "C" || lang == "POSIX" {
        return Vec::new();
    }

    let mut out = Vec::new();
    if let Some(m) = modifier {
        if let Some(c) = country {
            out.push(format!("{lang}_{c}@{m}"));
        }
        out.push(format!("{lang}@{m}"));
    }
    if let Some(c) = country {
        out.push(format!("{lang}_{c}"));
    }
    out.push(lang.to_string());
    out
}
