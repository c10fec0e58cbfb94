//! Technology icon canonicalisation.
//!
//! Project `iconLists` entries are icon paths. Editors may submit either a
//! path or a bare technology name; both end up as a path through one rule:
//!
//! 1. entries that already look like a path (leading `/` or a URL scheme) are
//!    kept verbatim,
//! 2. known technology names map through [`KNOWN_ICONS`],
//! 3. anything else is slugified to `/<lowercase word characters>.svg`,
//! 4. unless the slug is empty or lands on a table path owned by another
//!    name (`C#` would become `/c.svg`, the C++ icon); such entries are
//!    kept as typed.

/// Known technology names and their icon paths.
pub const KNOWN_ICONS: &[(&str, &str)] = &[
    ("React", "/re.svg"),
    ("Next.js", "/next.svg"),
    ("Tailwind", "/tail.svg"),
    ("TypeScript", "/ts.svg"),
    ("Three.js", "/three.svg"),
    ("Framer", "/fm.svg"),
    ("C++", "/c.svg"),
    ("Stream API", "/stream.svg"),
    ("GSAP", "/gsap.svg"),
    ("AEM", "/aem.svg"),
    ("AI/ML", "/ai.svg"),
    ("RESTful API", "/restfulapi.svg"),
    ("GenAI", "/genai.svg"),
];

/// Returns `true` when the entry is already an icon path or URL.
#[must_use]
pub fn is_icon_path(entry: &str) -> bool {
    entry.starts_with('/') || entry.contains("://")
}

/// Maps a technology name to its icon path.
///
/// Name lookup is case-insensitive; unknown names are slugified. `None`
/// when the slug is empty or collides with a known icon.
#[must_use]
pub fn icon_for(name: &str) -> Option<String> {
    let name = name.trim();
    if let Some((_, path)) = KNOWN_ICONS
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(name))
    {
        return Some((*path).to_string());
    }

    let slug = slugify(name);
    if slug.is_empty() {
        return None;
    }
    let path = format!("/{slug}.svg");
    if KNOWN_ICONS.iter().any(|(_, known)| *known == path) {
        return None;
    }
    Some(path)
}

/// Maps an icon path back to a display name.
#[must_use]
pub fn tech_name(icon: &str) -> String {
    KNOWN_ICONS
        .iter()
        .find(|(_, path)| *path == icon)
        .map_or_else(
            || {
                let stem = icon.strip_prefix('/').unwrap_or(icon);
                stem.strip_suffix(".svg").unwrap_or(stem).to_string()
            },
            |(name, _)| (*name).to_string(),
        )
}

/// Canonicalises a full icon list: trims entries, drops empty ones and maps
/// names to paths. Already-canonical lists come back unchanged.
#[must_use]
pub fn canonicalize(entries: &[String]) -> Vec<String> {
    entries
        .iter()
        .map(|entry| entry.trim())
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            if is_icon_path(entry) {
                entry.to_string()
            } else {
                icon_for(entry).unwrap_or_else(|| entry.to_string())
            }
        })
        .collect()
}

// Keeps ASCII alphanumerics and `_`, lower-cased.
fn slugify(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
