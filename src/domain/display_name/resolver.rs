use super::policy::NamePolicy;

/// Base URL of the placeholder avatar service.
const AVATAR_SERVICE: &str = "https://ui-avatars.com/api/";

/// Raw display-identity fields of a profile row.
///
/// Callers adapt whatever row shape the store hands them into this struct
/// before resolving; the resolver never sees a database type. Every field is
/// optional because legacy rows populate them inconsistently; in the oldest
/// records the email lives in `id` and nothing else is set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawProfile {
    pub id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
}

/// Display-ready identity for one profile.
///
/// `name` is guaranteed non-empty and is never one of the backend's
/// placeholder values. `initials` back the avatar element when the image
/// fails to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDisplayName {
    pub name: String,
    pub avatar_url: String,
    pub initials: String,
}

/// Resolves a profile to a presentable name, avatar URL, and initials.
///
/// Pure function: same input, same output, no side effects, and it never
/// fails: degraded input falls through to the `"Anonymous User"` terminal
/// fallback instead of surfacing an error. It sits on the display path, so
/// anything else would take the page down with it.
///
/// # Name rules, first match wins
/// 1. absent profile → terminal fallback;
/// 2. a trimmed, non-placeholder `name` → returned verbatim;
/// 3. the title-cased local part of `email`, when longer than one character;
/// 4. the same derivation over `id`, for legacy rows that stored an email
///    address as the identifier;
/// 5. terminal fallback.
///
/// # Example
/// ```
/// use promptverse_api::domain::display_name::{resolve, RawProfile};
///
/// let profile = RawProfile {
///     email: Some("jane.doe@example.com".into()),
///     ..RawProfile::default()
/// };
/// let resolved = resolve(Some(&profile));
/// assert_eq!(resolved.name, "Jane Doe");
/// assert_eq!(resolved.initials, "JD");
/// ```
pub fn resolve(profile: Option<&RawProfile>) -> ResolvedDisplayName {
    resolve_with(profile, &NamePolicy::current())
}

/// Same as [`resolve`], against an explicit placeholder policy.
pub fn resolve_with(profile: Option<&RawProfile>, policy: &NamePolicy) -> ResolvedDisplayName {
    let name = resolve_name(profile, policy);

    let avatar_url = profile
        .and_then(|p| p.avatar_url.as_deref())
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| placeholder_avatar_url(&name));

    let initials = initials_of(&name);

    ResolvedDisplayName {
        name,
        avatar_url,
        initials,
    }
}

fn resolve_name(profile: Option<&RawProfile>, policy: &NamePolicy) -> String {
    let Some(profile) = profile else {
        return policy.fallback().to_string();
    };

    if let Some(name) = profile.name.as_deref() {
        let trimmed = name.trim();
        if !policy.is_system_generated(trimmed) {
            return trimmed.to_string();
        }
    }

    if let Some(name) = profile.email.as_deref().and_then(name_from_email) {
        return name;
    }

    // Legacy records store the email address in the id column.
    if let Some(name) = profile.id.as_deref().and_then(name_from_email) {
        return name;
    }

    policy.fallback().to_string()
}

/// Derives a human-readable name from an email address.
///
/// Takes the local part, splits it on `.`, `_`, and `-`, title-cases each
/// non-empty segment, and joins with single spaces. One-character results
/// are rejected; a bare initial reads worse than the fallback.
fn name_from_email(address: &str) -> Option<String> {
    let (local, _domain) = address.trim().split_once('@')?;

    let name = local
        .split(['.', '_', '-'])
        .filter(|segment| !segment.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ");

    (name.chars().count() > 1).then_some(name)
}

/// First letter uppercased, remainder lowercased.
fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Up to two uppercase characters: the first letter of each whitespace-split
/// word, in order.
fn initials_of(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect()
}

fn placeholder_avatar_url(name: &str) -> String {
    format!(
        "{}?name={}&background=random",
        AVATAR_SERVICE,
        urlencoding::encode(name)
    )
}
