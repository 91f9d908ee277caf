/// Placeholder-name rejection policy
///
/// The backend historically filled the `name` column with several different
/// machine-generated values when a user never supplied one. This table is the
/// single place those values are enumerated; rule changes are additive here
/// instead of being rewritten wherever names are displayed.
///
/// # Invariants
/// - The fallback name is itself a member of the rejected set, so a profile
///   whose stored name equals the fallback is treated as having no name.
/// - Matching is case-insensitive over the trimmed candidate.
///
/// # Example
/// ```
/// use promptverse_api::domain::display_name::NamePolicy;
///
/// let policy = NamePolicy::current();
/// assert!(policy.is_system_generated("Unknown User"));
/// assert!(policy.is_system_generated("  user 4f3a9c "));
/// assert!(!policy.is_system_generated("Jordan Lee"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamePolicy {
    version: u32,
    rejected: &'static [&'static str],
    fallback: &'static str,
}

/// Lowercased literals the backend is known to emit in place of a real name.
const REJECTED_LITERALS: &[&str] = &["unknown user", "anonymous user", "anonymous", "user"];

/// Shown when no rule produces a usable name.
const FALLBACK_NAME: &str = "Anonymous User";

impl NamePolicy {
    /// Returns the policy currently in force.
    pub const fn current() -> Self {
        Self {
            version: 1,
            rejected: REJECTED_LITERALS,
            fallback: FALLBACK_NAME,
        }
    }

    /// Returns the policy version, for auditing which rule set produced a name.
    #[allow(dead_code)]
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// The terminal fallback display name.
    pub const fn fallback(&self) -> &'static str {
        self.fallback
    }

    /// Returns true when a candidate name was produced by the backend rather
    /// than a person.
    ///
    /// A candidate is system-generated if, after trimming, it is empty,
    /// case-insensitively equals one of the known placeholder literals, or
    /// matches the `User <hex-digits>` tag the backend assigns to fresh
    /// accounts (e.g. `User 4f3a9c`).
    pub fn is_system_generated(&self, candidate: &str) -> bool {
        let lowered = candidate.trim().to_lowercase();
        if lowered.is_empty() {
            return true;
        }
        if self.rejected.contains(&lowered.as_str()) {
            return true;
        }
        is_generated_user_tag(&lowered)
    }
}

impl Default for NamePolicy {
    fn default() -> Self {
        Self::current()
    }
}

/// Matches the lowercased form of `User <hex-digits>`.
fn is_generated_user_tag(lowered: &str) -> bool {
    let Some(rest) = lowered.strip_prefix("user") else {
        return false;
    };
    if !rest.starts_with(char::is_whitespace) {
        return false;
    }
    let tag = rest.trim_start();
    !tag.is_empty() && tag.chars().all(|c| c.is_ascii_hexdigit())
}
