//! Request input validation.

/// Maximum accepted email length.
const MAX_EMAIL_LEN: usize = 255;

/// Validate email format.
///
/// Basic structural check: exactly one `@`, non-empty local part, a dotted
/// domain, and a conservative character set on both sides.
///
/// # Examples
///
/// ```
/// use prism_invitation_web::validation::is_valid_email;
///
/// assert!(is_valid_email("user@example.com"));
/// assert!(is_valid_email("first.last+tag@sub.example.co"));
/// assert!(!is_valid_email("invalid"));
/// assert!(!is_valid_email("@example.com"));
/// assert!(!is_valid_email("user@"));
/// ```
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    if email.len() < 3 || email.len() > MAX_EMAIL_LEN {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }

    // Domain needs a dot that is neither leading nor trailing
    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return false;
    }

    let valid_local_char =
        |c: char| c.is_alphanumeric() || matches!(c, '.' | '-' | '+' | '_');
    let valid_domain_char = |c: char| c.is_alphanumeric() || matches!(c, '.' | '-');

    local.chars().all(valid_local_char) && domain.chars().all(valid_domain_char)
}
