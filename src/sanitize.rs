//! Label sanitization: raw metadata names to constant identifiers.

/// Convert a raw label into an upper-snake-case constant identifier.
///
/// `-` and spaces become `_`, an `_` is inserted at every lower-to-upper
/// case boundary, and a leading digit is guarded with `k` before the whole
/// result is upper-cased.
///
/// ```
/// use constkit::sanitize::sanitize;
///
/// assert_eq!(sanitize("playerHealth").unwrap(), "PLAYER_HEALTH");
/// assert_eq!(sanitize("main-menu").unwrap(), "MAIN_MENU");
/// assert_eq!(sanitize("3dModel").unwrap(), "K3D_MODEL");
/// ```
///
/// # Errors
///
/// Returns [`InvalidLabel`] for an empty label, which cannot form an
/// identifier.
pub fn sanitize(label: &str) -> Result<String, InvalidLabel> {
    if label.is_empty() {
        return Err(InvalidLabel);
    }

    let mut out = String::with_capacity(label.len() + 4);
    let mut prev_was_lower = false;
    for ch in label.chars() {
        let ch = match ch {
            '-' | ' ' => '_',
            other => other,
        };
        if ch.is_uppercase() && prev_was_lower {
            out.push('_');
        }
        prev_was_lower = ch.is_lowercase();
        out.push(ch);
    }

    // Identifiers cannot start with a digit
    if out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, 'k');
    }

    Ok(out.to_uppercase())
}

/// Error for a label that cannot form a constant identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidLabel;

impl std::fmt::Display for InvalidLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "empty label cannot form a constant identifier")
    }
}

impl std::error::Error for InvalidLabel {}
