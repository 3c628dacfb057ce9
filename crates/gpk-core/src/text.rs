//! Helpers for turning display names into asset-path fragments.

/// Sanitize a display name for use in asset paths.
///
/// Keeps ASCII letters, digits and spaces, trims, replaces spaces with `_`
/// and lowercases. `"King's Row (Winter)"` becomes `"kings_row_winter"`.
pub fn sanitize_string(input: &str) -> String {
    let kept: String = input
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect();
    kept.trim().replace(' ', "_").to_ascii_lowercase()
}
