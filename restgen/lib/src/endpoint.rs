//! Endpoint template tokens.
//!
//! Templates use `{name}` placeholders, e.g. `/photos/{id}/comments`.

/// Extracts placeholder names from a template, in order of appearance.
///
/// ```
/// use restgen_lib::endpoint::template_tokens;
///
/// assert_eq!(template_tokens("/photos"), Vec::<&str>::new());
/// assert_eq!(
///     template_tokens("/users/{user}/photos/{id}"),
///     vec!["user", "id"]
/// );
/// ```
pub fn template_tokens(template: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = None;

    for (idx, c) in template.char_indices() {
        match c {
            '{' => start = Some(idx + 1),
            '}' => {
                if let Some(from) = start.take() {
                    let token = &template[from..idx];
                    if !token.is_empty() {
                        tokens.push(token);
                    }
                }
            }
            _ => {}
        }
    }

    tokens
}

/// Tokens in `template` that no key in `keys` will replace.
///
/// These are left in the generated URL verbatim.
pub fn unmatched_tokens<'t, K: AsRef<str>>(template: &'t str, keys: &[K]) -> Vec<&'t str> {
    template_tokens(template)
        .into_iter()
        .filter(|token| !keys.iter().any(|k| k.as_ref() == *token))
        .collect()
}
