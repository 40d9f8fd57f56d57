//! `{{placeholder}}` substitution for instruction text.

use regex::{Captures, Regex};
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*\}\}").expect("Valid placeholder regex")
});

/// Substitute `{{name}}` placeholders from `vars`.
///
/// Only the template is scanned, so substituted values are never re-expanded. Unknown
/// placeholders are left in place.
///
/// # Examples
///
/// ```
/// use autopx_generation::render;
///
/// let prompt = render("Topic: {{topic}}\nPlatform: {{ platform }}", &[
///     ("topic", "Heat pumps"),
///     ("platform", "x"),
/// ]);
/// assert_eq!(prompt, "Topic: Heat pumps\nPlatform: x");
/// ```
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures<'_>| {
            let name = &caps[1];
            match vars.iter().find(|(key, _)| *key == name) {
                Some((_, value)) => (*value).to_string(),
                None => {
                    tracing::warn!(placeholder = name, "Unresolved template placeholder");
                    caps[0].to_string()
                }
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_are_not_reexpanded() {
        let out = render("A {{a}} B {{b}}", &[("a", "{{b}}"), ("b", "x")]);
        assert_eq!(out, "A {{b}} B x");
    }

    #[test]
    fn test_unknown_placeholder_is_kept() {
        assert_eq!(render("Hi {{who}}", &[]), "Hi {{who}}");
    }
}
