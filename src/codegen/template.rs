//! Placeholder substitution for generated text.
//!
//! Every piece of generated source goes through [`Template::render`]. A
//! placeholder is an upper-case identifier in braces (`{SLATECLASS}`); braces
//! around anything else, such as Swift closures or `{}` naming patterns, are
//! plain text.
//!
//! Rendering is a single left-to-right pass over the template. Replacement
//! text is copied into the output verbatim and is never scanned again, so a
//! bound value that itself contains `{NAME}` comes out literally.
//!
//! Placeholders without a binding are kept as-is by [`Template::render`];
//! [`Template::render_strict`] reports them instead.

use indexmap::IndexMap;
use regex::{Captures, Regex};
use std::sync::OnceLock;

fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| {
        Regex::new(r"\{([A-Z][A-Z0-9_]*)\}").expect("placeholder pattern is valid")
    })
}

/// Values bound to placeholder names for one rendering
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
    values: IndexMap<&'static str, String>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name`, replacing any earlier value
    pub fn set(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.values.insert(name, value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.values.keys().copied()
    }
}

/// A template string with named placeholders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    text: &'static str,
}

impl Template {
    pub const fn new(text: &'static str) -> Self {
        Self { text }
    }

    pub fn text(&self) -> &'static str {
        self.text
    }

    /// Distinct placeholder names, in first-occurrence order
    pub fn placeholders(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = Vec::new();
        for caps in placeholder_regex().captures_iter(self.text) {
            if let Some(name) = caps.get(1).map(|m| m.as_str()) {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        names
    }

    /// Placeholders in this template with no value in `bindings`
    pub fn unresolved(&self, bindings: &Bindings) -> Vec<&'static str> {
        self.placeholders()
            .into_iter()
            .filter(|name| bindings.get(name).is_none())
            .collect()
    }

    /// Substitute every bound placeholder; unbound ones pass through unchanged
    pub fn render(&self, bindings: &Bindings) -> String {
        placeholder_regex()
            .replace_all(self.text, |caps: &Captures| match bindings.get(&caps[1]) {
                Some(value) => value.to_string(),
                None => caps[0].to_string(),
            })
            .into_owned()
    }

    /// Like [`Template::render`], but fails listing every unbound placeholder
    pub fn render_strict(&self, bindings: &Bindings) -> Result<String, Vec<String>> {
        let missing = self.unresolved(bindings);
        if missing.is_empty() {
            Ok(self.render(bindings))
        } else {
            Err(missing.into_iter().map(String::from).collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replaces_every_occurrence() {
        let template = Template::new("{A} and {A} then {B}");
        let out = template.render(&Bindings::new().set("A", "x").set("B", "y"));
        assert_eq!(out, "x and x then y");
    }

    #[test]
    fn test_replacement_is_not_rescanned() {
        let template = Template::new("{OUTER}");
        let bindings = Bindings::new().set("OUTER", "{INNER}").set("INNER", "boom");
        assert_eq!(template.render(&bindings), "{INNER}");
    }

    #[test]
    fn test_unbound_placeholder_is_preserved() {
        let template = Template::new("let x = {MISSING}");
        assert_eq!(template.render(&Bindings::new()), "let x = {MISSING}");
    }

    #[test]
    fn test_strict_reports_missing() {
        let template = Template::new("{A}{B}{A}{C}");
        let err = template.render_strict(&Bindings::new().set("B", "")).unwrap_err();
        assert_eq!(err, vec!["A".to_string(), "C".to_string()]);
    }

    #[test]
    fn test_swift_braces_are_text() {
        let template = Template::new("var x: Int { get } {}{lower}{NAME}");
        let out = template.render(&Bindings::new().set("NAME", "n"));
        assert_eq!(out, "var x: Int { get } {}{lower}n");
    }

    #[test]
    fn test_empty_value_erases_placeholder() {
        let template = Template::new("String{OPTIONAL}");
        assert_eq!(template.render(&Bindings::new().set("OPTIONAL", "")), "String");
    }

    #[test]
    fn test_placeholders_in_order() {
        let template = Template::new("{B} {A} {B} {A_2}");
        assert_eq!(template.placeholders(), vec!["B", "A", "A_2"]);
    }
}
