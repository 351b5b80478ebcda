//! Placeholder substitution for script templates
//!
//! Templates use `%{name}` placeholders. `$` and `#` are taken by the shells
//! themselves, `%{` is not.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::HashMap;

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"%\{([A-Za-z_][A-Za-z0-9_]*)\}").unwrap());

/// A fixed script skeleton
#[derive(Debug, Clone, Copy)]
pub struct Template {
    source: &'static str,
}

impl Template {
    /// Wrap template text
    pub const fn new(source: &'static str) -> Self {
        Template { source }
    }

    /// Names of all placeholders, in order of first appearance
    pub fn placeholders(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        for caps in PLACEHOLDER.captures_iter(self.source) {
            if let Some(name) = caps.get(1).map(|m| m.as_str()) {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        names
    }

    /// Replace known placeholders and leave unknown ones untouched.
    ///
    /// Substituted values are not scanned again.
    pub fn safe_substitute(&self, vars: &HashMap<&str, String>) -> String {
        PLACEHOLDER
            .replace_all(self.source, |caps: &Captures| match vars.get(&caps[1]) {
                Some(value) => value.clone(),
                None => caps[0].to_string(),
            })
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&'static str, &str)]) -> HashMap<&'static str, String> {
        pairs.iter().map(|(k, v)| (*k, v.to_string())).collect()
    }

    #[test]
    fn test_simple_substitution() {
        let tpl = Template::new("complete -F %{function} %{name}");
        let out = tpl.safe_substitute(&vars(&[("function", "_f"), ("name", "demo")]));
        assert_eq!(out, "complete -F _f demo");
    }

    #[test]
    fn test_unknown_placeholder_is_kept() {
        let tpl = Template::new("%{known} %{unknown}");
        let out = tpl.safe_substitute(&vars(&[("known", "x")]));
        assert_eq!(out, "x %{unknown}");
    }

    #[test]
    fn test_shell_syntax_is_untouched() {
        let source = r#"${COMP_WORDS[COMP_CWORD]} ${var%%.*} %x $(( i + 1 ))"#;
        let tpl = Template::new(source);
        assert_eq!(tpl.safe_substitute(&HashMap::new()), source);
    }

    #[test]
    fn test_values_are_not_rescanned() {
        let tpl = Template::new("%{a}");
        let out = tpl.safe_substitute(&vars(&[("a", "%{b} $1"), ("b", "nope")]));
        assert_eq!(out, "%{b} $1");
    }

    #[test]
    fn test_placeholders_listed_once() {
        let tpl = Template::new("%{a} %{b} %{a}");
        assert_eq!(tpl.placeholders(), vec!["a", "b"]);
    }
}
