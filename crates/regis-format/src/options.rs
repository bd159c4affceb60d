use serde::{Deserialize, Serialize};

/// Switches understood by the built-in formats.
///
/// Each format reads only the options that concern it and ignores the rest.
/// All switches default to off.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    /// JSON: indent output (4 spaces). TOML: use the pretty layout.
    pub pretty_print: bool,
    /// JSON: emit `/` as-is instead of `\/`.
    pub unescaped_slashes: bool,
    /// JSON: emit non-ASCII characters as-is instead of `\uXXXX`.
    pub unescaped_unicode: bool,
    /// INI: treat `[section]` headers as one level of nesting.
    pub process_sections: bool,
    /// INI: read and write `key[]` / `key[sub]` array entries.
    pub support_array_values: bool,
    /// PHP: class name (default `Registry`).
    pub class: Option<String>,
    /// PHP: namespace declaration.
    pub namespace: Option<String>,
    /// PHP: append a closing `?>` tag.
    pub closing_tag: bool,
}

impl FormatOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pretty(mut self) -> Self {
        self.pretty_print = true;
        self
    }

    pub fn unescaped(mut self) -> Self {
        self.unescaped_slashes = true;
        self.unescaped_unicode = true;
        self
    }

    pub fn with_sections(mut self) -> Self {
        self.process_sections = true;
        self
    }

    pub fn with_array_values(mut self) -> Self {
        self.support_array_values = true;
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn with_closing_tag(mut self) -> Self {
        self.closing_tag = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_off() {
        let opts = FormatOptions::default();
        assert!(!opts.pretty_print);
        assert!(!opts.process_sections);
        assert!(opts.class.is_none());
    }

    #[test]
    fn builder_chain() {
        let opts = FormatOptions::new()
            .pretty()
            .with_sections()
            .with_class("AppConfig");
        assert!(opts.pretty_print);
        assert!(opts.process_sections);
        assert_eq!(opts.class.as_deref(), Some("AppConfig"));
    }

    #[test]
    fn deserialize_partial() {
        let opts: FormatOptions = serde_json::from_str(r#"{"pretty_print": true}"#).unwrap();
        assert!(opts.pretty_print);
        assert!(!opts.unescaped_slashes);
    }
}
