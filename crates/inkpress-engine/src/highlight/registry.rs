use std::collections::HashMap;

use tree_sitter::Language;

/// A compiled tree-sitter grammar, ready for parser construction.
#[derive(Clone)]
pub struct Grammar {
    language: Language,
}

impl Grammar {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn language(&self) -> &Language {
        &self.language
    }
}

impl std::fmt::Debug for Grammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Grammar").finish_non_exhaustive()
    }
}

/// Lookup table from fence language tags to grammars.
///
/// Keys are the full `language-*` class strings that fenced code blocks
/// produce (` ```ts ` becomes `language-ts`), so one grammar is typically
/// registered under several aliases. Lookup misses are not errors; the
/// highlighter falls back to plain rendering for tags nobody registered.
///
/// The registry holds only [`Language`] handles, which are shareable across
/// threads. Parsers are built per call site because `tree_sitter::Parser`
/// itself is stateful.
pub struct GrammarRegistry {
    grammars: HashMap<String, Grammar>,
}

impl GrammarRegistry {
    /// A registry with no grammars. Everything falls back to plain rendering
    /// until [`register`](Self::register) is called.
    pub fn empty() -> Self {
        Self {
            grammars: HashMap::new(),
        }
    }

    /// Register a grammar under a single tag.
    pub fn register(&mut self, tag: impl Into<String>, language: Language) {
        self.grammars.insert(tag.into(), Grammar::new(language));
    }

    /// Register one grammar under several alias tags at once.
    pub fn register_aliases(&mut self, tags: &[&str], language: Language) {
        for tag in tags {
            self.register(*tag, language.clone());
        }
    }

    /// Look up the grammar for a language tag, if one is registered.
    pub fn resolve(&self, tag: &str) -> Option<&Grammar> {
        self.grammars.get(tag)
    }

    /// All registered tags, unordered.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.grammars.keys().map(String::as_str)
    }
}

impl Default for GrammarRegistry {
    /// The stock grammar table.
    ///
    /// TypeScript, TSX, JavaScript (which also parses JSX), Rust, and
    /// Markdown are wired up out of the box. `language-grammar` maps to the
    /// JavaScript grammar because tree-sitter grammars are themselves
    /// written as `grammar.js` files.
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register_aliases(
            &["language-typescript", "language-ts"],
            tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
        );
        registry.register("language-tsx", tree_sitter_typescript::LANGUAGE_TSX.into());
        registry.register_aliases(
            &[
                "language-javascript",
                "language-js",
                "language-jsx",
                "language-grammar",
            ],
            tree_sitter_javascript::LANGUAGE.into(),
        );
        registry.register_aliases(
            &["language-rust", "language-rs"],
            tree_sitter_rust::LANGUAGE.into(),
        );
        registry.register_aliases(
            &["language-markdown", "language-md"],
            tree_sitter_md::LANGUAGE.into(),
        );
        registry
    }
}
