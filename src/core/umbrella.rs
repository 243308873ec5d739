//! Umbrella header generation.

/// The generated umbrella header: an optional prelude followed by one
/// `#import <Namespace/Header.h>` line per public header, in manifest order.
#[derive(Debug, Clone)]
pub struct UmbrellaHeader {
    namespace: String,
    prelude: Option<String>,
    entries: Vec<String>,
}

impl UmbrellaHeader {
    /// Create an umbrella header for the given library namespace.
    pub fn new(namespace: impl Into<String>, entries: &[String]) -> Self {
        UmbrellaHeader {
            namespace: namespace.into(),
            prelude: None,
            entries: entries.to_vec(),
        }
    }

    /// Prepend literal prelude text (typically the contents of a prefix
    /// header) above the import block.
    pub fn with_prelude(mut self, prelude: impl Into<String>) -> Self {
        self.prelude = Some(prelude.into());
        self
    }

    /// Conventional file name for the umbrella header: `<Namespace>.h`.
    pub fn file_name(&self) -> String {
        format!("{}.h", self.namespace)
    }

    /// Render the umbrella header text.
    ///
    /// The prelude is emitted verbatim (newline-terminated if it is not
    /// already); import order is exactly entry order, never traversal order.
    pub fn render(&self) -> String {
        let mut out = String::new();

        if let Some(prelude) = &self.prelude {
            out.push_str(prelude);
            if !prelude.ends_with('\n') {
                out.push('\n');
            }
        }

        for entry in &self.entries {
            out.push_str(&format!("#import <{}/{}>\n", self.namespace, entry));
        }

        out
    }
}
