//! Parameter block builder for a single method call.

use std::fmt::Write as _;

use quick_xml::escape::escape;

/// Accumulates the `<params>` block of one XMLMC method call.
///
/// A builder is reused across calls: every call sets its parameters fresh,
/// then [`ParamBuilder::take`] renders and clears it before the next call
/// begins. Values are XML-escaped; element names are trusted constants.
#[derive(Debug, Default)]
pub struct ParamBuilder {
    body: String,
    open: Vec<&'static str>,
}

impl ParamBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `<name>value</name>` at the current nesting level.
    pub fn set_param(&mut self, name: &'static str, value: &str) -> &mut Self {
        let _ = write!(self.body, "<{name}>{}</{name}>", escape(value));
        self
    }

    /// Opens a nested element; parameters set afterwards land inside it.
    pub fn open_element(&mut self, name: &'static str) -> &mut Self {
        let _ = write!(self.body, "<{name}>");
        self.open.push(name);
        self
    }

    /// Closes the innermost open element.
    pub fn close_element(&mut self) -> &mut Self {
        if let Some(name) = self.open.pop() {
            let _ = write!(self.body, "</{name}>");
        }
        self
    }

    /// Returns `true` when no parameter has been set since the last clear.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty() && self.open.is_empty()
    }

    /// Renders the current parameters as a `<params>` block.
    ///
    /// Elements still open are closed in the rendering only; the builder
    /// itself is left untouched. An empty builder renders as an empty string.
    #[must_use]
    pub fn render(&self) -> String {
        if self.is_empty() {
            return String::new();
        }
        let mut out = String::with_capacity(self.body.len() + 20);
        out.push_str("<params>");
        out.push_str(&self.body);
        for name in self.open.iter().rev() {
            let _ = write!(out, "</{name}>");
        }
        out.push_str("</params>");
        out
    }

    /// Discards every parameter set so far.
    pub fn clear(&mut self) {
        self.body.clear();
        self.open.clear();
    }

    /// Renders the parameters and clears the builder.
    pub fn take(&mut self) -> String {
        let rendered = self.render();
        self.clear();
        rendered
    }
}
