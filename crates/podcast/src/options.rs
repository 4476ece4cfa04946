// ABOUTME: Output configuration for the feed writer: WriterOptions and the fluent WriterBuilder.
// ABOUTME: Controls indentation and whether the XML declaration is emitted; defaults match common feed output.

use crate::writer::Writer;

/// Configuration options for rendering a feed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriterOptions {
    /// Spaces per nesting level; `None` writes the document on one line.
    pub indent: Option<usize>,
    /// Emit `<?xml version="1.0" encoding="UTF-8"?>` before the root element.
    pub declaration: bool,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            indent: Some(2),
            declaration: true,
        }
    }
}

/// Builder for constructing Writer instances with custom configuration.
#[derive(Debug, Clone, Default)]
pub struct WriterBuilder {
    opts: WriterOptions,
}

impl WriterBuilder {
    /// Create a new WriterBuilder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Indent nested elements by `width` spaces.
    pub fn indent(mut self, width: usize) -> Self {
        self.opts.indent = Some(width);
        self
    }

    /// Write the whole document without line breaks.
    pub fn compact(mut self) -> Self {
        self.opts.indent = None;
        self
    }

    pub fn declaration(mut self, emit: bool) -> Self {
        self.opts.declaration = emit;
        self
    }

    /// Build the Writer with the configured options.
    pub fn build(self) -> Writer {
        Writer::new(self.opts)
    }
}
