/// Options for [`Parser`](crate::parser::Parser). Use
/// [`ParserOptionsBuilder`] to create instances of this struct.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParserOptions {
    /// The maximum array/object nesting depth.
    pub(crate) max_depth: usize,
}

impl Default for ParserOptions {
    /// Returns the default parser options.
    fn default() -> Self {
        Self { max_depth: 2048 }
    }
}

impl ParserOptions {
    /// Returns the maximum array/object nesting depth.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

/// A builder for [`ParserOptions`]
///
/// ```rust
/// use leptjson::options::ParserOptionsBuilder;
///
/// let options = ParserOptionsBuilder::default().with_max_depth(16).build();
/// assert_eq!(options.max_depth(), 16);
/// ```
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParserOptionsBuilder {
    options: ParserOptions,
}

impl ParserOptionsBuilder {
    /// Set the maximum array/object nesting depth.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.options.max_depth = max_depth;
        self
    }

    /// Create a new [`ParserOptions`] object.
    pub fn build(self) -> ParserOptions {
        self.options
    }
}
