//! Configuration options for encoding and decoding.
//!
//! ## Examples
//!
//! ```rust
//! use serde_tomlish::{to_string_with_options, CodecOptions};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Inner { x: i32 }
//!
//! #[derive(Serialize)]
//! struct Outer { id: i32, inner: Inner }
//!
//! let data = Outer { id: 1, inner: Inner { x: 2 } };
//!
//! // No blank line between blocks
//! let text = to_string_with_options(&data, &CodecOptions::compact()).unwrap();
//! assert_eq!(text, "id = 1\n[inner]\nx = 2");
//! ```

/// Options shared by the encoder and the scanner.
///
/// # Examples
///
/// ```rust
/// use serde_tomlish::CodecOptions;
///
/// let options = CodecOptions::new().with_section_spacing(false);
/// assert!(!options.section_spacing);
/// assert!(options.lenient);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodecOptions {
    /// Separate blocks with a blank line. The scanner ignores blank lines
    /// either way.
    pub section_spacing: bool,
    /// Keep unparsable tokens as bare strings and skip unrecognised lines.
    /// When off, both are reported as [`Error::Syntax`](crate::Error::Syntax).
    pub lenient: bool,
}

impl Default for CodecOptions {
    fn default() -> Self {
        CodecOptions {
            section_spacing: true,
            lenient: true,
        }
    }
}

impl CodecOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Options that emit no blank lines between blocks.
    #[must_use]
    pub fn compact() -> Self {
        CodecOptions {
            section_spacing: false,
            ..Default::default()
        }
    }

    /// Options that reject bare fallback tokens and junk lines while scanning.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_tomlish::{scan, CodecOptions};
    ///
    /// assert!(scan("name = Dima", &CodecOptions::new()).is_ok());
    /// assert!(scan("name = Dima", &CodecOptions::strict()).is_err());
    /// ```
    #[must_use]
    pub fn strict() -> Self {
        CodecOptions {
            lenient: false,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_section_spacing(mut self, section_spacing: bool) -> Self {
        self.section_spacing = section_spacing;
        self
    }

    #[must_use]
    pub fn with_lenient(mut self, lenient: bool) -> Self {
        self.lenient = lenient;
        self
    }

    pub(crate) fn block_separator(&self) -> &'static str {
        if self.section_spacing {
            "\n\n"
        } else {
            "\n"
        }
    }
}
