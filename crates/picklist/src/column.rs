//! Column definitions for chooser tables.

/// Display hint for the cells of one column.
///
/// Hosts that render richly can align, colorize, or elide accordingly; plain
/// text hosts may ignore the hint entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColumnFormat {
    /// Unstructured text.
    #[default]
    Plain,
    /// A filesystem path; long values elide in the middle.
    Path,
    /// A hexadecimal number.
    Hex,
    /// A decimal number.
    Decimal,
    /// An address, rendered in the host's preferred notation.
    Address,
    /// A file name; the directory part elides first.
    FileName,
    /// Formatting is decided by the host per cell.
    Custom,
}

impl ColumnFormat {
    /// Stable name of the format, for logging and identity strings.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Path => "path",
            Self::Hex => "hex",
            Self::Decimal => "dec",
            Self::Address => "addr",
            Self::FileName => "fname",
            Self::Custom => "custom",
        }
    }
}

/// One column of a chooser table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Header text.
    pub label: String,
    /// Suggested width in characters.
    pub width: u16,
    /// How cells in this column should be rendered.
    pub format: ColumnFormat,
}

impl Column {
    /// Creates a plain-text column.
    pub fn new(label: impl Into<String>, width: u16) -> Self {
        Self {
            label: label.into(),
            width,
            format: ColumnFormat::Plain,
        }
    }

    /// Sets the display format.
    pub fn with_format(mut self, format: ColumnFormat) -> Self {
        self.format = format;
        self
    }
}
