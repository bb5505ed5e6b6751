//! Schema types for user-defined copy rules.

use bon::Builder;
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// A single rule definition.
///
/// ```json
/// {
///   "source": "test/test.txt",
///   "destination": "copies/test_copy.txt",
///   "injection": "// Example injection",
///   "position": "end"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Builder)]
pub struct CopyRule {
    /// The file to watch, relative to the workspace root with `/` separators.
    ///
    /// Compared against the saved file's match key by exact, case-sensitive
    /// string equality.
    #[builder(into)]
    pub source: String,

    /// Where the modified copy is written, relative to the workspace root.
    #[builder(into)]
    pub destination: String,

    /// Literal text inserted into the copy.
    #[builder(into)]
    pub injection: String,

    /// Whether the injection goes before or after the original content.
    #[builder(default)]
    pub position: Position,
}

impl CopyRule {
    /// Whether this rule applies to a saved file with the given match key.
    pub fn matches(&self, key: &str) -> bool {
        self.source == key
    }

    /// Build the content written to the destination.
    ///
    /// The injection and the original content are joined by a single `\n`;
    /// neither side is trimmed.
    pub fn inject(&self, original: &str) -> String {
        match self.position {
            Position::Start => format!("{}\n{original}", self.injection),
            Position::End => format!("{original}\n{}", self.injection),
        }
    }
}

/// Where an injection is placed relative to the original content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    /// Injection, newline, then the original content.
    #[display("start")]
    Start,

    /// Original content, newline, then the injection.
    #[default]
    #[display("end")]
    End,
}

/// The rules written by `copyonsave init`.
pub fn example_rules() -> Vec<CopyRule> {
    vec![
        CopyRule::builder()
            .source("test/test.txt")
            .destination("copies/test_copy.txt")
            .injection("// Example injection")
            .position(Position::End)
            .build(),
        CopyRule::builder()
            .source("test/test2.txt")
            .destination("copies/test2_copy.txt")
            .injection("// Example injection")
            .position(Position::Start)
            .build(),
    ]
}
