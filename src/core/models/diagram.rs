//! Diagram micro-format
//!
//! A diagram is a block of text framed by start/end markers with one
//! connection per body line:
//!
//! ```text
//! @startdiagram
//! <serviceType> <serviceId> <connector> <serviceType> <serviceId>
//! @enddiagram
//! ```
//!
//! # Examples
//!
//! ```
//! use archsec::core::models::{Connection, Connector};
//!
//! let c = Connection::parse("aws-ec2 web -> aws-rds db").unwrap();
//! assert_eq!(c.connector, Connector::Sync);
//! assert_eq!(c.target_type, "aws-rds");
//! ```

use serde::{Deserialize, Serialize};

/// Literal the first line must start with
pub const START_MARKER: &str = "@startdiagram";

/// Literal the last line must start with
pub const END_MARKER: &str = "@enddiagram";

/// Edge semantics between two services
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Connector {
    /// `->` synchronous call
    Sync,
    /// `-->` asynchronous message
    Async,
    /// `..>` best-effort / dotted dependency
    BestEffort,
}

impl Connector {
    /// Every connector, in declaration order
    pub const ALL: [Self; 3] = [Self::Sync, Self::Async, Self::BestEffort];

    /// Textual symbol as it appears in a diagram
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Sync => "->",
            Self::Async => "-->",
            Self::BestEffort => "..>",
        }
    }

    /// Look up a connector by its symbol
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.symbol() == symbol)
    }
}

impl std::fmt::Display for Connector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

impl std::str::FromStr for Connector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_symbol(s).ok_or_else(|| format!("unknown connector: {s}. Use: ->, -->, ..>"))
    }
}

/// One edge of a diagram, parsed from a body line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    /// Catalog id of the calling service (e.g. `aws-ec2`)
    pub source_type: String,
    /// Instance name of the calling service
    pub source_id: String,
    /// Edge semantics
    pub connector: Connector,
    /// Catalog id of the called service
    pub target_type: String,
    /// Instance name of the called service, absent on four-token lines
    pub target_id: Option<String>,
}

impl Connection {
    /// Parse a body line. Tokens past the fifth are ignored.
    ///
    /// Returns `None` when the line has fewer than four tokens or an
    /// unknown connector.
    #[must_use]
    pub fn parse(line: &str) -> Option<Self> {
        let mut tokens = line.split_whitespace();
        let source_type = tokens.next()?;
        let source_id = tokens.next()?;
        let connector = Connector::from_symbol(tokens.next()?)?;
        let target_type = tokens.next()?;
        let target_id = tokens.next();

        Some(Self {
            source_type: source_type.to_string(),
            source_id: source_id.to_string(),
            connector,
            target_type: target_type.to_string(),
            target_id: target_id.map(String::from),
        })
    }
}

impl std::fmt::Display for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {} {}", self.source_type, self.source_id, self.connector, self.target_type)?;
        if let Some(id) = &self.target_id {
            write!(f, " {id}")?;
        }
        Ok(())
    }
}

/// Split diagram text into lines the way every diagram operation sees them
///
/// Surrounding whitespace of the whole text is dropped first, so the first
/// and last entries are the marker candidates.
#[must_use]
pub fn lines(text: &str) -> Vec<&str> {
    text.trim().split('\n').collect()
}

/// The lines between the first and the last one
///
/// Texts with fewer than two lines have no body.
#[must_use]
pub fn body<'a>(lines: &[&'a str]) -> Vec<&'a str> {
    if lines.len() < 2 {
        return Vec::new();
    }
    lines[1..lines.len() - 1].to_vec()
}

/// Frame connection lines between the start and end markers
///
/// ```
/// use archsec::core::models::diagram;
///
/// let text = diagram::render(["aws-ec2 web -> aws-rds db"]);
/// assert_eq!(text, "@startdiagram\naws-ec2 web -> aws-rds db\n@enddiagram");
/// ```
pub fn render<I, S>(connections: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::from(START_MARKER);
    for line in connections {
        out.push('\n');
        out.push_str(line.as_ref());
    }
    out.push('\n');
    out.push_str(END_MARKER);
    out
}
