//! Plain-text timeline writer.
//!
//! Each fragment is printed as its block of lines followed by one blank line:
//!
//! ```text
//! Sent: Alice
//! Date: 2021.01.05
//! Hello!
//!
//! Sent: Bob
//! Date: 2021.01.05
//! Call: 📞 2 minutes 5 seconds
//!
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::view::DisplayFragment;

/// Writes the timeline to any writer.
pub fn write_text<W: Write>(fragments: &[DisplayFragment], writer: &mut W) -> Result<()> {
    for fragment in fragments {
        write!(writer, "{}", fragment)?;
        writeln!(writer)?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes the timeline to a file, replacing its contents.
pub fn write_text_file(fragments: &[DisplayFragment], path: impl AsRef<Path>) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_text(fragments, &mut writer)
}

/// Renders the timeline into a string.
pub fn to_text(fragments: &[DisplayFragment]) -> String {
    let mut out = String::new();
    for fragment in fragments {
        out.push_str(&fragment.to_string());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{Body, CallDuration, LegacyBody};
    use chrono::NaiveDate;
    use tempfile::NamedTempFile;

    fn sample() -> Vec<DisplayFragment> {
        let date = NaiveDate::from_ymd_opt(2021, 1, 5);
        vec![
            DisplayFragment::new(
                0,
                "Alice",
                date,
                Body::Legacy(LegacyBody {
                    text: Some("Hello!".to_string()),
                    icons: vec![],
                }),
            ),
            DisplayFragment::new(1, "Bob", date, Body::Call(CallDuration::from_seconds(125.0))),
        ]
    }

    const EXPECTED: &str = "Sent: Alice\nDate: 2021.01.05\nHello!\n\n\
                            Sent: Bob\nDate: 2021.01.05\nCall: 📞 2 minutes 5 seconds\n\n";

    #[test]
    fn test_to_text() {
        assert_eq!(to_text(&sample()), EXPECTED);
    }

    #[test]
    fn test_to_text_empty() {
        assert_eq!(to_text(&[]), "");
    }

    #[test]
    fn test_write_text_matches_to_text() {
        let mut buffer = Vec::new();
        write_text(&sample(), &mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), EXPECTED);
    }

    #[test]
    fn test_write_text_file() {
        let temp_file = NamedTempFile::new().unwrap();
        write_text_file(&sample(), temp_file.path()).unwrap();

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        assert_eq!(content, EXPECTED);
    }
}
