//! Capture file line grammar.
//!
//! ```text
//! <timestamp> | <topic> | <hex payload>
//! ```
//!
//! Fields are separated by the literal [SEPARATOR]. Whitespace around the whole line
//! is ignored; blank lines carry no record.

/// Field separator.
pub const SEPARATOR: &str = " | ";

/// A well-formed capture line, borrowing from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureLine<'a> {
    pub timestamp: &'a str,
    pub topic: &'a str,
    pub payload: &'a str,
}

/// The fragments of a line that did not split into exactly three fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Malformed<'a> {
    pub timestamp: &'a str,
    pub topic: Option<&'a str>,
    /// Number of fields the line split into.
    pub fields: usize,
}

impl<'a> CaptureLine<'a> {
    /// Split a line into its fields.
    ///
    /// # Errors
    /// [Malformed] holding the leading fragments if the line does not have exactly
    /// three fields.
    pub fn parse(line: &'a str) -> Result<Self, Malformed<'a>> {
        let line = line.trim();
        let parts: Vec<&str> = line.split(SEPARATOR).collect();
        match parts[..] {
            [timestamp, topic, payload] => Ok(CaptureLine {
                timestamp,
                topic,
                payload,
            }),
            _ => Err(Malformed {
                timestamp: parts[0],
                topic: parts.get(1).copied(),
                fields: parts.len(),
            }),
        }
    }
}

/// Render a capture line for `payload`, without a trailing newline.
#[must_use]
pub fn format_line(timestamp: &str, topic: &str, payload: &[u8]) -> String {
    format!(
        "{timestamp}{SEPARATOR}{topic}{SEPARATOR}{}",
        crate::hex::encode_bytes(payload)
    )
}

/// Whether a line holds no record and should be skipped.
#[must_use]
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn parse_three_fields() {
        let zult = CaptureLine::parse("  01.02.2025 10:11:12 | msh/EU_868/2/e/LongFast/!abcd | 0a00\n")
            .unwrap();

        assert_eq!(zult.timestamp, "01.02.2025 10:11:12");
        assert_eq!(zult.topic, "msh/EU_868/2/e/LongFast/!abcd");
        assert_eq!(zult.payload, "0a00");
    }

    #[test_case("2024-01-01 | msh/2/e/x", "2024-01-01", Some("msh/2/e/x"), 2 ; "two fields")]
    #[test_case("garbage", "garbage", None, 1 ; "one field")]
    #[test_case("a | b | c | d", "a", Some("b"), 4 ; "four fields")]
    #[test_case("a|b|c", "a|b|c", None, 1 ; "separator needs spaces")]
    fn parse_malformed(line: &str, timestamp: &str, topic: Option<&str>, fields: usize) {
        let zult = CaptureLine::parse(line).unwrap_err();

        assert_eq!(
            zult,
            Malformed {
                timestamp,
                topic,
                fields
            }
        );
    }

    #[test]
    fn format_is_parseable() {
        let line = format_line("03.04.2025 01:02:03", "msh/2/map/", &[0xde, 0xad]);
        assert_eq!(line, "03.04.2025 01:02:03 | msh/2/map/ | dead");

        let zult = CaptureLine::parse(&line).unwrap();
        assert_eq!(zult.payload, "dead");
    }

    #[test]
    fn blank_lines() {
        assert!(is_blank(""));
        assert!(is_blank(" \t\r"));
        assert!(!is_blank(" x "));
    }
}
