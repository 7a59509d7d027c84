//! Register word list loading
//!
//! A register file is a raw dump of the words to write, in write order:
//! decimal or `0x`-prefixed hex numbers separated by whitespace or commas.
//! `#` starts a comment that runs to the end of the line.

use crate::error::CliError;
use std::path::Path;

/// Parse a string as a hex or decimal u32
pub fn parse_hex_u32(s: &str) -> Result<u32, String> {
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16).map_err(|e| format!("Invalid hex value: {}", e))
    } else {
        s.parse::<u32>().map_err(|e| format!("Invalid number: {}", e))
    }
}

/// Parse register words from text
pub fn parse_words(path: &Path, text: &str) -> Result<Vec<u32>, CliError> {
    let mut words = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let line = line.split('#').next().unwrap_or("");
        for token in line
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|t| !t.is_empty())
        {
            let word = parse_hex_u32(token).map_err(|_| CliError::ParseRegs {
                path: path.to_path_buf(),
                line: i + 1,
                token: token.to_string(),
            })?;
            words.push(word);
        }
    }
    Ok(words)
}

/// Load register words from a file
pub fn load_words(path: &Path) -> Result<Vec<u32>, CliError> {
    let text = std::fs::read_to_string(path).map_err(|e| CliError::ReadRegs {
        path: path.to_path_buf(),
        source: e,
    })?;
    let words = parse_words(path, &text)?;
    log::debug!("Loaded {} register words from {}", words.len(), path.display());
    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rfclk_core::regs::Lmk04208Regs;
    use rfclk_core::Error;

    #[test]
    fn test_parse_hex_u32() {
        assert_eq!(parse_hex_u32("0x2F"), Ok(0x2F));
        assert_eq!(parse_hex_u32("0X00241c"), Ok(0x241C));
        assert_eq!(parse_hex_u32("47"), Ok(47));
        assert!(parse_hex_u32("0xZZ").is_err());
        assert!(parse_hex_u32("-1").is_err());
    }

    #[test]
    fn test_parse_words_separators_and_comments() {
        let text = "# R112..R110\n0x700000, 0x6F0000\n0x6E0000 # trailing\n\n42\n";
        let words = parse_words(Path::new("regs.txt"), text).unwrap();
        assert_eq!(words, vec![0x700000, 0x6F0000, 0x6E0000, 42]);
    }

    #[test]
    fn test_parse_words_reports_line() {
        let text = "0x1\n0x2 nope\n";
        match parse_words(Path::new("regs.txt"), text) {
            Err(CliError::ParseRegs { line, token, .. }) => {
                assert_eq!(line, 2);
                assert_eq!(token, "nope");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_wrong_count_rejected_before_bus() {
        let words = parse_words(Path::new("regs.txt"), "1 2 3").unwrap();
        assert_eq!(
            Lmk04208Regs::try_from(&words[..]),
            Err(Error::RegisterCountMismatch {
                expected: 26,
                found: 3
            })
        );
    }
}
