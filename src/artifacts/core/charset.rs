//! Text decoding for object payloads
//!
//! Payloads are decoded as UTF-8 first. Commit messages written by old
//! tooling are sometimes in a legacy 8-bit encoding, so when UTF-8 fails a
//! [`CharsetDetector`] picks a single-byte charset and the payload is decoded
//! lossily. Decoding never fails.

use std::borrow::Cow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Charset {
    Utf8,
    Latin1,
    Windows1252,
}

/// Windows-1252 code points for bytes 0x80..=0x9F; `None` marks the five
/// bytes the code page leaves undefined
const WINDOWS_1252_C1: [Option<char>; 32] = [
    Some('\u{20AC}'),
    None,
    Some('\u{201A}'),
    Some('\u{0192}'),
    Some('\u{201E}'),
    Some('\u{2026}'),
    Some('\u{2020}'),
    Some('\u{2021}'),
    Some('\u{02C6}'),
    Some('\u{2030}'),
    Some('\u{0160}'),
    Some('\u{2039}'),
    Some('\u{0152}'),
    None,
    Some('\u{017D}'),
    None,
    None,
    Some('\u{2018}'),
    Some('\u{2019}'),
    Some('\u{201C}'),
    Some('\u{201D}'),
    Some('\u{2022}'),
    Some('\u{2013}'),
    Some('\u{2014}'),
    Some('\u{02DC}'),
    Some('\u{2122}'),
    Some('\u{0161}'),
    Some('\u{203A}'),
    Some('\u{0153}'),
    None,
    Some('\u{017E}'),
    Some('\u{0178}'),
];

impl Charset {
    pub fn name(&self) -> &'static str {
        match self {
            Charset::Utf8 => "UTF-8",
            Charset::Latin1 => "ISO-8859-1",
            Charset::Windows1252 => "windows-1252",
        }
    }

    /// Decode `bytes`, replacing anything undecodable with U+FFFD
    pub fn decode_lossy<'a>(&self, bytes: &'a [u8]) -> Cow<'a, str> {
        match self {
            Charset::Utf8 => String::from_utf8_lossy(bytes),
            Charset::Latin1 => Cow::Owned(bytes.iter().map(|&b| b as char).collect()),
            Charset::Windows1252 => Cow::Owned(
                bytes
                    .iter()
                    .map(|&b| match b {
                        0x80..=0x9F => WINDOWS_1252_C1[(b - 0x80) as usize]
                            .unwrap_or(char::REPLACEMENT_CHARACTER),
                        _ => b as char,
                    })
                    .collect(),
            ),
        }
    }
}

impl std::fmt::Display for Charset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Picks a legacy charset for bytes that are not valid UTF-8
pub trait CharsetDetector {
    fn detect(&self, bytes: &[u8]) -> Charset;
}

/// Always answers with the same charset
#[derive(Debug, Clone, Copy)]
pub struct FixedCharset(pub Charset);

impl CharsetDetector for FixedCharset {
    fn detect(&self, _bytes: &[u8]) -> Charset {
        self.0
    }
}

/// Byte-frequency heuristic between ISO-8859-1 and Windows-1252
///
/// Real Latin-1 text practically never contains C1 control bytes
/// (0x80..=0x9F) while Windows-1252 uses that range for curly quotes, dashes
/// and the euro sign. Text whose C1 bytes are mostly defined Windows-1252
/// characters is treated as Windows-1252; everything else as Latin-1.
#[derive(Debug, Clone, Copy, Default)]
pub struct ByteFrequencyDetector;

impl CharsetDetector for ByteFrequencyDetector {
    fn detect(&self, bytes: &[u8]) -> Charset {
        let (defined, undefined) = bytes
            .iter()
            .filter(|b| (0x80..=0x9F).contains(*b))
            .fold((0usize, 0usize), |(defined, undefined), &b| {
                match WINDOWS_1252_C1[(b - 0x80) as usize] {
                    Some(_) => (defined + 1, undefined),
                    None => (defined, undefined + 1),
                }
            });

        if defined > 0 && defined >= undefined {
            Charset::Windows1252
        } else {
            Charset::Latin1
        }
    }
}

/// Decode an object payload, falling back to a detected legacy charset
pub fn decode_text(bytes: &[u8], detector: &dyn CharsetDetector) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(err) => {
            let charset = detector.detect(bytes);
            tracing::warn!(
                "payload is not valid UTF-8 ({}), decoding as {}",
                err,
                charset
            );
            charset.decode_lossy(bytes).into_owned()
        }
    }
}
