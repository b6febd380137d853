//! Conversion between 16-byte buffers and hexadecimal strings.

use crate::{ParseError, Uuid};

/// Reads 16 octets out of a string containing 32 hexadecimal digits.
///
/// Octets are pairs of adjacent hexadecimal digits (in either case) taken from left to right.
/// Every other character, including an unpaired digit, is skipped, so the canonical
/// 8-4-4-4-12 form, the braced form, and the plain 32-digit form all parse the same way. Use
/// [`str::parse::<Uuid>`](Uuid) when only the canonical form should be accepted. Scanning stops
/// at the 16th octet, and whatever follows it is ignored.
///
/// # Errors
///
/// Returns [`ParseError::OctetCount`] if fewer than 16 octets are found.
///
/// # Examples
///
/// ```rust
/// let bytes = rfc4122::parse("{6EC0BD7F-11C0-43DA-975E-2A8AD9EBAE0B}")?;
/// assert_eq!(bytes[..4], [0x6e, 0xc0, 0xbd, 0x7f]);
/// # Ok::<(), rfc4122::ParseError>(())
/// ```
pub fn parse(src: &str) -> Result<[u8; 16], ParseError> {
    let mut dst = [0u8; 16];
    let mut found = 0;
    let mut iter = src.chars().map(|c| c.to_digit(16)).peekable();
    while let Some(e) = iter.next() {
        let (Some(hi), Some(&Some(lo))) = (e, iter.peek()) else {
            continue;
        };
        iter.next();
        dst[found] = ((hi << 4) | lo) as u8;
        found += 1;
        if found == dst.len() {
            return Ok(dst);
        }
    }
    Err(ParseError::OctetCount { found })
}

/// Renders a 16-byte buffer as the canonical lowercase 8-4-4-4-12 hexadecimal string.
///
/// # Examples
///
/// ```rust
/// let text = rfc4122::unparse(&[
///     0x6e, 0xc0, 0xbd, 0x7f, 0x11, 0xc0, 0x43, 0xda, 0x97, 0x5e, 0x2a, 0x8a, 0xd9, 0xeb, 0xae,
///     0x0b,
/// ]);
/// assert_eq!(text, "6ec0bd7f-11c0-43da-975e-2a8ad9ebae0b");
/// ```
pub fn unparse(src: &[u8; 16]) -> String {
    Uuid::from(*src).to_string()
}

#[cfg(test)]
mod tests {
    use super::{parse, unparse};
    use crate::ParseError;

    /// Unparses the documented example
    #[test]
    fn unparses_the_documented_example() {
        let bytes = [
            0x6e, 0xc0, 0xbd, 0x7f, 0x11, 0xc0, 0x43, 0xda, 0x97, 0x5e, 0x2a, 0x8a, 0xd9, 0xeb,
            0xae, 0x0b,
        ];
        assert_eq!(unparse(&bytes), "6ec0bd7f-11c0-43da-975e-2a8ad9ebae0b");
        assert_eq!(parse("6ec0bd7f-11c0-43da-975e-2a8ad9ebae0b"), Ok(bytes));
    }

    /// Parses what it unparses
    #[test]
    fn parses_what_it_unparses() {
        use rand::RngCore;
        let mut rng = rand::thread_rng();
        for _ in 0..10_000 {
            let mut bytes = [0u8; 16];
            rng.fill_bytes(&mut bytes);
            let text = unparse(&bytes);
            assert_eq!(text.len(), 36);
            assert_eq!(parse(&text), Ok(bytes));
        }
    }

    /// Ignores separators and letter case
    #[test]
    fn ignores_separators_and_letter_case() {
        let expected = parse("6ec0bd7f-11c0-43da-975e-2a8ad9ebae0b").unwrap();
        let cases = [
            "6EC0BD7F-11C0-43DA-975E-2A8AD9EBAE0B",
            "6ec0bd7f11c043da975e2a8ad9ebae0b",
            "{6ec0bd7f-11c0-43da-975e-2a8ad9ebae0b}",
            "urn:uuid:6ec0bd7f-11c0-43da-975e-2a8ad9ebae0b",
            "6e:c0:bd:7f:11:c0:43:da:97:5e:2a:8a:d9:eb:ae:0b",
            " 6ec0bd7f 11c0 43da 975e 2a8ad9ebae0b ",
        ];

        for e in cases {
            assert_eq!(parse(e), Ok(expected), "{}", e);
        }
    }

    /// Skips unpaired hexadecimal digits
    #[test]
    fn skips_unpaired_hexadecimal_digits() {
        let bytes = parse("6-ec0bd7f11c043da975e2a8ad9ebae0b11").unwrap();
        assert_eq!(unparse(&bytes), "ec0bd7f1-1c04-3da9-75e2-a8ad9ebae0b1");
    }

    /// Takes first sixteen octets of longer input
    #[test]
    fn takes_first_sixteen_octets_of_longer_input() {
        let expected = [
            0x6e, 0xc0, 0xbd, 0x7f, 0x11, 0xc0, 0x43, 0xda, 0x97, 0x5e, 0x2a, 0x8a, 0xd9, 0xeb,
            0xae, 0x0b,
        ];
        assert_eq!(parse("6ec0bd7f-11c0-43da-975e-2a8ad9ebae0b00"), Ok(expected));
        assert_eq!(
            parse("6ec0bd7f-11c0-43da-975e-2a8ad9ebae0b0011223344"),
            Ok(expected)
        );
        assert_eq!(parse("6ec0bd7f11c043da975e2a8ad9ebae0bxyz-g"), Ok(expected));
    }

    /// Returns error when fewer than sixteen octets are found
    #[test]
    fn returns_error_when_fewer_than_sixteen_octets_are_found() {
        let cases = [
            ("", 0),
            ("xyz", 0),
            ("6ec0bd7f-11c0-43da-975e-2a8ad9ebae", 15),
            ("6ec0bd7f-11c0-43da-975e-2a8ad9ebae0", 15),
            ("6g-c0bd7f-11c0-43da-975e-2a8ad9ebae0b", 15),
        ];

        for (text, found) in cases {
            assert_eq!(parse(text), Err(ParseError::OctetCount { found }), "{}", text);
        }
    }
}
