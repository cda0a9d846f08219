//! IPv4 address codec — dotted-decimal text to 32-bit words and back.
//!
//! Addresses travel through the maze in two forms that must stay in step:
//! the display text (`"10.2.1.1"`) and the packed big-endian `u32` used for
//! mask arithmetic. `encode`/`decode` convert between them; `child_address`
//! derives a child's text from its parent's during tree growth.

use std::fmt;

/// Malformed dotted-decimal address text.
///
/// Carries the offending input so callers can log it before applying the
/// zero fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidAddressFormat(pub String);

impl fmt::Display for InvalidAddressFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid IPv4 address text: {:?}", self.0)
    }
}

/// Parse four dot-separated decimal octets into a big-endian `u32`.
///
/// Surrounding whitespace is tolerated. Wrong segment counts, non-numeric
/// segments, and octets outside 0–255 are all rejected.
pub fn encode(text: &str) -> Result<u32, InvalidAddressFormat> {
    let mut octets = [0u8; 4];
    let mut count = 0usize;
    for segment in text.trim().split('.') {
        if count == 4 {
            return Err(InvalidAddressFormat(text.to_string()));
        }
        octets[count] = segment
            .parse::<u8>()
            .map_err(|_| InvalidAddressFormat(text.to_string()))?;
        count += 1;
    }
    if count != 4 {
        return Err(InvalidAddressFormat(text.to_string()));
    }
    Ok(from_octets(octets))
}

/// Parse with the permissive fallback: malformed text becomes `0.0.0.0`.
///
/// The original maze shipped with this recovery and level data may lean on
/// it, so it is kept as a named policy rather than a silent default.
/// Callers that can log should report the substitution (see
/// `InvalidAddressFormat`) before using the result.
pub fn encode_or_zero(text: &str) -> u32 {
    encode(text).unwrap_or(0)
}

/// Format a packed address as dotted decimal, bits 31–24 first.
pub fn decode(ip: u32) -> String {
    let o = octets(ip);
    format!("{}.{}.{}.{}", o[0], o[1], o[2], o[3])
}

/// Split a packed address into octets, first octet from bits 31–24.
pub fn octets(ip: u32) -> [u8; 4] {
    ip.to_be_bytes()
}

/// Pack four octets, the first into bits 31–24.
pub fn from_octets(octets: [u8; 4]) -> u32 {
    u32::from_be_bytes(octets)
}

/// Derive a child's address text: the parent's dotted segments with the
/// segment at `octet_index` replaced by `branch_index + 1` (branches are
/// numbered from 1).
///
/// The replacement is textual, so a branch number past 255 yields text
/// that `encode` rejects and the zero fallback absorbs. An `octet_index`
/// beyond the parent's segments leaves the address unchanged.
pub fn child_address(parent: &str, octet_index: usize, branch_index: u32) -> String {
    let mut segments: Vec<String> = parent.trim().split('.').map(str::to_string).collect();
    if let Some(segment) = segments.get_mut(octet_index) {
        *segment = (branch_index + 1).to_string();
    }
    segments.join(".")
}
