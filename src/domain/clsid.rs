//! Activator class id derived from the AUMI
//!
//! The OS launches (or calls into) the process through a COM class id that is
//! written to the registry. It must be stable for a given AUMI across runs,
//! so it is derived from the AUMI text instead of being random.
//!
//! Known weakness: AUMIs longer than 16 UTF-16 units are hashed and only the
//! decimal digits of the hash are used, so collisions are possible. Registry
//! entries of existing installs key on this value; keep the scheme as is.

use std::fmt;

const SHORT_ID_UNITS: usize = 16;
const GUID_DIGITS: usize = 32;
/// Digit counts of the five GUID groups
const GROUPS: [usize; 5] = [8, 4, 4, 4, 12];

const FNV_OFFSET_BASIS: u64 = 14_695_981_039_346_656_037;
const FNV_PRIME: u64 = 1_099_511_628_211;

/// Class id in registry form, without braces
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Clsid(String);

impl Clsid {
    /// Derive the class id for an AUMI
    pub fn from_aumi(aumi: &str) -> Self {
        let units: Vec<u16> = aumi.encode_utf16().collect();
        if units.len() <= SHORT_ID_UNITS {
            Self::from_units(&units)
        } else {
            Self::from_hash(&units)
        }
    }

    /// Each UTF-16 unit becomes a two-digit (at least) hex byte
    fn from_units(units: &[u16]) -> Self {
        let hex: Vec<String> = (0..SHORT_ID_UNITS)
            .map(|i| format!("{:02x}", units.get(i).copied().unwrap_or(0)))
            .collect();

        let mut byte_groups = Vec::with_capacity(GROUPS.len());
        let mut start = 0;
        for digits in GROUPS {
            let bytes = digits / 2;
            byte_groups.push(hex[start..start + bytes].concat());
            start += bytes;
        }
        Self(byte_groups.join("-"))
    }

    /// Decimal digits of the string hash fill the GUID slots, zero padded
    fn from_hash(units: &[u16]) -> Self {
        let digits = string_hash(units).to_string();
        let slots: Vec<char> = digits
            .chars()
            .chain(std::iter::repeat('0'))
            .take(GUID_DIGITS)
            .collect();

        let mut groups = Vec::with_capacity(GROUPS.len());
        let mut start = 0;
        for len in GROUPS {
            groups.push(slots[start..start + len].iter().collect::<String>());
            start += len;
        }
        Self(groups.join("-"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value, for registering the class with COM.
    ///
    /// `None` when a short AUMI contained characters above U+00FF, which
    /// widen their group past the 32 hex digits of a GUID.
    pub fn to_u128(&self) -> Option<u128> {
        let digits: String = self.0.chars().filter(|c| *c != '-').collect();
        if digits.len() != GUID_DIGITS {
            return None;
        }
        u128::from_str_radix(&digits, 16).ok()
    }

    /// `{xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx}` as stored in the registry
    pub fn braced(&self) -> String {
        format!("{{{}}}", self.0)
    }
}

impl fmt::Display for Clsid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 64-bit FNV-1a over the UTF-16LE bytes of the string
fn string_hash(units: &[u16]) -> u64 {
    units
        .iter()
        .flat_map(|unit| unit.to_le_bytes())
        .fold(FNV_OFFSET_BASIS, |hash, byte| {
            (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
        })
}
