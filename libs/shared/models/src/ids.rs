use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier shared by catalog entries and favorites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DoctorId(pub u32);

impl DoctorId {
    /// Parses a route segment. Only plain unsigned integers are accepted;
    /// anything else is treated as a lookup miss by callers.
    pub fn from_route(segment: &str) -> Option<Self> {
        if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        segment.parse().ok()
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl From<u32> for DoctorId {
    fn from(value: u32) -> Self {
        DoctorId(value)
    }
}

impl FromStr for DoctorId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u32>().map(DoctorId)
    }
}

impl fmt::Display for DoctorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_parsing() {
        assert_eq!(DoctorId::from_route("7"), Some(DoctorId(7)));
        assert_eq!(DoctorId::from_route("0"), Some(DoctorId(0)));
        assert_eq!(DoctorId::from_route(""), None);
        assert_eq!(DoctorId::from_route("abc"), None);
        assert_eq!(DoctorId::from_route("12abc"), None);
        assert_eq!(DoctorId::from_route("-3"), None);
        assert_eq!(DoctorId::from_route("+3"), None);
    }

    #[test]
    fn test_serializes_as_plain_integer() {
        let json = serde_json::to_string(&vec![DoctorId(1), DoctorId(42)]).unwrap();
        assert_eq!(json, "[1,42]");
    }
}
