//! Object kind tags

use std::fmt;
use std::str::FromStr;

/// Type tag written at the start of every object header
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    /// Raw file content
    Blob,
}

impl ObjectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectKind::Blob => "blob",
        }
    }
}

impl FromStr for ObjectKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "blob" => Ok(ObjectKind::Blob),
            other => Err(format!("unknown object kind {:?}", other)),
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parse() {
        assert_eq!("blob".parse::<ObjectKind>(), Ok(ObjectKind::Blob));
        assert!("tree".parse::<ObjectKind>().is_err());
        assert!("Blob".parse::<ObjectKind>().is_err());
    }
}
