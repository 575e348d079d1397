//! Build target selection

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ShimError;

/// Deployment target a build is resolved for
///
/// Chosen once per resolution. A resolved build keeps its target for its
/// whole lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformTarget {
    Native,
    Web,
}

impl PlatformTarget {
    pub const fn as_str(&self) -> &'static str {
        match self {
            PlatformTarget::Native => "native",
            PlatformTarget::Web => "web",
        }
    }

    pub fn is_web(&self) -> bool {
        *self == PlatformTarget::Web
    }
}

impl fmt::Display for PlatformTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PlatformTarget {
    type Err = ShimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "native" | "ios" | "android" => Ok(PlatformTarget::Native),
            "web" | "browser" => Ok(PlatformTarget::Web),
            other => Err(ShimError::InvalidTarget(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!("web".parse::<PlatformTarget>().unwrap(), PlatformTarget::Web);
        assert_eq!(" Browser ".parse::<PlatformTarget>().unwrap(), PlatformTarget::Web);
        assert_eq!("android".parse::<PlatformTarget>().unwrap(), PlatformTarget::Native);
        assert!(matches!(
            "desktop".parse::<PlatformTarget>(),
            Err(ShimError::InvalidTarget(_))
        ));
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&PlatformTarget::Native).unwrap();
        assert_eq!(json, "\"native\"");
    }
}
