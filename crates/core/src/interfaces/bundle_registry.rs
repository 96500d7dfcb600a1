//! Installed-bundle lookup used for default builder-home discovery

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::path::PathBuf;

/// OSGi-style version: `major.minor.micro.qualifier`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleVersion {
    pub major: u64,
    pub minor: u64,
    pub micro: u64,
    pub qualifier: String,
}

impl BundleVersion {
    /// Parse leniently: missing numeric segments default to zero, an
    /// unparsable numeric segment yields `None`
    pub fn parse(text: &str) -> Option<Self> {
        let mut parts = text.trim().splitn(4, '.');
        let number = |part: Option<&str>| -> Option<u64> {
            match part {
                None | Some("") => Some(0),
                Some(p) => p.parse().ok(),
            }
        };
        let major = number(parts.next())?;
        let minor = number(parts.next())?;
        let micro = number(parts.next())?;
        let qualifier = parts.next().unwrap_or("").to_string();
        Some(Self {
            major,
            minor,
            micro,
            qualifier,
        })
    }
}

impl Ord for BundleVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.micro, &self.qualifier).cmp(&(
            other.major,
            other.minor,
            other.micro,
            &other.qualifier,
        ))
    }
}

impl PartialOrd for BundleVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for BundleVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.micro)?;
        if !self.qualifier.is_empty() {
            write!(f, ".{}", self.qualifier)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bundle {
    pub symbolic_name: String,
    pub version: BundleVersion,
    /// Installation directory
    pub location: PathBuf,
}

/// A namespace exported by a provider; `bundle` is `None` when the provider
/// is not backed by an installed bundle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedPackage {
    pub name: String,
    pub bundle: Option<Bundle>,
}

pub trait BundleRegistry: Send + Sync {
    /// Every provider exporting `namespace`
    fn exported_packages(&self, namespace: &str) -> Vec<ExportedPackage>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_versions() {
        let v = BundleVersion::parse("0.9.2.20101012").unwrap();
        assert_eq!((v.major, v.minor, v.micro), (0, 9, 2));
        assert_eq!(v.qualifier, "20101012");
        assert_eq!(BundleVersion::parse("1").unwrap().to_string(), "1.0.0");
        assert!(BundleVersion::parse("one.two").is_none());
    }

    #[test]
    fn test_version_ordering() {
        let older = BundleVersion::parse("0.9.1").unwrap();
        let newer = BundleVersion::parse("0.10").unwrap();
        let qualified = BundleVersion::parse("0.10.0.rc1").unwrap();
        assert!(older < newer);
        assert!(newer < qualified);
    }
}
