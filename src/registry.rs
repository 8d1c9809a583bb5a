//! Digest name parsing and the runtime dispatch façade.
//!
//! Maps the case-insensitive algorithm names a caller (typically the CLI)
//! passes on the command line to a concrete [`Hasher`] implementation,
//! without the caller needing to name the concrete `Context` type.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use crate::digest::Hasher;
use crate::error::Error;

/// The set of digest algorithms the registry knows how to name and build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DigestKind {
    #[cfg(feature = "md5")]
    Md5,
    #[cfg(feature = "sha1")]
    Sha1,
    #[cfg(feature = "sha2")]
    Sha224,
    #[cfg(feature = "sha2")]
    Sha256,
    #[cfg(feature = "sha2")]
    Sha512,
}

impl DigestKind {
    /// Canonical lowercase name, used for display and as the preferred spelling.
    pub const fn name(self) -> &'static str {
        match self {
            #[cfg(feature = "md5")]
            DigestKind::Md5 => "md5",
            #[cfg(feature = "sha1")]
            DigestKind::Sha1 => "sha1",
            #[cfg(feature = "sha2")]
            DigestKind::Sha224 => "sha224",
            #[cfg(feature = "sha2")]
            DigestKind::Sha256 => "sha256",
            #[cfg(feature = "sha2")]
            DigestKind::Sha512 => "sha512",
        }
    }

    /// Output size in bytes of this algorithm's digest.
    pub const fn output_bytes(self) -> usize {
        match self {
            #[cfg(feature = "md5")]
            DigestKind::Md5 => 16,
            #[cfg(feature = "sha1")]
            DigestKind::Sha1 => 20,
            #[cfg(feature = "sha2")]
            DigestKind::Sha224 => 28,
            #[cfg(feature = "sha2")]
            DigestKind::Sha256 => 32,
            #[cfg(feature = "sha2")]
            DigestKind::Sha512 => 64,
        }
    }

    /// Build a fresh streaming context for this algorithm, boxed behind the
    /// object-safe [`Hasher`] trait.
    pub fn new_hasher(self) -> Box<dyn Hasher> {
        match self {
            #[cfg(feature = "md5")]
            DigestKind::Md5 => Box::new(crate::hashing::md5::Context::new()),
            #[cfg(feature = "sha1")]
            DigestKind::Sha1 => Box::new(crate::hashing::sha1::Context::new()),
            #[cfg(feature = "sha2")]
            DigestKind::Sha224 => Box::new(crate::hashing::sha2::Context224::new()),
            #[cfg(feature = "sha2")]
            DigestKind::Sha256 => Box::new(crate::hashing::sha2::Context256::new()),
            #[cfg(feature = "sha2")]
            DigestKind::Sha512 => Box::new(crate::hashing::sha2::Context512::new()),
        }
    }
}

/// Parse a single digest name, case-insensitively, accepting the common
/// punctuation variants (`sha-256`, `sha_256`, `SHA256`, `sha256` all name
/// the same algorithm).
pub fn parse_digest_name(name: &str) -> Result<DigestKind, Error> {
    let normalized: String = name
        .chars()
        .filter(|c| *c != '-' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect();

    match normalized.as_str() {
        #[cfg(feature = "md5")]
        "md5" => Ok(DigestKind::Md5),
        #[cfg(feature = "sha1")]
        "sha1" => Ok(DigestKind::Sha1),
        #[cfg(feature = "sha2")]
        "sha224" => Ok(DigestKind::Sha224),
        #[cfg(feature = "sha2")]
        "sha256" => Ok(DigestKind::Sha256),
        #[cfg(feature = "sha2")]
        "sha512" => Ok(DigestKind::Sha512),
        _ => Err(Error::Argument {
            name: "digest",
            reason: alloc::format!("unknown digest name {name:?}"),
        }),
    }
}

/// Parse a comma-separated list of digest names, selecting a set of digests
/// to compute in one pass. Whitespace around each entry is ignored.
pub fn parse_digest_list(names: &str) -> Result<Vec<DigestKind>, Error> {
    names.split(',').map(|n| parse_digest_name(n.trim())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "sha2")]
    #[test]
    fn parses_punctuation_variants() {
        for spelling in ["sha256", "SHA256", "sha-256", "sha_256", "Sha-256"] {
            assert_eq!(parse_digest_name(spelling).unwrap(), DigestKind::Sha256);
        }
    }

    #[test]
    fn rejects_unknown_name() {
        assert!(parse_digest_name("sha3-256").is_err());
    }

    #[cfg(all(feature = "md5", feature = "sha1", feature = "sha2"))]
    #[test]
    fn parses_list() {
        let kinds = parse_digest_list("md5, sha1,sha256").unwrap();
        assert_eq!(kinds, [DigestKind::Md5, DigestKind::Sha1, DigestKind::Sha256]);
    }
}
