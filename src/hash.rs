use crate::error::Error;

use bytes::Bytes;
use core::str::FromStr;
use digest::Digest;
use sha2::Sha256;
use sha3::{
    Sha3_224,
    Sha3_256,
    Sha3_384,
    Sha3_512,
};

/// Hash algorithms selectable at tree construction. Parsed from the
/// conventional identifiers `sha256`, `sha3-224`, `sha3-256`, `sha3-384`,
/// and `sha3-512`; anything else is a configuration error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HashAlgorithm {
    #[default]
    Sha256,
    Sha3_224,
    Sha3_256,
    Sha3_384,
    Sha3_512,
}

impl FromStr for HashAlgorithm {
    type Err = Error;

    fn from_str(identifier: &str) -> Result<Self, Self::Err> {
        match identifier {
            "sha256" => Ok(Self::Sha256),
            "sha3-224" => Ok(Self::Sha3_224),
            "sha3-256" => Ok(Self::Sha3_256),
            "sha3-384" => Ok(Self::Sha3_384),
            "sha3-512" => Ok(Self::Sha3_512),
            other => Err(Error::Configuration(other.to_string())),
        }
    }
}

fn sum<D: Digest>(data: &[u8]) -> Bytes {
    let mut hash = D::new();
    hash.update(data);
    Bytes::copy_from_slice(hash.finalize().as_slice())
}

/// Deterministic bytes-to-bytes hashing with the algorithm fixed at
/// construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Hasher {
    algorithm: HashAlgorithm,
}

impl Hasher {
    pub fn new(algorithm: HashAlgorithm) -> Self {
        Self { algorithm }
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Apply the configured hash once.
    pub fn digest(&self, data: &[u8]) -> Bytes {
        match self.algorithm {
            HashAlgorithm::Sha256 => sum::<Sha256>(data),
            HashAlgorithm::Sha3_224 => sum::<Sha3_224>(data),
            HashAlgorithm::Sha3_256 => sum::<Sha3_256>(data),
            HashAlgorithm::Sha3_384 => sum::<Sha3_384>(data),
            HashAlgorithm::Sha3_512 => sum::<Sha3_512>(data),
        }
    }

    /// Apply the configured hash twice in sequence: the outer application
    /// hashes the inner application's output.
    pub fn double_digest(&self, data: &[u8]) -> Bytes {
        self.digest(&self.digest(data))
    }

    /// One application, or two when `double` is set.
    pub fn sum(&self, data: &[u8], double: bool) -> Bytes {
        if double {
            self.double_digest(data)
        } else {
            self.digest(data)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn from_str_parses_all_supported_identifiers() {
        assert_eq!("sha256".parse::<HashAlgorithm>(), Ok(HashAlgorithm::Sha256));
        assert_eq!(
            "sha3-224".parse::<HashAlgorithm>(),
            Ok(HashAlgorithm::Sha3_224)
        );
        assert_eq!(
            "sha3-256".parse::<HashAlgorithm>(),
            Ok(HashAlgorithm::Sha3_256)
        );
        assert_eq!(
            "sha3-384".parse::<HashAlgorithm>(),
            Ok(HashAlgorithm::Sha3_384)
        );
        assert_eq!(
            "sha3-512".parse::<HashAlgorithm>(),
            Ok(HashAlgorithm::Sha3_512)
        );
    }

    #[test]
    fn from_str_rejects_unknown_identifiers() {
        let err = "md5".parse::<HashAlgorithm>().unwrap_err();
        assert_eq!(err, Error::Configuration("md5".to_string()));
    }

    #[test]
    fn digest_returns_the_sha256_of_the_input() {
        let hasher = Hasher::new(HashAlgorithm::Sha256);

        let digest = hasher.digest(b"hello");
        let expected =
            hex::decode("2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824")
                .unwrap();
        assert_eq!(digest.as_ref(), expected.as_slice());
    }

    #[test]
    fn double_digest_hashes_the_digest_of_the_input() {
        let hasher = Hasher::new(HashAlgorithm::Sha256);

        let digest = hasher.double_digest(b"hello");
        let expected =
            hex::decode("9595c9df90075148eb06860365df33584b75bff782a510c6cd4883a419833d50")
                .unwrap();
        assert_eq!(digest.as_ref(), expected.as_slice());
    }

    #[test]
    fn digest_dispatches_to_the_configured_sha3_variant() {
        let data = b"hello";

        let digest = Hasher::new(HashAlgorithm::Sha3_224).digest(data);
        assert_eq!(digest.as_ref(), Sha3_224::digest(data).as_slice());

        let digest = Hasher::new(HashAlgorithm::Sha3_256).digest(data);
        assert_eq!(digest.as_ref(), Sha3_256::digest(data).as_slice());

        let digest = Hasher::new(HashAlgorithm::Sha3_384).digest(data);
        assert_eq!(digest.as_ref(), Sha3_384::digest(data).as_slice());

        let digest = Hasher::new(HashAlgorithm::Sha3_512).digest(data);
        assert_eq!(digest.as_ref(), Sha3_512::digest(data).as_slice());
    }

    #[test]
    fn digest_of_the_empty_input_matches_the_known_sha3_256_sum() {
        let hasher = Hasher::new(HashAlgorithm::Sha3_256);

        let digest = hasher.digest(b"");
        let expected =
            hex::decode("a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a")
                .unwrap();
        assert_eq!(digest.as_ref(), expected.as_slice());
    }

    #[test]
    fn sum_applies_the_hash_once_or_twice_per_the_double_flag() {
        let hasher = Hasher::new(HashAlgorithm::Sha256);

        assert_eq!(hasher.sum(b"data", false), hasher.digest(b"data"));
        assert_eq!(hasher.sum(b"data", true), hasher.double_digest(b"data"));
    }
}
