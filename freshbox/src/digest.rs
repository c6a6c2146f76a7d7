//! Digest accumulators used to derive entity tags from response bodies.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Incremental digest over a response body.
///
/// Chunks are fed in body-write order. Accumulation is inherently sequential
/// and must never be split across threads for one body.
pub trait EntityDigest {
    /// Feed the next chunk of body bytes.
    fn update(&mut self, chunk: &[u8]);

    /// Consume the accumulator and return the raw digest bytes.
    fn finish(self) -> Vec<u8>;
}

/// Render digest bytes as a strong entity tag: quoted uppercase hex.
pub fn entity_tag(digest: &[u8]) -> String {
    format!("\"{}\"", hex::encode_upper(digest))
}

/// 128-bit MD5 accumulator. Produces the same tags as existing deployments.
#[derive(Clone)]
pub struct Md5Digest(md5::Context);

impl Md5Digest {
    pub fn new() -> Self {
        Self(md5::Context::new())
    }
}

impl Default for Md5Digest {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Md5Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Md5Digest").finish_non_exhaustive()
    }
}

impl EntityDigest for Md5Digest {
    fn update(&mut self, chunk: &[u8]) {
        self.0.consume(chunk);
    }

    fn finish(self) -> Vec<u8> {
        self.0.compute().0.to_vec()
    }
}

/// SHA-256 accumulator.
#[derive(Debug, Clone, Default)]
pub struct Sha256Digest(Sha256);

impl Sha256Digest {
    pub fn new() -> Self {
        Self(Sha256::new())
    }
}

impl EntityDigest for Sha256Digest {
    fn update(&mut self, chunk: &[u8]) {
        Digest::update(&mut self.0, chunk);
    }

    fn finish(self) -> Vec<u8> {
        self.0.finalize().to_vec()
    }
}

/// Digest algorithm selectable from configuration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq, Default)]
pub enum DigestAlgorithm {
    #[default]
    Md5,
    Sha256,
}

impl DigestAlgorithm {
    /// Start a fresh accumulator for this algorithm.
    pub fn digest(&self) -> AnyDigest {
        match self {
            Self::Md5 => AnyDigest::Md5(Md5Digest::new()),
            Self::Sha256 => AnyDigest::Sha256(Sha256Digest::new()),
        }
    }
}

/// Accumulator chosen at runtime through [`DigestAlgorithm`].
#[derive(Debug, Clone)]
pub enum AnyDigest {
    Md5(Md5Digest),
    Sha256(Sha256Digest),
}

impl Default for AnyDigest {
    fn default() -> Self {
        DigestAlgorithm::default().digest()
    }
}

impl EntityDigest for AnyDigest {
    fn update(&mut self, chunk: &[u8]) {
        match self {
            Self::Md5(digest) => digest.update(chunk),
            Self::Sha256(digest) => digest.update(chunk),
        }
    }

    fn finish(self) -> Vec<u8> {
        match self {
            Self::Md5(digest) => digest.finish(),
            Self::Sha256(digest) => digest.finish(),
        }
    }
}
