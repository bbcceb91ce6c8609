use clap::ValueEnum;

pub mod harness;
pub mod profile;
pub mod provider;
pub mod report;
pub mod schema;

/// Primitive group(s) to benchmark.
#[derive(Clone, Copy, Debug, Default, ValueEnum, PartialEq, Eq)]
pub enum PrimitiveGroup {
    /// Run every primitive benchmark.
    #[default]
    All,
    /// XSalsa20 stream XOR only.
    Stream,
    /// Poly1305 one-time authenticator only.
    Onetimeauth,
    /// Secretbox, both the low-level detached form and seal/open.
    Secretbox,
    /// SHA-512 hashing (1K and 16K payloads).
    Hash,
    /// X25519 base-point scalar multiplication only.
    Scalarmult,
    /// Curve25519 box seal/open with keypair setup.
    Box,
    /// Ed25519 sign/open with keypair setup.
    Sign,
}
