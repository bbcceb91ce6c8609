//! NaCl-style crypto suite behind a single provider type.
//!
//! The harness treats the suite as an opaque library: every primitive is
//! reached through [`NaclSuite`], and the variant chosen at startup decides
//! which optional introspection surfaces are exposed. The primitives
//! themselves come from the RustCrypto and dalek crates; nothing
//! cryptographic is implemented here.

use crypto_box::SalsaBox;
use crypto_secretbox::aead::{Aead, AeadInPlace, KeyInit};
use crypto_secretbox::XSalsa20Poly1305;
use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use rand::RngCore;
use rand_chacha::ChaCha8Rng;
use salsa20::cipher::consts::U10;
use salsa20::cipher::{KeyIvInit, StreamCipher};
use salsa20::XSalsa20;
use sha2::{Digest, Sha512};
use thiserror::Error;
use x25519_dalek::{x25519, X25519_BASEPOINT_BYTES};

pub const NONCE_LEN: usize = 24;
pub const KEY_LEN: usize = 32;
pub const TAG_LEN: usize = 16;
pub const SIGNATURE_LEN: usize = 64;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("unknown library variant '{0}' (expected one of: fast, portable)")]
    UnknownVariant(String),
}

/// Which build of the suite to load.
///
/// `Fast` exposes the low-level core functions for detailed profiling;
/// `Portable` offers the same primitives through the high-level surface
/// only, so core introspection reports as unavailable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LibraryVariant {
    #[default]
    Fast,
    Portable,
}

impl LibraryVariant {
    pub fn resolve(name: &str) -> Result<Self, ProviderError> {
        match name {
            "fast" => Ok(LibraryVariant::Fast),
            "portable" => Ok(LibraryVariant::Portable),
            other => Err(ProviderError::UnknownVariant(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LibraryVariant::Fast => "fast",
            LibraryVariant::Portable => "portable",
        }
    }
}

pub struct BoxKeypair {
    pub public: crypto_box::PublicKey,
    pub secret: crypto_box::SecretKey,
}

pub struct SignKeypair {
    pub signing: SigningKey,
    pub verifying: VerifyingKey,
}

/// HSalsa20 core (20 rounds), the key-derivation core of XSalsa20.
fn hsalsa20_core(key: &[u8; KEY_LEN], input: &[u8; 16]) -> [u8; KEY_LEN] {
    salsa20::hsalsa::<U10>(&(*key).into(), &(*input).into()).into()
}

pub struct NaclSuite {
    variant: LibraryVariant,
}

impl NaclSuite {
    pub fn load(variant: LibraryVariant) -> Self {
        NaclSuite { variant }
    }

    pub fn variant(&self) -> LibraryVariant {
        self.variant
    }

    /// XSalsa20 keystream XOR: `out` receives `msg ^ keystream`.
    pub fn stream_xor(&self, out: &mut [u8], msg: &[u8], nonce: &[u8; NONCE_LEN], key: &[u8; KEY_LEN]) {
        out.copy_from_slice(msg);
        let mut cipher = XSalsa20::new(&(*key).into(), &(*nonce).into());
        cipher.apply_keystream(out);
    }

    /// Poly1305 one-time authenticator over `msg`.
    pub fn onetimeauth(&self, msg: &[u8], key: &[u8; KEY_LEN]) -> [u8; TAG_LEN] {
        use poly1305::universal_hash::KeyInit as _;
        let mac = poly1305::Poly1305::new(poly1305::Key::from_slice(key));
        mac.compute_unpadded(msg).into()
    }

    /// Low-level secretbox: encrypt `msg` into `out` in place, returning
    /// the detached Poly1305 tag. `out` must be `msg.len()` bytes.
    pub fn secretbox_detached(
        &self,
        out: &mut [u8],
        msg: &[u8],
        nonce: &[u8; NONCE_LEN],
        key: &[u8; KEY_LEN],
    ) -> [u8; TAG_LEN] {
        out.copy_from_slice(msg);
        let cipher = XSalsa20Poly1305::new(key.into());
        let tag = cipher
            .encrypt_in_place_detached(nonce.into(), &[], out)
            .expect("secretbox detached encryption");
        tag.into()
    }

    /// Sealed secretbox: tag-prefixed ciphertext in a fresh buffer.
    pub fn secretbox_seal(&self, msg: &[u8], nonce: &[u8; NONCE_LEN], key: &[u8; KEY_LEN]) -> Vec<u8> {
        let cipher = XSalsa20Poly1305::new(key.into());
        cipher
            .encrypt(nonce.into(), msg)
            .expect("secretbox seal")
    }

    /// Open a sealed secretbox; `None` on authentication failure.
    pub fn secretbox_open(
        &self,
        boxed: &[u8],
        nonce: &[u8; NONCE_LEN],
        key: &[u8; KEY_LEN],
    ) -> Option<Vec<u8>> {
        let cipher = XSalsa20Poly1305::new(key.into());
        cipher.decrypt(nonce.into(), boxed).ok()
    }

    /// Curve25519 keypair, deterministic from the supplied RNG.
    pub fn box_keypair(&self, rng: &mut ChaCha8Rng) -> BoxKeypair {
        let mut seed = [0u8; KEY_LEN];
        rng.fill_bytes(&mut seed);
        let secret = crypto_box::SecretKey::from(seed);
        let public = secret.public_key();
        BoxKeypair { public, secret }
    }

    /// Public-key authenticated encryption (Curve25519-XSalsa20-Poly1305).
    pub fn box_seal(
        &self,
        msg: &[u8],
        nonce: &[u8; NONCE_LEN],
        their_public: &crypto_box::PublicKey,
        my_secret: &crypto_box::SecretKey,
    ) -> Vec<u8> {
        let salsa_box = SalsaBox::new(their_public, my_secret);
        salsa_box
            .encrypt(crypto_box::Nonce::from_slice(nonce), msg)
            .expect("box seal")
    }

    /// Open a box; `None` on authentication failure.
    pub fn box_open(
        &self,
        boxed: &[u8],
        nonce: &[u8; NONCE_LEN],
        their_public: &crypto_box::PublicKey,
        my_secret: &crypto_box::SecretKey,
    ) -> Option<Vec<u8>> {
        let salsa_box = SalsaBox::new(their_public, my_secret);
        salsa_box
            .decrypt(crypto_box::Nonce::from_slice(nonce), boxed)
            .ok()
    }

    /// Ed25519 keypair, deterministic from the supplied RNG.
    pub fn sign_keypair(&self, rng: &mut ChaCha8Rng) -> SignKeypair {
        let mut seed = [0u8; KEY_LEN];
        rng.fill_bytes(&mut seed);
        let signing = SigningKey::from_bytes(&seed);
        let verifying = signing.verifying_key();
        SignKeypair { signing, verifying }
    }

    /// NaCl-style signed message: signature followed by the message.
    pub fn sign(&self, msg: &[u8], keypair: &SignKeypair) -> Vec<u8> {
        let sig = keypair.signing.sign(msg);
        let mut signed = Vec::with_capacity(SIGNATURE_LEN + msg.len());
        signed.extend_from_slice(&sig.to_bytes());
        signed.extend_from_slice(msg);
        signed
    }

    /// Verify a signed message and recover its payload.
    pub fn sign_open(&self, signed: &[u8], verifying: &VerifyingKey) -> Option<Vec<u8>> {
        if signed.len() < SIGNATURE_LEN {
            return None;
        }
        let (sig_bytes, msg) = signed.split_at(SIGNATURE_LEN);
        let sig = Signature::from_slice(sig_bytes).ok()?;
        verifying.verify(msg, &sig).ok()?;
        Some(msg.to_vec())
    }

    /// SHA-512 digest.
    pub fn hash(&self, msg: &[u8]) -> [u8; 64] {
        Sha512::digest(msg).into()
    }

    /// X25519 base-point scalar multiplication.
    pub fn scalarmult_base(&self, n: &[u8; KEY_LEN]) -> [u8; KEY_LEN] {
        x25519(*n, X25519_BASEPOINT_BYTES)
    }

    /// Core-function introspection. Only the `fast` build exposes the
    /// HSalsa20 core directly; probing returns `None` elsewhere.
    pub fn hsalsa_core(&self) -> Option<fn(&[u8; KEY_LEN], &[u8; 16]) -> [u8; KEY_LEN]> {
        match self.variant {
            LibraryVariant::Fast => Some(hsalsa20_core),
            LibraryVariant::Portable => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harness::BenchConfig;

    fn suite() -> NaclSuite {
        NaclSuite::load(LibraryVariant::Fast)
    }

    #[test]
    fn resolve_known_variants() {
        assert_eq!(LibraryVariant::resolve("fast").unwrap(), LibraryVariant::Fast);
        assert_eq!(
            LibraryVariant::resolve("portable").unwrap(),
            LibraryVariant::Portable
        );
    }

    #[test]
    fn resolve_unknown_variant_is_descriptive() {
        let err = LibraryVariant::resolve("nacl-fast.min.js").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("nacl-fast.min.js"));
        assert!(msg.contains("fast"));
        assert!(msg.contains("portable"));
    }

    #[test]
    fn stream_xor_twice_restores_plaintext() {
        let s = suite();
        let msg: Vec<u8> = (0..1024u32).map(|i| (i & 255) as u8).collect();
        let nonce = [7u8; NONCE_LEN];
        let key = [9u8; KEY_LEN];

        let mut ct = vec![0u8; msg.len()];
        s.stream_xor(&mut ct, &msg, &nonce, &key);
        assert_ne!(ct, msg);

        let mut rt = vec![0u8; msg.len()];
        s.stream_xor(&mut rt, &ct, &nonce, &key);
        assert_eq!(rt, msg);
    }

    #[test]
    fn onetimeauth_is_keyed() {
        let s = suite();
        let msg = [3u8; 64];
        let t1 = s.onetimeauth(&msg, &[1u8; KEY_LEN]);
        let t2 = s.onetimeauth(&msg, &[2u8; KEY_LEN]);
        assert_ne!(t1, t2);
    }

    #[test]
    fn secretbox_seal_open_round_trip() {
        let s = suite();
        let key = [1u8; KEY_LEN];
        let nonce = [2u8; NONCE_LEN];
        let msg = [3u8; 1024];

        let boxed = s.secretbox_seal(&msg, &nonce, &key);
        assert_eq!(boxed.len(), msg.len() + TAG_LEN);
        let opened = s.secretbox_open(&boxed, &nonce, &key).unwrap();
        assert_eq!(opened, msg);

        let mut tampered = boxed.clone();
        tampered[40] ^= 1;
        assert!(s.secretbox_open(&tampered, &nonce, &key).is_none());
    }

    #[test]
    fn secretbox_detached_matches_sealed_ciphertext() {
        let s = suite();
        let key = [1u8; KEY_LEN];
        let nonce = [2u8; NONCE_LEN];
        let msg = [3u8; 256];

        let sealed = s.secretbox_seal(&msg, &nonce, &key);
        let mut ct = vec![0u8; msg.len()];
        let tag = s.secretbox_detached(&mut ct, &msg, &nonce, &key);

        // Sealed form is tag || ciphertext.
        assert_eq!(&sealed[..TAG_LEN], &tag);
        assert_eq!(&sealed[TAG_LEN..], &ct[..]);
    }

    #[test]
    fn box_seal_open_round_trip() {
        let s = suite();
        let cfg = BenchConfig { seed: 42 };
        let mut rng = cfg.rng();
        let alice = s.box_keypair(&mut rng);
        let bob = s.box_keypair(&mut rng);
        let nonce = *b"123456789012345678901234";
        let msg = vec![b'a'; 1023];

        let boxed = s.box_seal(&msg, &nonce, &alice.public, &bob.secret);
        let opened = s.box_open(&boxed, &nonce, &bob.public, &alice.secret).unwrap();
        assert_eq!(opened, msg);

        let mut tampered = boxed;
        tampered[0] ^= 1;
        assert!(s
            .box_open(&tampered, &nonce, &bob.public, &alice.secret)
            .is_none());
    }

    #[test]
    fn keypairs_are_deterministic_per_seed() {
        let s = suite();
        let cfg = BenchConfig { seed: 5 };
        let a = s.box_keypair(&mut cfg.rng());
        let b = s.box_keypair(&mut cfg.rng());
        assert_eq!(a.public.as_bytes(), b.public.as_bytes());
    }

    #[test]
    fn sign_open_round_trip() {
        let s = suite();
        let cfg = BenchConfig { seed: 1 };
        let kp = s.sign_keypair(&mut cfg.rng());
        let msg = vec![b'a'; 127];

        let signed = s.sign(&msg, &kp);
        assert_eq!(signed.len(), SIGNATURE_LEN + msg.len());
        let opened = s.sign_open(&signed, &kp.verifying).unwrap();
        assert_eq!(opened, msg);

        let mut tampered = signed;
        let last = tampered.len() - 1;
        tampered[last] ^= 1;
        assert!(s.sign_open(&tampered, &kp.verifying).is_none());
        assert!(s.sign_open(&[0u8; 10], &kp.verifying).is_none());
    }

    #[test]
    fn hash_known_vector() {
        // SHA-512 of the empty string.
        let s = suite();
        let digest = s.hash(b"");
        assert_eq!(
            digest[..8],
            [0xcf, 0x83, 0xe1, 0x35, 0x7e, 0xef, 0xb8, 0xbd]
        );
    }

    #[test]
    fn scalarmult_base_is_deterministic() {
        let s = suite();
        let n: [u8; KEY_LEN] = core::array::from_fn(|i| i as u8);
        let q1 = s.scalarmult_base(&n);
        let q2 = s.scalarmult_base(&n);
        assert_eq!(q1, q2);
        assert_ne!(q1, [0u8; KEY_LEN]);
    }

    #[test]
    fn core_access_depends_on_variant() {
        assert!(NaclSuite::load(LibraryVariant::Fast).hsalsa_core().is_some());
        assert!(NaclSuite::load(LibraryVariant::Portable)
            .hsalsa_core()
            .is_none());
    }

    #[test]
    fn hsalsa_core_is_deterministic() {
        let core_fn = suite().hsalsa_core().unwrap();
        let key: [u8; KEY_LEN] = core::array::from_fn(|i| (i + 50) as u8);
        let input: [u8; 16] = core::array::from_fn(|i| i as u8);
        assert_eq!(core_fn(&key, &input), core_fn(&key, &input));
        assert_ne!(core_fn(&key, &input), [0u8; KEY_LEN]);
    }
}
