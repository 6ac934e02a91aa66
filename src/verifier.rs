//! Contains tools related to Discord's Interactions Endpoint URL feature.
//!
//! "You can optionally configure an interactions endpoint to receive interactions via HTTP POSTs
//! rather than over Gateway with a bot user."
//!
//! <https://discord.com/developers/docs/tutorials/upgrading-to-application-commands#adding-an-interactions-endpoint-url>
//!
//! See [`Verifier`] for example usage.

/// Parses a hex string into an array of `[u8]`
fn parse_hex<const N: usize>(s: &str) -> Option<[u8; N]> {
    // `from_str_radix` alone would also take a sign, e.g. "+e".
    if s.len() != N * 2 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    let mut res = [0; N];
    for (i, byte) in res.iter_mut().enumerate() {
        *byte = u8::from_str_radix(s.get(2 * i..2 * (i + 1))?, 16).ok()?;
    }
    Some(res)
}

/// The public key couldn't be parsed into a valid cryptographic public key.
#[derive(Debug)]
pub struct InvalidKey(Option<ed25519_dalek::SignatureError>);

impl std::fmt::Display for InvalidKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            Some(inner) => write!(f, "invalid application public key: {inner}"),
            None => f.write_str("invalid application public key: expected 64 hex digits"),
        }
    }
}

impl std::error::Error for InvalidKey {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.as_ref().map(|e| e as _)
    }
}

/// Used to cryptographically verify incoming interactions HTTP request for authenticity.
///
/// If incoming requests are not verified, Discord will reject the URL for security reasons.
///
/// ```rust
/// use interactions_endpoint::verifier::Verifier;
///
/// let verifier =
///     Verifier::new("67c6bd767ca099e79efac9fcce4d2022a63bf7dea780e7f3d813f694c1597089");
///
/// // When receiving an HTTP request:
/// # let http_headers = std::collections::HashMap::from([("X-Signature-Ed25519", ""), ("X-Signature-Timestamp", "")]);
/// # let request_body = &[];
/// let signature = http_headers["X-Signature-Ed25519"];
/// let timestamp = http_headers["X-Signature-Timestamp"];
/// if verifier.verify(signature, timestamp, request_body).is_err() {
///     // Send HTTP 401 Unauthorized response
/// }
/// ```
#[derive(Clone, Debug)]
pub struct Verifier {
    public_key: ed25519_dalek::VerifyingKey,
}

impl Verifier {
    /// Creates a new [`Verifier`] from the given public key hex string.
    ///
    /// Panics if the given key is invalid. For a non-panicking variant, see [`Self::from_hex()`]
    /// and [`Self::try_new()`].
    #[must_use]
    pub fn new(public_key: &str) -> Self {
        Self::from_hex(public_key).expect("public key must be a valid 64 digit hex string")
    }

    /// Creates a new [`Verifier`] from the public key hex string shown in the application's
    /// dashboard.
    ///
    /// # Errors
    ///
    /// [`InvalidKey`] if the string is not 64 hex digits, or the key isn't cryptographically
    /// valid.
    pub fn from_hex(public_key: &str) -> Result<Self, InvalidKey> {
        Self::try_new(parse_hex(public_key.trim()).ok_or(InvalidKey(None))?)
    }

    /// Creates a new [`Verifier`] from the public key bytes.
    ///
    /// # Errors
    ///
    /// [`InvalidKey`] if the key isn't cryptographically valid.
    pub fn try_new(public_key: [u8; 32]) -> Result<Self, InvalidKey> {
        Ok(Self {
            public_key: ed25519_dalek::VerifyingKey::from_bytes(&public_key)
                .map_err(|e| InvalidKey(Some(e)))?,
        })
    }

    /// Verifies a Discord request for authenticity, given the `X-Signature-Ed25519` HTTP header,
    /// `X-Signature-Timestamp` HTTP headers and request body.
    ///
    /// Empty inputs never verify.
    // We just need to differentiate "pass" and "failure". There's deliberately no data besides ().
    #[allow(clippy::result_unit_err)]
    pub fn verify(&self, signature: &str, timestamp: &str, body: &[u8]) -> Result<(), ()> {
        use ed25519_dalek::Verifier as _;

        if signature.is_empty() || timestamp.is_empty() || body.is_empty() {
            return Err(());
        }

        // Extract and parse signature
        let signature_bytes = parse_hex(signature).ok_or(())?;
        let signature = ed25519_dalek::Signature::from_bytes(&signature_bytes);

        // Verify
        let message_to_verify = [timestamp.as_bytes(), body].concat();
        self.public_key.verify(&message_to_verify, &signature).map_err(|_| ())
    }

    /// Like [`Self::verify`], for inputs taken straight off a request where any of the headers
    /// or the body may be missing.
    #[must_use]
    pub fn is_authentic(
        &self,
        signature: Option<&str>,
        timestamp: Option<&str>,
        body: Option<&[u8]>,
    ) -> bool {
        match (signature, timestamp, body) {
            (Some(signature), Some(timestamp), Some(body)) => {
                self.verify(signature, timestamp, body).is_ok()
            },
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use ed25519_dalek::{Signer, SigningKey};

    use super::*;

    fn hex(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{b:02x}")).collect()
    }

    fn keypair() -> (SigningKey, Verifier) {
        let signing_key = SigningKey::from_bytes(&[7; 32]);
        let verifier = Verifier::try_new(signing_key.verifying_key().to_bytes()).unwrap();
        (signing_key, verifier)
    }

    fn sign(key: &SigningKey, timestamp: &str, body: &[u8]) -> Vec<u8> {
        key.sign(&[timestamp.as_bytes(), body].concat()).to_bytes().to_vec()
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex::<4>("bf7dea78"), Some([0xBF, 0x7D, 0xEA, 0x78]));
        assert_eq!(parse_hex::<4>("bf7dea7"), None);
        assert_eq!(parse_hex::<4>("bf7dea789"), None);
        assert_eq!(parse_hex::<4>("bf7dea7x"), None);
        assert_eq!(parse_hex::<4>("bf7d+a78"), None);
        assert_eq!(parse_hex::<2>("-1ff"), None);
        assert_eq!(parse_hex(""), Some([]));
        assert_eq!(
            parse_hex("67c6bd767ca099e79efac9fcce4d2022a63bf7dea780e7f3d813f694c1597089"),
            Some([
                0x67, 0xC6, 0xBD, 0x76, 0x7C, 0xA0, 0x99, 0xE7, 0x9E, 0xFA, 0xC9, 0xFC, 0xCE, 0x4D,
                0x20, 0x22, 0xA6, 0x3B, 0xF7, 0xDE, 0xA7, 0x80, 0xE7, 0xF3, 0xD8, 0x13, 0xF6, 0x94,
                0xC1, 0x59, 0x70, 0x89
            ])
        );
    }

    #[test]
    fn test_from_hex() {
        let (signing_key, _) = keypair();
        let key_hex = hex(&signing_key.verifying_key().to_bytes());

        assert!(Verifier::from_hex(&key_hex).is_ok());
        assert!(Verifier::from_hex("not hex").is_err());
        assert!(Verifier::from_hex(&key_hex[..62]).is_err());
    }

    #[test]
    fn test_valid_signature() {
        let (key, verifier) = keypair();
        let body = br#"{"type":1}"#;
        let signature = hex(&sign(&key, "1700000000", body));

        assert!(verifier.verify(&signature, "1700000000", body).is_ok());
        assert!(verifier.is_authentic(Some(&signature), Some("1700000000"), Some(body)));
    }

    #[test]
    fn test_bit_flips_fail() {
        let (key, verifier) = keypair();
        let timestamp = "1700000000";
        let body = br#"{"type":1}"#.to_vec();
        let signature = sign(&key, timestamp, &body);

        for i in 0..signature.len() * 8 {
            let mut flipped = signature.clone();
            flipped[i / 8] ^= 1 << (i % 8);
            assert!(verifier.verify(&hex(&flipped), timestamp, &body).is_err());
        }

        for i in 0..body.len() * 8 {
            let mut flipped = body.clone();
            flipped[i / 8] ^= 1 << (i % 8);
            assert!(verifier.verify(&hex(&signature), timestamp, &flipped).is_err());
        }

        // Keep the timestamp valid UTF-8 by flipping the low bit of each digit.
        for i in 0..timestamp.len() {
            let mut flipped = timestamp.as_bytes().to_vec();
            flipped[i] ^= 1;
            let flipped = String::from_utf8(flipped).unwrap();
            assert!(verifier.verify(&hex(&signature), &flipped, &body).is_err());
        }
    }

    #[test]
    fn test_missing_inputs_fail_closed() {
        let (key, verifier) = keypair();
        let body = br#"{"type":1}"#;
        let signature = hex(&sign(&key, "1", body));

        assert!(!verifier.is_authentic(None, Some("1"), Some(body)));
        assert!(!verifier.is_authentic(Some(&signature), None, Some(body)));
        assert!(!verifier.is_authentic(Some(&signature), Some("1"), None));
        assert!(verifier.verify("", "1", body).is_err());
        assert!(verifier.verify(&signature, "", body).is_err());
    }

    #[test]
    fn test_malformed_signature_fails() {
        let (_, verifier) = keypair();

        assert!(verifier.verify("zz", "1", b"{}").is_err());
        assert!(verifier.verify(&"0".repeat(127), "1", b"{}").is_err());
        assert!(verifier.verify(&"g".repeat(128), "1", b"{}").is_err());
        // Multi-byte characters must not split a hex pair.
        assert!(verifier.verify(&"\u{e9}".repeat(64), "1", b"{}").is_err());
    }

    #[test]
    fn test_signed_hex_pair_fails() {
        // Find a real signature with a pair whose high nibble is `0`, so that swapping that
        // nibble for a sign leaves the decoded byte unchanged.
        let (key, verifier) = keypair();
        let body = br#"{"type":1}"#;
        let (timestamp, signature, pair) = (0..u32::MAX)
            .find_map(|n| {
                let timestamp = n.to_string();
                let signature = hex(&sign(&key, &timestamp, body));
                let pair = (0..64).find(|i| signature.as_bytes()[2 * i] == b'0')?;
                Some((timestamp, signature, pair))
            })
            .unwrap();
        assert!(verifier.verify(&signature, &timestamp, body).is_ok());

        let mut tampered = signature.into_bytes();
        tampered[2 * pair] = b'+';
        let tampered = String::from_utf8(tampered).unwrap();
        assert!(verifier.verify(&tampered, &timestamp, body).is_err());
        assert!(!verifier.is_authentic(Some(&tampered), Some(&timestamp), Some(body)));
    }
}
