use subtle::ConstantTimeEq;
use uuid::Uuid;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Context string for deriving the cookie signing key from `SESSION_SECRET`.
const KEY_CONTEXT: &str = "food-streak 2024-10-01 session cookie signing";

/// Signs and verifies session cookie values of the form `<uuid>.<hex tag>`.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SessionKey {
    key: [u8; 32],
}

impl SessionKey {
    /// Derives a signing key from the configured secret.
    pub fn derive(secret: &str) -> Self {
        Self {
            key: blake3::derive_key(KEY_CONTEXT, secret.as_bytes()),
        }
    }

    fn tag(&self, session_id: &Uuid) -> [u8; 32] {
        *blake3::keyed_hash(&self.key, session_id.as_bytes()).as_bytes()
    }

    /// Produces the cookie value for `session_id`.
    pub fn sign(&self, session_id: &Uuid) -> String {
        format!("{}.{}", session_id, hex::encode(self.tag(session_id)))
    }

    /// Returns the session id if `value` carries a valid tag.
    pub fn verify(&self, value: &str) -> Option<Uuid> {
        let (id, tag) = value.split_once('.')?;
        let session_id = Uuid::parse_str(id).ok()?;
        let tag = hex::decode(tag).ok()?;

        let expected = self.tag(&session_id);
        if bool::from(expected.as_slice().ct_eq(tag.as_slice())) {
            Some(session_id)
        } else {
            None
        }
    }
}

/// Generates a new random session id.
pub fn new_session_id() -> Uuid {
    Uuid::new_v4()
}
