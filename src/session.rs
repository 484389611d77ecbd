use axum::http::{ header::COOKIE, HeaderMap };
use hmac::{ Hmac, Mac };
use log::warn;
use sha2::Sha256;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use crate::history::{ SessionError, SessionStore };
use crate::models::chat::{ Conversation, Turn };

type HmacSha256 = Hmac<Sha256>;

pub const SESSION_COOKIE: &str = "rag_session";

/// The session a request belongs to, resolved once at request entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub id: String,
    /// True when the request carried no valid cookie and one must be issued.
    pub is_new: bool,
}

/// Signs and verifies session ids and fronts the history store.
#[derive(Clone)]
pub struct SessionManager {
    store: Arc<dyn SessionStore>,
    secret: Arc<[u8]>,
    max_age: Duration,
}

impl SessionManager {
    pub fn new(store: Arc<dyn SessionStore>, secret: &str, max_age: Duration) -> Self {
        Self {
            store,
            secret: Arc::from(secret.as_bytes()),
            max_age,
        }
    }

    fn mac(&self) -> HmacSha256 {
        HmacSha256::new_from_slice(&self.secret).expect("HMAC accepts any key length")
    }

    fn sign(&self, id: &str) -> String {
        let mut mac = self.mac();
        mac.update(id.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    fn verify(&self, value: &str) -> Option<String> {
        let (id, sig) = value.split_once('.')?;
        Uuid::parse_str(id).ok()?;
        let sig = hex::decode(sig).ok()?;
        let mut mac = self.mac();
        mac.update(id.as_bytes());
        mac.verify_slice(&sig).ok()?;
        Some(id.to_string())
    }

    /// Resolves the session from the request cookies, minting a new id when
    /// the cookie is absent or fails verification.
    pub fn resolve(&self, headers: &HeaderMap) -> SessionContext {
        let presented = headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .flat_map(|v| v.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == SESSION_COOKIE)
            .map(|(_, value)| value.to_string());

        if let Some(value) = presented {
            match self.verify(&value) {
                Some(id) => return SessionContext { id, is_new: false },
                None => warn!("Rejected session cookie with invalid signature"),
            }
        }

        SessionContext { id: Uuid::new_v4().to_string(), is_new: true }
    }

    pub fn cookie(&self, session: &SessionContext) -> String {
        format!(
            "{}={}.{}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
            SESSION_COOKIE,
            session.id,
            self.sign(&session.id),
            self.max_age.as_secs()
        )
    }

    /// Loads the stored history, if any. A stored empty history counts as
    /// absent.
    pub async fn load(
        &self,
        session: &SessionContext,
        system: Turn
    ) -> Result<Option<Conversation>, SessionError> {
        let stored = self.store.load(&session.id).await?;
        Ok(stored.filter(|turns| !turns.is_empty()).map(|turns| Conversation::restore(turns, system)))
    }

    pub async fn save(
        &self,
        session: &SessionContext,
        conversation: &Conversation
    ) -> Result<(), SessionError> {
        self.store.save(&session.id, conversation.messages()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::MemorySessionStore;
    use axum::http::HeaderValue;

    fn manager(secret: &str) -> SessionManager {
        let ttl = Duration::from_secs(3600);
        SessionManager::new(Arc::new(MemorySessionStore::new(ttl)), secret, ttl)
    }

    fn headers_with(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_str(cookie).unwrap());
        headers
    }

    fn cookie_pair(set_cookie: &str) -> String {
        set_cookie.split(';').next().unwrap().to_string()
    }

    #[test]
    fn no_cookie_mints_new_session() {
        let session = manager("secret").resolve(&HeaderMap::new());
        assert!(session.is_new);
        assert!(Uuid::parse_str(&session.id).is_ok());
    }

    #[test]
    fn issued_cookie_is_accepted() {
        let m = manager("secret");
        let first = m.resolve(&HeaderMap::new());
        let cookie = m.cookie(&first);
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Max-Age=3600"));

        let headers = headers_with(&format!("theme=dark; {}", cookie_pair(&cookie)));
        let again = m.resolve(&headers);
        assert_eq!(again, SessionContext { id: first.id, is_new: false });
    }

    #[test]
    fn tampered_or_foreign_cookie_is_rejected() {
        let m = manager("secret");
        let session = m.resolve(&HeaderMap::new());
        let pair = cookie_pair(&m.cookie(&session));

        let forged = pair.replace(&session.id, &Uuid::new_v4().to_string());
        assert!(m.resolve(&headers_with(&forged)).is_new);

        let other = manager("another-secret");
        assert!(other.resolve(&headers_with(&pair)).is_new);

        assert!(m.resolve(&headers_with("rag_session=garbage")).is_new);
    }

    #[tokio::test]
    async fn load_treats_empty_history_as_absent() {
        let m = manager("secret");
        let session = m.resolve(&HeaderMap::new());
        assert!(m.load(&session, Turn::system("sys")).await.unwrap().is_none());

        m.store.save(&session.id, &[]).await.unwrap();
        assert!(m.load(&session, Turn::system("sys")).await.unwrap().is_none());

        m.save(&session, &Conversation::new(Turn::system("sys"))).await.unwrap();
        let loaded = m.load(&session, Turn::system("sys")).await.unwrap().unwrap();
        assert_eq!(loaded.messages(), &[Turn::system("sys")]);
    }
}
