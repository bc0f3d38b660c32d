//! Signed-in session and per-user local selections.
//!
//! The session is loaded once with [`Session::load`] and then passed to
//! whatever needs it. Nothing re-reads the store behind the caller's back.

use std::fmt;

use dairy_ledger_core::{AddressId, CustomerId, Role, SellerId, UserId};
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::error::ClientError;
use crate::store::{KeyValueStore, StoreError};

pub const ROLE_KEY: &str = "role";
pub const USER_ID_KEY: &str = "user_id";
pub const CONTACT_KEY: &str = "contact";
pub const TOKEN_KEY: &str = "token";

/// Who is signed in.
#[derive(Clone)]
pub struct Session {
    pub role: Role,
    pub user_id: UserId,
    pub contact: String,
    token: Option<SecretString>,
}

impl Session {
    #[must_use]
    pub const fn new(role: Role, user_id: UserId, contact: String, token: Option<SecretString>) -> Self {
        Self {
            role,
            user_id,
            contact,
            token,
        }
    }

    /// Read the session from `store`.
    ///
    /// Returns `None` when no one is signed in, i.e. the role or user id
    /// key is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or holds a value that
    /// does not parse.
    pub fn load(store: &dyn KeyValueStore) -> Result<Option<Self>, StoreError> {
        let (Some(role), Some(user_id)) = (store.get(ROLE_KEY)?, store.get(USER_ID_KEY)?) else {
            return Ok(None);
        };
        let role = role.parse::<Role>().map_err(|_| StoreError::Invalid {
            key: ROLE_KEY.to_string(),
            value: role.clone(),
        })?;
        let user_id = user_id.parse::<UserId>().map_err(|_| StoreError::Invalid {
            key: USER_ID_KEY.to_string(),
            value: user_id.clone(),
        })?;
        let contact = store.get(CONTACT_KEY)?.unwrap_or_default();
        let token = store
            .get(TOKEN_KEY)?
            .filter(|t| !t.is_empty())
            .map(SecretString::from);
        Ok(Some(Self::new(role, user_id, contact, token)))
    }

    /// Like [`Session::load`], but a missing session is an error.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotSignedIn`] if no one is signed in.
    pub fn load_required(store: &dyn KeyValueStore) -> Result<Self, ClientError> {
        Self::load(store)?.ok_or(ClientError::NotSignedIn)
    }

    /// Persist every session key.
    ///
    /// The role is removed first and written last, so a save that fails
    /// part way leaves no loadable session rather than a mix of two users.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn save(&self, store: &dyn KeyValueStore) -> Result<(), StoreError> {
        store.remove(ROLE_KEY)?;
        store.set(USER_ID_KEY, &self.user_id.to_string())?;
        store.set(CONTACT_KEY, &self.contact)?;
        match &self.token {
            Some(token) => store.set(TOKEN_KEY, token.expose_secret())?,
            None => store.remove(TOKEN_KEY)?,
        }
        store.set(ROLE_KEY, self.role.as_str())?;
        debug!(role = %self.role, user_id = %self.user_id, "Session saved");
        Ok(())
    }

    /// Remove every session key. Selections and snapshots are kept.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn clear(store: &dyn KeyValueStore) -> Result<(), StoreError> {
        for key in [ROLE_KEY, USER_ID_KEY, CONTACT_KEY, TOKEN_KEY] {
            store.remove(key)?;
        }
        Ok(())
    }

    /// Bearer token for authenticated calls.
    #[must_use]
    pub fn token(&self) -> Option<SecretString> {
        self.token.clone()
    }

    /// Fail unless signed in as `role`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Forbidden`] for any other role.
    pub fn require(&self, role: Role) -> Result<(), ClientError> {
        if self.role == role {
            Ok(())
        } else {
            Err(ClientError::Forbidden {
                required: role,
                actual: self.role,
            })
        }
    }

    /// The user id read as a seller id.
    #[must_use]
    pub const fn seller_id(&self) -> SellerId {
        SellerId::new(self.user_id.as_i64())
    }

    /// The user id read as a customer id.
    #[must_use]
    pub const fn customer_id(&self) -> CustomerId {
        CustomerId::new(self.user_id.as_i64())
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("role", &self.role)
            .field("user_id", &self.user_id)
            .field("contact", &self.contact)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Areas a seller has picked to work today, kept per user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedAddresses {
    user_id: UserId,
    ids: Vec<AddressId>,
}

impl SelectedAddresses {
    /// Store key for `user_id`'s selection.
    #[must_use]
    pub fn key(user_id: UserId) -> String {
        format!("selected_addresses:{user_id}")
    }

    /// Load `user_id`'s selection; empty if never saved.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or the value is not a
    /// JSON list of ids.
    pub fn load(store: &dyn KeyValueStore, user_id: UserId) -> Result<Self, StoreError> {
        let ids = match store.get(&Self::key(user_id))? {
            Some(raw) => serde_json::from_str(&raw)?,
            None => Vec::new(),
        };
        Ok(Self { user_id, ids })
    }

    /// Persist the selection.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn save(&self, store: &dyn KeyValueStore) -> Result<(), StoreError> {
        store.set(&Self::key(self.user_id), &serde_json::to_string(&self.ids)?)
    }

    /// Select `id` if unselected, otherwise unselect it. Returns whether it
    /// is selected afterwards.
    pub fn toggle(&mut self, id: AddressId) -> bool {
        if let Some(pos) = self.ids.iter().position(|x| *x == id) {
            self.ids.remove(pos);
            false
        } else {
            self.ids.push(id);
            true
        }
    }

    #[must_use]
    pub fn contains(&self, id: AddressId) -> bool {
        self.ids.contains(&id)
    }

    #[must_use]
    pub fn ids(&self) -> &[AddressId] {
        &self.ids
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn seller_session() -> Session {
        Session::new(
            Role::Seller,
            UserId::new(4),
            "9000000004".to_string(),
            Some(SecretString::from("tok-4")),
        )
    }

    #[test]
    fn test_save_load_clear() {
        let store = MemoryStore::new();
        assert!(Session::load(&store).unwrap().is_none());

        seller_session().save(&store).unwrap();
        let loaded = Session::load(&store).unwrap().unwrap();
        assert_eq!(loaded.role, Role::Seller);
        assert_eq!(loaded.user_id, UserId::new(4));
        assert_eq!(loaded.contact, "9000000004");
        assert_eq!(loaded.token().unwrap().expose_secret(), "tok-4");

        Session::clear(&store).unwrap();
        assert!(Session::load(&store).unwrap().is_none());
        assert!(matches!(
            Session::load_required(&store),
            Err(ClientError::NotSignedIn)
        ));
    }

    /// Fails every `set` of one key; everything else goes to memory.
    struct FailingOn {
        key: &'static str,
        inner: MemoryStore,
    }

    impl KeyValueStore for FailingOn {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
            if key == self.key {
                return Err(StoreError::Io(std::io::Error::other("disk full")));
            }
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<(), StoreError> {
            self.inner.remove(key)
        }
    }

    #[test]
    fn test_partial_save_leaves_no_mixed_session() {
        for key in [USER_ID_KEY, CONTACT_KEY, TOKEN_KEY, ROLE_KEY] {
            let store = FailingOn {
                key,
                inner: MemoryStore::new(),
            };
            Session::new(Role::Admin, UserId::new(1), "9000000001".to_string(), None)
                .save(&store.inner)
                .unwrap();

            assert!(seller_session().save(&store).is_err(), "{key}");
            assert!(Session::load(&store).unwrap().is_none(), "{key}");
        }
    }

    #[test]
    fn test_invalid_role_in_store() {
        let store = MemoryStore::new();
        store.set(ROLE_KEY, "milkman").unwrap();
        store.set(USER_ID_KEY, "4").unwrap();
        assert!(matches!(
            Session::load(&store),
            Err(StoreError::Invalid { key, .. }) if key == ROLE_KEY
        ));
    }

    #[test]
    fn test_require_role() {
        let session = seller_session();
        assert!(session.require(Role::Seller).is_ok());
        assert!(matches!(
            session.require(Role::Admin),
            Err(ClientError::Forbidden {
                required: Role::Admin,
                actual: Role::Seller
            })
        ));
        assert_eq!(session.seller_id(), SellerId::new(4));
    }

    #[test]
    fn test_debug_redacts_token() {
        let debug = format!("{:?}", seller_session());
        assert!(!debug.contains("tok-4"));
    }

    #[test]
    fn test_selected_addresses_per_user() {
        let store = MemoryStore::new();
        let mut selection = SelectedAddresses::load(&store, UserId::new(4)).unwrap();
        assert!(selection.toggle(AddressId::new(2)));
        assert!(selection.toggle(AddressId::new(5)));
        assert!(!selection.toggle(AddressId::new(2)));
        selection.save(&store).unwrap();

        let reloaded = SelectedAddresses::load(&store, UserId::new(4)).unwrap();
        assert_eq!(reloaded.ids(), &[AddressId::new(5)]);
        assert!(SelectedAddresses::load(&store, UserId::new(9)).unwrap().is_empty());
        assert_eq!(
            store.get("selected_addresses:4").unwrap().as_deref(),
            Some("[5]")
        );
    }
}
