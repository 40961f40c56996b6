use std::sync::Arc;

use derive_more::{Deref, Display};

/// Opaque identifier of an authenticated user
#[derive(Clone, Debug, PartialEq, Eq, Hash, Display)]
pub struct Identity(String);

impl Identity {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Identity {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<String> for Identity {
    fn eq(&self, other: &String) -> bool {
        &self.0 == other
    }
}

/// Authentication collaborator, exposes who is signed in
pub trait AuthProvider: Send + Sync {
    fn current_identity(&self) -> Option<Identity>;
}

/// Fixed identity, e.g. from the configuration file or a command line flag
#[derive(Clone, Debug, Default)]
pub struct StaticAuth(Option<Identity>);

impl StaticAuth {
    pub fn new(identity: Option<Identity>) -> Self {
        Self(identity)
    }

    pub fn anonymous() -> Self {
        Self(None)
    }

    pub fn signed_in(id: impl Into<String>) -> Self {
        Self(Some(Identity::new(id)))
    }
}

impl AuthProvider for StaticAuth {
    fn current_identity(&self) -> Option<Identity> {
        self.0.clone()
    }
}

#[derive(Clone, Deref)]
#[deref(forward)]
pub struct AuthBox(Arc<dyn AuthProvider>);

impl AuthBox {
    pub fn new(auth: impl AuthProvider + 'static) -> Self {
        Self(Arc::new(auth))
    }
}
