//! Session credentials: storage and refresh.

pub mod credentials;
pub mod refresh;

pub use credentials::{
    CredentialPair, CredentialStore, FileTokenStorage, MemoryTokenStorage, TokenStorage,
};
pub use refresh::{RefreshCoordinator, RefreshError};
