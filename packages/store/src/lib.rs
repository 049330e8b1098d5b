pub mod admin_tab;
pub mod backend;
pub mod clock;
pub mod config;
pub mod errors;
pub mod gallery;
pub mod gate;
pub mod models;
pub mod query;
pub mod session;
pub mod sync;

mod memory;
pub use memory::{BackendConfig, Caller, Connection, MemoryBackend};

pub use admin_tab::AdminTab;
pub use backend::{Backend, Principal, RemoteResult};
pub use config::{ConfigError, SiteConfig};
pub use errors::{normalize, normalize_backend_error, ErrorKind, NormalizedError, RemoteError};
pub use gate::{AdminGate, GateState};
pub use query::{QueryCache, QueryKey, QueryPolicy, QueryState};
pub use session::{Identity, LoginStatus, Session};
pub use sync::SyncClient;
