pub mod boot;
pub mod error;
pub mod module;
pub mod registrar;
pub mod resources;

// Re-export key types for convenience.
pub use boot::{BootContext, BootEvent, BootStep};
pub use error::{BootError, Result};
pub use module::Module;
pub use registrar::{RecordingRegistrar, RouteGroup, RouteRegistrar};
pub use resources::{RecordingLoader, ResourceLoader};
