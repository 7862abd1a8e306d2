//! Service adapters: OS/runtime specific implementations (IO/async).

pub mod core_handle;
pub mod editor;
pub mod probe;
pub mod process_core;
pub mod settings;
#[cfg(feature = "terminal")]
pub mod terminal_host;
pub mod widget_registry;

pub use core_handle::{CoreHandle, CoreReady, EffectCallback};
pub use editor::EditorAdapter;
pub use probe::EnvironmentProbe;
pub use process_core::ProcessCoreLoader;
pub use settings::{
    ensure_log_dir, get_config_path, get_log_dir, load_config, resolve_config_path, ConfigError,
    CONFIG_ENV,
};
#[cfg(feature = "terminal")]
pub use terminal_host::TerminalHost;
pub use widget_registry::WidgetRegistry;
