//! Service ports: traits + data contracts.

pub mod config;
pub mod core;
pub mod host;

pub use config::{BridgeConfig, DispatchMode};
pub use self::core::{
    CoreError, CoreInstance, CoreLoader, CoreModule, CoreStart, LoadError, LoadFuture,
};
pub use host::{
    BindError, ChangeListener, ContentMode, EditorWidget, ElementRef, Host, WidgetFactory,
};
