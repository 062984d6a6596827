//! FormDraft Core Library
//!
//! Platform-agnostic data structures and logic for the FormDraft layout
//! builder: widgets, placement, drag/resize, inline editing and layout
//! persistence.

pub mod canvas;
pub mod config;
pub mod document;
pub mod edit;
pub mod factory;
pub mod input;
pub mod interaction;
pub mod layout;
pub mod notice;
pub mod placement;
pub mod storage;
pub mod widget;

pub use canvas::{Confirmation, FormCanvas};
pub use config::{CanvasConfig, LAYOUT_STORAGE_KEY};
pub use document::FormDocument;
pub use edit::{EditSession, EditTarget};
pub use factory::WidgetFactory;
pub use input::{InputState, PointerEvent, PointerId};
pub use interaction::{Interaction, InteractionController, PointerOutcome};
pub use layout::{LayoutError, LayoutRecord};
pub use notice::Notice;
pub use placement::{Placement, PlacementPolicy};
pub use storage::{LayoutStore, MemoryStorage, StorageError, StorageResult};
pub use widget::{HitRegion, Widget, WidgetContent, WidgetId, WidgetKind};
