pub mod item_def;
pub mod item_registry;

pub use item_def::{ItemDefinition, ItemKind, RawItemDefinition, StatKind};
pub use item_registry::ItemRegistry;
