//! Launch configuration parsed from a caller-supplied extras bag.
//!
//! A third-party process hands the shell an [`extras::ExtrasBag`] describing
//! how the tab should look and behave. [`LaunchConfig`] normalizes that bag
//! exactly once into an immutable record. Parsing is fail-open: malformed or
//! hostile input degrades to defaults and never aborts tab construction.

mod buttons;
mod config;
pub mod keys;

pub use buttons::CustomButtonSpec;
pub use config::{
    CloseIcon, ExitAnimation, LaunchConfig, MenuEntry, TitleVisibility, Trust, UiType,
    CLOSE_ICON_SIZE_PX, DEFAULT_TOOLBAR_COLOR, MAX_MENU_ENTRIES, TRANSPARENT,
};
