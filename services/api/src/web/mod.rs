pub mod i18n;
pub mod protocol;
pub mod rest;
pub mod state;

// Re-export the handlers so the binary can build the router without
// spelling out the module paths.
pub use rest::{create_draw_handler, reading_handler, reset_draw_handler, select_slot_handler};
