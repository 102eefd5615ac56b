mod pointer;
mod window;

pub use pointer::{wire_pointer_handlers, PointerWiring};
pub use window::{wire_page_lifecycle, wire_resize};
