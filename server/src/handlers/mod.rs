pub mod page;
pub mod session_handlers;
