//! Admin instructions: setup, safety modes and ownership.

mod accept_ownership;
mod initialize;
mod panic;
mod set_paused;
mod transfer_ownership;

pub use accept_ownership::process_accept_ownership;
pub use initialize::{InitializeData, process_initialize};
pub use panic::process_panic;
pub use set_paused::{process_pause, process_unpause};
pub use transfer_ownership::process_transfer_ownership;
