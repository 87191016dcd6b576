//! Runtime services shared by the carousel crates.
//!
//! Everything here is single-threaded: state lives in `Rc<RefCell<..>>` and
//! all mutation happens on the UI thread between frames.

mod frame_clock;
mod runtime;

pub use frame_clock::{FrameCallbackRegistration, FrameClock};
pub use runtime::{FrameCallbackId, RuntimeHandle};
