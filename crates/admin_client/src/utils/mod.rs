pub mod alive;
pub mod http_utils;
pub mod masking;
pub mod single_flight;

pub use alive::{Mount, MountHandle};
pub use masking::mask_token;
pub use single_flight::SingleFlight;
