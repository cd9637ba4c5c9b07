mod healthcheck;
mod home;
mod waitlist;

pub use healthcheck::*;
pub use home::*;
pub use waitlist::*;
