mod waitlist_email;
mod waitlist_entry;

pub use waitlist_email::{EmailParseError, WaitlistEmail};
pub use waitlist_entry::WaitlistEntry;
