mod address;
mod amount;
mod canonical_event;
mod errors;
mod ranked_actor;
mod raw_access_event;
mod raw_order;
mod time_window;
mod transaction_history;

pub use address::{display_name, truncate_address};
pub use amount::Amount;
pub use canonical_event::{CanonicalEvent, Outcome};
pub use errors::{EventError, WindowError};
pub use ranked_actor::RankedActor;
pub use raw_access_event::{AccessLog, RawAccessEvent};
pub use raw_order::{RawAccount, RawOrder, RawTimestamp};
pub use time_window::TimeWindow;
pub use transaction_history::{Dispenser, DispenserToken, TokenHistory, TransactionHistory};
