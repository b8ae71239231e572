pub mod event;
pub mod instance;
pub mod patch;

pub use event::{
    Event, EventDate, EventLocation, Frequency, NewEvent, RecurrenceRule, WeekPosition, Weekday,
};
pub use instance::EventInstance;
pub use patch::EventPatch;
