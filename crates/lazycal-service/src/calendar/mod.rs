mod aggregate;
mod window;

pub use aggregate::InstanceAggregator;
pub use window::month_window;
