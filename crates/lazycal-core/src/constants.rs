/// Route component constants shared across crates
pub const API_ROUTE_COMPONENT: &str = "api";
pub const API_ROUTE_PREFIX: &str = const_str::concat!("/", API_ROUTE_COMPONENT);

pub const EVENTS_ROUTE_COMPONENT: &str = "events";
pub const EVENTS_ROUTE_PREFIX: &str =
    const_str::concat!(API_ROUTE_PREFIX, "/", EVENTS_ROUTE_COMPONENT);

pub const INSTANCES_ROUTE_COMPONENT: &str = "instances";
pub const INSTANCES_ROUTE_PREFIX: &str =
    const_str::concat!(API_ROUTE_PREFIX, "/", INSTANCES_ROUTE_COMPONENT);
