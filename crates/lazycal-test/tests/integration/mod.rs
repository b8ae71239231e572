mod events;
mod helpers;
mod instances;
