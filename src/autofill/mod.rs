pub mod applier;
pub mod checkbox;
pub mod coerce;
pub mod collector;
pub mod model;
pub mod resolver;
