//! Systems - monthly dynamics over the city world.

mod countermeasure;
mod epidemic;
mod growth;
mod spread;

pub use countermeasure::*;
pub use epidemic::*;
pub use growth::*;
pub use spread::*;
