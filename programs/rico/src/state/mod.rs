pub mod ledger;
pub mod participant;
pub mod sale;

pub use ledger::*;
pub use participant::*;
pub use sale::*;
