// Sub-modules organized by functional domain
pub mod cycle;
pub mod department;
pub mod ledger;
pub mod participant;
pub mod scheme;
pub mod summary;

pub use cycle::*;
pub use department::*;
pub use ledger::*;
pub use participant::*;
pub use scheme::*;
pub use summary::*;
