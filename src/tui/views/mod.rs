//! TUI view components
//!
//! Each component renders one part of the interface from the state of a
//! headless view.

mod confirmation;
mod detail;
mod footer;
mod header;
mod help;
pub mod helpers;
mod release_list;

pub use confirmation::*;
pub use detail::*;
pub use footer::*;
pub use header::*;
pub use help::*;
pub use release_list::*;
