//! Word lookup with typo tolerance.

pub mod lookup;
pub mod result;

pub use lookup::*;
pub use result::*;
