//! Paths used by the exported macros.

pub use alloc::boxed::Box;
pub use alloc::vec;
pub use alloc::vec::Vec;

#[cfg(feature = "auto_register")]
pub mod auto_register {
    pub use crate::caster::auto_register::CasterRegistration;
    pub use inventory;
}
