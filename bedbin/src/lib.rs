#[cfg(feature = "core")]
#[doc(inline)]
pub use bedbin_core as core;

#[cfg(feature = "index")]
#[doc(inline)]
pub use bedbin_index as index;
