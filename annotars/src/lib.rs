#[cfg(feature = "core")]
#[doc(inline)]
pub use annotars_core as core;

#[cfg(feature = "overlaprs")]
#[doc(inline)]
pub use annotars_overlaprs as overlaprs;

#[cfg(feature = "resolve")]
#[doc(inline)]
pub use annotars_resolve as resolve;
