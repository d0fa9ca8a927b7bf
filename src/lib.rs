//! A small grab-bag of utilities: an HTTP status-code-to-error translator,
//! nil/empty predicates, an asynchronous line logger and two RNG seed
//! constructors. The pieces are independent; pull in whichever you need.

pub mod ensure;
pub mod logging;
pub mod rng;
pub mod status;
