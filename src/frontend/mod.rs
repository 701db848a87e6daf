//! Concrete [`Surface`](crate::traits::Surface) and
//! [`EventSource`](crate::traits::EventSource) implementations.

pub mod channel;
#[cfg(feature = "frontend-gtk")]
pub mod gtk;
pub mod recorder;
pub mod replay;
