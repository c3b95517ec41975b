//! Transport primitives: the CAN frame record, the flagged identifier, and
//! the traits through which the link talks to hardware and to the router.
pub mod can_frame;
pub mod can_id;
pub mod traits;
