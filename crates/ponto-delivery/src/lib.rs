//! Delivery client for the attendance-collection endpoint.
//!
//! Wraps a single reused HTTP client with a bounded timeout and maps every
//! delivery outcome into a [`DeliveryResult`] that drives the feedback
//! signaler. There is no buffering, no retry and no persistence of unsent
//! events: a failed delivery is reported once and dropped.

pub mod client;

pub use client::{
    AttendanceClient, AttendancePayload, DeliveryError, DeliveryResult, PayloadMode,
};
