//! Core domain types for the booking system.
//!
//! This module contains pure domain types with no persistence dependencies:
//! - Booking entity, status, input and projections
//! - Booking lifecycle transitions
//! - Identifier newtypes and generation

pub mod booking;
pub mod id;
