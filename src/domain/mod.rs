//! Domain layer: the letter-of-credit state model, the approval rules and the
//! pure transition handlers, plus the ports the application layer depends on.

pub mod action;
pub mod approval;
pub mod event;
pub mod letter;
pub mod participant;
pub mod ports;
pub mod transition;
