pub mod action_reader;
pub mod event_writer;
pub mod participant_loader;
