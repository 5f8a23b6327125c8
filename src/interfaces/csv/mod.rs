pub mod letter_writer;
