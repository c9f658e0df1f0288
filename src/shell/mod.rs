/*!
 * Shell Module
 * Line-oriented driver mapping text commands onto kernel operations
 */

pub mod command;
mod runner;

pub use command::{Command, ParseCommandError};
pub use runner::{Outcome, Shell};
