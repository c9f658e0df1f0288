/*!
 * Shell Commands
 * Parsing of the command language into kernel operations
 */

use crate::core::types::{Pid, Priority, ResourceId, Units};
use std::str::FromStr;
use thiserror::Error;

/// One line of the command language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `in`
    Init,
    /// `to`
    Timeout,
    /// `cr <priority>`
    Create { priority: Priority },
    /// `de <pid>`
    Destroy { pid: Pid },
    /// `rq <resource> <units>`, on behalf of the running process
    Request { resource: ResourceId, units: Units },
    /// `rl <resource> <units>`, on behalf of the running process
    Release { resource: ResourceId, units: Units },
    /// `all`
    ShowAll,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid command: '{0}'")]
pub struct ParseCommandError(pub String);

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseCommandError(line.trim().to_string());
        let tokens: Vec<&str> = line.split_whitespace().collect();

        let command = match tokens.as_slice() {
            ["in"] => Command::Init,
            ["to"] => Command::Timeout,
            ["all"] => Command::ShowAll,
            ["cr", priority] => Command::Create {
                priority: number(priority).ok_or_else(invalid)?,
            },
            ["de", pid] => Command::Destroy {
                pid: number(pid).ok_or_else(invalid)?,
            },
            ["rq", resource, units] => Command::Request {
                resource: number(resource).ok_or_else(invalid)?,
                units: number(units).ok_or_else(invalid)?,
            },
            ["rl", resource, units] => Command::Release {
                resource: number(resource).ok_or_else(invalid)?,
                units: number(units).ok_or_else(invalid)?,
            },
            _ => return Err(invalid()),
        };

        Ok(command)
    }
}

/// Unsigned decimal digits only (no sign, no spaces)
fn number<T: FromStr>(token: &str) -> Option<T> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}
