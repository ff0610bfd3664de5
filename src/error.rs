// A tiny error type so we don't rely on anyhow/thiserror.
// Every variant states *where* things went wrong.
// The reveal effect itself never fails; only the host around it does.
use std::fmt::{self, Display};

#[derive(Debug)]
pub enum Error {
    WindowInit(String),   // Creating the window failed
    WindowUpdate(String), // Updating the window buffer failed
    Config(String),       // Reading/parsing/validating the config file failed
    Snapshot(String),     // Writing the reveal layer to disk failed
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::WindowInit(s) => write!(f, "Window init error: {s}"),
            Error::WindowUpdate(s) => write!(f, "Window update error: {s}"),
            Error::Config(s) => write!(f, "Config error: {s}"),
            Error::Snapshot(s) => write!(f, "Snapshot error: {s}"),
        }
    }
}

impl std::error::Error for Error {}
