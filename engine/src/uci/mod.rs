pub mod parser;

pub use parser::{
    format_go_command, format_position_command, parse_uci_message, UciMessage, NO_MOVE,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UciError {
    #[error("Malformed UCI message: {0}")]
    MalformedMessage(String),
    #[error("Unknown UCI message: {0}")]
    UnknownMessage(String),
}
