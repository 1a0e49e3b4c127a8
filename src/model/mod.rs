use thiserror::Error;

pub mod change;
pub mod hosts;
pub mod resolved;
pub mod zuul;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Invalid change id `{0}`: expected `I` followed by hex digits")]
    InvalidChangeId(String),
    #[error("Malformed change `{0}`: expected `project:branch:{1}`")]
    MalformedChange(String, &'static str),
}
