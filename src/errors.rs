use failure::Fail;

#[derive(Debug, Fail)]
pub enum IntentSlotError {
    #[fail(display = "Invalid input: {}", _0)]
    InvalidInput(String),
    #[fail(display = "Unknown component: '{}'", _0)]
    UnknownComponent(String),
    #[fail(display = "Unknown token: '{}'", _0)]
    UnknownToken(String),
    #[fail(display = "Unable to load configuration '{}'", _0)]
    ConfigLoad(String),
}

pub type Result<T> = ::std::result::Result<T, ::failure::Error>;

pub(crate) fn invalid_input<S: Into<String>>(msg: S) -> ::failure::Error {
    IntentSlotError::InvalidInput(msg.into()).into()
}
