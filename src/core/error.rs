use std::error;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    ModuleInit(String),
    RomFetch(String),
    RomLoad(String),
    MachineFault(String),
    Surface(String),
    Audio(String),
    ZeroCadence,
}

pub type Result<T> = std::result::Result<T, Error>;

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::ModuleInit(msg) => write!(f, "host init failed: {}", msg),
            Error::RomFetch(msg) => write!(f, "program image fetch failed: {}", msg),
            Error::RomLoad(msg) => write!(f, "program image load failed: {}", msg),
            Error::MachineFault(msg) => write!(f, "machine fault: {}", msg),
            Error::Surface(msg) => write!(f, "presentation failure: {}", msg),
            Error::Audio(msg) => write!(f, "audio failure: {}", msg),
            Error::ZeroCadence => write!(f, "cycles per tick must be positive"),
        }
    }
}

impl Error {
    /// Whether this failure should end the session. Audio trouble never
    /// does; the gate stays silent and the loop keeps ticking.
    pub fn fatal(&self) -> bool {
        match *self {
            Error::Audio(_) => false,
            _ => true,
        }
    }
}
