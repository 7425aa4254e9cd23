use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShiftgrabError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Malformed shift time: {0}")]
    TimeParse(String),

    #[error("WebDriver error: {0}")]
    WebDriver(#[from] thirtyfour::error::WebDriverError),

    #[error("Timed out waiting for the portal homepage after {0} seconds")]
    LoginTimeout(u64),

    #[error("Bot process error: {0}")]
    BotProcess(String),

    #[error("Bot is already running")]
    BotAlreadyRunning,

    #[error("Failed to register signal handler: {0}")]
    SignalHandler(String),

    #[error("GUI error: {0}")]
    Gui(String),

    #[error("Shell completion error: {0}")]
    ShellCompletion(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ShiftgrabError>;
