/// Board width used when none is given on the command line.
pub const DEFAULT_WIDTH: usize = 3;
/// Board height used when none is given on the command line.
pub const DEFAULT_HEIGHT: usize = 3;

/// Version tag written into every save file.
pub const SAVE_FORMAT_VERSION: u32 = 1;
pub const DEFAULT_SAVE_PATH: &str = "tictactoe.save";

/// Environment variable holding the log level filter.
pub const LOG_ENV_VAR: &str = "TICTACTOE_LOG";
/// Environment variable naming a file that receives log records instead of stderr.
pub const LOG_FILE_ENV_VAR: &str = "TICTACTOE_LOG_FILE";

/// Rows taken by the welcome banner above the board.
pub const WELCOME_HEIGHT: usize = 4;
/// Rows taken by the key help below the board.
pub const INSTRUCTIONS_HEIGHT: usize = 5;
