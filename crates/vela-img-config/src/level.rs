use tracing::Level;

/// ログレベル文字列を tracing の Level に変換
///
/// 短縮形（`t`, `d`, `i`, `w`, `e`）も受け付ける。tracing には fatal / panic が
/// 無いため ERROR に丸め、不明な値は INFO として扱う。
pub fn parse_log_level(value: &str) -> Level {
    match value {
        "t" | "trace" | "Trace" | "TRACE" => Level::TRACE,
        "d" | "debug" | "Debug" | "DEBUG" => Level::DEBUG,
        "w" | "warn" | "Warn" | "WARN" => Level::WARN,
        "e" | "error" | "Error" | "ERROR" => Level::ERROR,
        "f" | "fatal" | "Fatal" | "FATAL" => Level::ERROR,
        "p" | "panic" | "Panic" | "PANIC" => Level::ERROR,
        _ => Level::INFO,
    }
}
