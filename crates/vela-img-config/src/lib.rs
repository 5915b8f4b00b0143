//! Vela img プラグインのパラメータ解決
//!
//! 各設定値は以下の優先順位で解決されます:
//! 1. CLIフラグ
//! 2. 環境変数（宣言順）
//! 3. パラメータ / シークレットファイル（宣言順、最初に存在するもの）
//! 4. デフォルト値

pub mod error;
pub mod level;
pub mod parameter;
pub mod resolver;

pub use error::*;
pub use level::parse_log_level;
pub use parameter::*;
pub use resolver::{FILE_ROOT_ENV, Resolver, parse_bool, split_list};
