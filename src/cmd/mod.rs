mod classify;
mod output;
mod parse;
mod plan;
mod validate;

pub use classify::cmd_classify;
pub use parse::cmd_parse;
pub use plan::cmd_plan;
pub use validate::cmd_validate;
