//! Rule engine - legality checks and move resolution

pub mod legality;
pub mod resolution;

pub use legality::{check_move, is_engaged, is_valid_move, IllegalMove};
pub use resolution::{
    mod_health, resolve_move, CommandLoss, MoveOutcome, Resolution, SELF_DESTRUCT_DAMAGE,
};
