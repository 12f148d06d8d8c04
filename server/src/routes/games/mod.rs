mod add_round;
mod create;
mod delete;
mod list;
mod remove_round;
mod view;

pub use self::add_round::*;
pub use self::create::*;
pub use self::delete::*;
pub use self::list::*;
pub use self::remove_round::*;
pub use self::view::*;
