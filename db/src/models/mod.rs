mod game;
mod game_round;
mod question;
mod round;
mod user;

pub use self::game::*;
pub use self::game_round::*;
pub use self::question::*;
pub use self::round::*;
pub use self::user::*;
