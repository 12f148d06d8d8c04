mod login;
mod register;

pub use self::login::*;
pub use self::register::*;
