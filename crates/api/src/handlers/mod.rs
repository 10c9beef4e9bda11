pub mod customization;
pub mod game_token;
pub mod login;
pub mod masks;
