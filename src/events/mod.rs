pub mod audio;
pub mod gamestate;
pub mod input;
pub mod interaction;
pub mod switchdebug;
pub mod timer;
pub mod toast;
