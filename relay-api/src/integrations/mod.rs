pub mod mail_decoder;
pub mod telegram;
