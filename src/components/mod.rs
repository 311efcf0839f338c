pub mod game_card;
pub mod modal;
pub mod player_table;
