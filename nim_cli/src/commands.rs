pub mod best_move;
pub mod generate;
pub mod self_play;
