//! Crate root module declarations for the chess analysis core.
//!
//! Exposes the position model and game history, legal move generation,
//! evaluation and search, notation helpers, and the capability layer that an
//! assistant host maps onto its own tool calls.

pub mod errors;

pub mod game_state {
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
    pub mod game_status;
    pub mod position;
}

pub mod moves {
    pub mod chess_move;
    pub mod leaper_attacks;
    pub mod slider_attacks;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_move_shared;
    pub mod legal_moves_king;
    pub mod legal_moves_pawn;
    pub mod legal_moves_pieces;
    pub mod move_generator;
    pub mod perft;
}

pub mod search {
    pub mod board_scoring;
    pub mod move_ordering;
    pub mod search_config;
    pub mod search_engine;
    pub mod threading;
    pub mod zobrist;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod line;
    pub mod long_algebraic;
    pub mod render_position;
}

pub mod tools {
    pub mod analysis_session;
    pub mod capabilities;
}
