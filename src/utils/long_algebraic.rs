//! UCI-style long algebraic move text (`e2e4`, `e7e8q`).
//!
//! Parsing is position-independent: the result carries no flags until it is
//! matched against a generated legal move.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::PieceKind;
use crate::moves::chess_move::ChessMove;
use crate::utils::algebraic::{algebraic_to_square, square_to_algebraic};

pub fn parse_uci_move(text: &str) -> ChessResult<ChessMove> {
    parse_uci_fields(text).map_err(|reason| ChessError::InvalidMoveNotation {
        notation: text.to_owned(),
        reason,
    })
}

fn parse_uci_fields(text: &str) -> Result<ChessMove, String> {
    if !text.is_ascii() || (text.len() != 4 && text.len() != 5) {
        return Err("expected four or five characters such as `e2e4` or `e7e8q`".to_owned());
    }

    let from = algebraic_to_square(&text[0..2])?;
    let to = algebraic_to_square(&text[2..4])?;
    if from == to {
        return Err("origin and destination are the same square".to_owned());
    }

    let mut mv = ChessMove::new(from, to);
    if let Some(letter) = text[4..].chars().next() {
        mv = mv.with_promotion(promotion_from_char(letter)?);
    }
    Ok(mv)
}

fn promotion_from_char(letter: char) -> Result<PieceKind, String> {
    match letter {
        'q' => Ok(PieceKind::Queen),
        'r' => Ok(PieceKind::Rook),
        'b' => Ok(PieceKind::Bishop),
        'n' => Ok(PieceKind::Knight),
        _ => Err(format!("invalid promotion letter '{letter}'")),
    }
}

pub fn format_uci_move(mv: &ChessMove) -> String {
    let mut out = String::with_capacity(5);
    for square in [mv.from, mv.to] {
        match square_to_algebraic(square) {
            Ok(text) => out.push_str(&text),
            Err(_) => out.push_str("??"),
        }
    }
    if let Some(piece) = mv.promotion {
        out.push(piece.letter());
    }
    out
}
