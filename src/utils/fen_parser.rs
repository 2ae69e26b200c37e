//! FEN-to-Position parser.
//!
//! Field parsers report plain reasons; `parse_fen` wraps the first failure
//! into `ChessError::InvalidFen` together with the offending text. Fields may
//! be separated by any run of whitespace.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::{chess_types::*, position::Position};
use crate::utils::algebraic::algebraic_to_square;

pub fn parse_fen(fen: &str) -> ChessResult<Position> {
    parse_fields(fen).map_err(|reason| ChessError::InvalidFen {
        fen: fen.to_owned(),
        reason,
    })
}

fn parse_fields(fen: &str) -> Result<Position, String> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or("missing board layout")?;
    let side_part = parts.next().ok_or("missing side to move")?;
    let castling_part = parts.next().ok_or("missing castling rights")?;
    let en_passant_part = parts.next().ok_or("missing en-passant square")?;
    let halfmove_part = parts.next().ok_or("missing halfmove clock")?;
    let fullmove_part = parts.next().ok_or("missing fullmove number")?;

    if parts.next().is_some() {
        return Err("unexpected trailing fields".to_owned());
    }

    let mut position = Position::empty();

    parse_board(board_part, &mut position)?;
    position.side_to_move = parse_side_to_move(side_part)?;
    position.castling_rights = parse_castling_rights(castling_part)?;
    position.en_passant_square = parse_en_passant_square(en_passant_part)?;
    position.halfmove_clock = parse_counter(halfmove_part, "halfmove clock")?;
    position.fullmove_number = parse_counter(fullmove_part, "fullmove number")?;

    position.recalc_occupancy();
    Ok(position)
}

fn parse_board(board_part: &str, position: &mut Position) -> Result<(), String> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(format!("board has {} ranks, expected 8", ranks.len()));
    }

    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let board_rank = 7 - fen_rank_idx as u8;
        let mut file = 0u8;
        let mut previous_was_digit = false;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(format!("invalid empty-square count '{ch}'"));
                }
                if previous_was_digit {
                    return Err(format!("rank {} has adjacent digits", board_rank + 1));
                }
                previous_was_digit = true;
                file += empty_count as u8;
                if file > 8 {
                    return Err(format!("rank {} spans more than 8 files", board_rank + 1));
                }
                continue;
            }

            previous_was_digit = false;
            let (color, piece) = piece_from_fen_char(ch)
                .ok_or_else(|| format!("invalid piece letter '{ch}'"))?;

            if file >= 8 {
                return Err(format!("rank {} spans more than 8 files", board_rank + 1));
            }

            position.put_piece(color, piece, board_rank * 8 + file);
            file += 1;
        }

        if file != 8 {
            return Err(format!("rank {} covers {file} files, expected 8", board_rank + 1));
        }
    }

    Ok(())
}

fn parse_side_to_move(side_part: &str) -> Result<Color, String> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(format!("side to move must be `w` or `b`, got `{side_part}`")),
    }
}

/// `-` or a non-empty subset of `KQkq` written in that order.
fn parse_castling_rights(castling_part: &str) -> Result<CastlingRights, String> {
    if castling_part == "-" {
        return Ok(CastlingRights::NONE);
    }

    let mut rights = CastlingRights::NONE;
    let mut next_allowed = 0usize;

    for ch in castling_part.chars() {
        let offset = CastlingRights::FEN_ORDER[next_allowed..]
            .iter()
            .position(|&(_, letter)| letter == ch)
            .ok_or_else(|| format!("invalid castling field `{castling_part}`"))?;
        let index = next_allowed + offset;
        rights.insert(CastlingRights::FEN_ORDER[index].0);
        next_allowed = index + 1;
    }

    if rights.is_empty() {
        return Err("castling field is empty".to_owned());
    }
    Ok(rights)
}

fn parse_en_passant_square(en_passant_part: &str) -> Result<Option<Square>, String> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    let square = algebraic_to_square(en_passant_part)?;
    let rank = square / 8;
    if rank != 2 && rank != 5 {
        return Err(format!(
            "en-passant square `{en_passant_part}` is not on rank 3 or 6"
        ));
    }
    Ok(Some(square))
}

fn parse_counter(text: &str, name: &str) -> Result<u16, String> {
    text.parse::<u16>()
        .map_err(|_| format!("{name} must be a non-negative integer, got `{text}`"))
}

fn piece_from_fen_char(ch: char) -> Option<(Color, PieceKind)> {
    let color = if ch.is_ascii_uppercase() {
        Color::White
    } else if ch.is_ascii_lowercase() {
        Color::Black
    } else {
        return None;
    };

    PieceKind::from_letter(ch).map(|piece| (color, piece))
}

#[cfg(test)]
mod tests {
    use super::parse_fen;
    use crate::errors::{ChessError, ErrorKind};
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::{CastlingRights, Color, PieceKind};

    fn reason(fen: &str) -> String {
        match parse_fen(fen) {
            Err(ChessError::InvalidFen { reason, .. }) => reason,
            other => panic!("expected InvalidFen for `{fen}`, got {other:?}"),
        }
    }

    #[test]
    fn parse_starting_fen() {
        let position = parse_fen(STARTING_POSITION_FEN).expect("starting FEN should parse");

        assert_eq!(position.side_to_move(), Color::White);
        assert_eq!(position.castling_rights(), CastlingRights::ALL);
        assert_eq!(position.fullmove_number(), 1);
        assert_eq!(position.halfmove_clock(), 0);
        assert_eq!(position.pieces(Color::White, PieceKind::Pawn), 0xFF00);
        assert_eq!(position.occupancy(Color::Black).count_ones(), 16);
    }

    #[test]
    fn extra_whitespace_between_fields_is_accepted() {
        let spaced = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR   w KQkq -  0 1 ";
        let position = parse_fen(spaced).expect("whitespace-padded FEN should parse");
        assert_eq!(position.to_fen(), STARTING_POSITION_FEN);
    }

    #[test]
    fn board_shape_errors() {
        assert!(reason("8/8/8/8/8/8/8 w - - 0 1").contains("7 ranks"));
        assert!(reason("9/8/8/8/8/8/8/8 w - - 0 1").contains("empty-square"));
        assert!(reason("7/8/8/8/8/8/8/8 w - - 0 1").contains("covers 7 files"));
        assert!(reason("ppppppppp/8/8/8/8/8/8/8 w - - 0 1").contains("more than 8"));
        assert!(reason("44/8/8/8/8/8/8/8 w - - 0 1").contains("adjacent digits"));
        assert!(reason("x7/8/8/8/8/8/8/8 w - - 0 1").contains("piece letter"));
    }

    #[test]
    fn field_errors() {
        let board = "4k3/8/8/8/8/8/8/4K3";
        assert!(reason(&format!("{board} x - - 0 1")).contains("side to move"));
        assert!(reason(&format!("{board} w KX - 0 1")).contains("castling"));
        assert!(reason(&format!("{board} w qK - 0 1")).contains("castling"));
        assert!(reason(&format!("{board} w KK - 0 1")).contains("castling"));
        assert!(reason(&format!("{board} w - e4 0 1")).contains("rank 3 or 6"));
        assert!(reason(&format!("{board} w - - -1 1")).contains("halfmove"));
        assert!(reason(&format!("{board} w - - 0 x")).contains("fullmove"));
        assert!(reason(&format!("{board} w - -")).contains("halfmove"));
        assert!(reason(&format!("{board} w - - 0 1 extra")).contains("trailing"));
    }

    #[test]
    fn errors_carry_the_input_and_parse_kind() {
        let err = parse_fen("garbage").expect_err("garbage is not FEN");
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert!(err.to_string().contains("garbage"));
    }

    #[test]
    fn partial_castling_rights() {
        let position = parse_fen("r3k2r/8/8/8/8/8/8/R3K2R b Kq - 3 20").expect("FEN should parse");
        assert_eq!(
            position.castling_rights(),
            CastlingRights::WHITE_KINGSIDE | CastlingRights::BLACK_QUEENSIDE
        );
        assert_eq!(position.halfmove_clock(), 3);
        assert_eq!(position.fullmove_number(), 20);
    }
}
