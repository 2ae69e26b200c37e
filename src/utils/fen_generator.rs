use crate::game_state::{chess_types::*, position::Position};
use crate::utils::algebraic::square_to_algebraic;

pub fn generate_fen(position: &Position) -> String {
    let board = generate_board_field(position);
    let side_to_move = match position.side_to_move() {
        Color::White => "w",
        Color::Black => "b",
    };
    let castling = generate_castling_field(position.castling_rights());
    let en_passant = generate_en_passant_field(position.en_passant_square());

    format!(
        "{} {} {} {} {} {}",
        board,
        side_to_move,
        castling,
        en_passant,
        position.halfmove_clock(),
        position.fullmove_number()
    )
}

fn generate_board_field(position: &Position) -> String {
    let mut out = String::new();

    for rank in (0..8u8).rev() {
        let mut empty_count = 0u8;

        for file in 0..8u8 {
            match position.piece_at(rank * 8 + file) {
                Some((color, piece)) => {
                    if empty_count > 0 {
                        out.push(char::from(b'0' + empty_count));
                        empty_count = 0;
                    }
                    out.push(piece_to_fen_char(color, piece));
                }
                None => empty_count += 1,
            }
        }

        if empty_count > 0 {
            out.push(char::from(b'0' + empty_count));
        }

        if rank > 0 {
            out.push('/');
        }
    }

    out
}

#[inline]
fn piece_to_fen_char(color: Color, piece: PieceKind) -> char {
    match color {
        Color::White => piece.letter().to_ascii_uppercase(),
        Color::Black => piece.letter(),
    }
}

fn generate_castling_field(rights: CastlingRights) -> String {
    let out: String = CastlingRights::FEN_ORDER
        .iter()
        .filter(|(flag, _)| rights.contains(*flag))
        .map(|&(_, letter)| letter)
        .collect();

    if out.is_empty() {
        "-".to_owned()
    } else {
        out
    }
}

fn generate_en_passant_field(square: Option<Square>) -> String {
    square
        .and_then(|sq| square_to_algebraic(sq).ok())
        .unwrap_or_else(|| "-".to_owned())
}
