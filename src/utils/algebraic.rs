//! Square coordinates (`e4`) to and from board indices.
//!
//! Errors are plain reasons; callers wrap them into the `ChessError` variant
//! that matches what they were parsing.

use crate::game_state::chess_types::Square;

/// `"e4"` to `28`.
#[inline]
pub fn algebraic_to_square(text: &str) -> Result<Square, String> {
    let &[file, rank] = text.as_bytes() else {
        return Err(format!("square `{text}` must be a file letter and a rank digit"));
    };

    if !(b'a'..=b'h').contains(&file) {
        return Err(format!("file `{}` is outside a-h", file as char));
    }
    if !(b'1'..=b'8').contains(&rank) {
        return Err(format!("rank `{}` is outside 1-8", rank as char));
    }

    Ok((rank - b'1') * 8 + (file - b'a'))
}

/// `28` to `"e4"`.
#[inline]
pub fn square_to_algebraic(square: Square) -> Result<String, String> {
    if square > 63 {
        return Err(format!("square index {square} is off the board"));
    }

    let file = char::from(b'a' + square % 8);
    let rank = char::from(b'1' + square / 8);
    Ok(format!("{file}{rank}"))
}
