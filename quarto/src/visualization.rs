use crate::State;

/// Draws the board with piece figures, the held piece and the remaining pieces.
///
/// Remaining pieces are numbered from 1 to 16 (their id plus one), which is
/// how a human picks them.
pub fn visualize_state(state: &State) -> String {
    let separator = "  +-------+-------+-------+-------+\n";
    let mut result = String::from("      A       B       C       D\n");
    result += separator;
    for (row_idx, row) in state.rows().iter().enumerate() {
        result += &format!("{} |", row_idx + 1);
        for cell in row {
            match cell {
                Some(piece) => result += &format!(" {} |", piece),
                None => result += "       |",
            }
        }
        result += "\n";
        result += separator;
    }
    if let Some(piece) = state.held_piece() {
        result += &format!("Holding: {}\n", piece);
    }
    result += "Pieces left:";
    for piece in state.pieces() {
        result += &format!(" {:>2}. {}", piece.id() + 1, piece);
    }
    result
}
