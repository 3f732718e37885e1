use crate::piece::{Phase, Pos};

#[derive(Debug)]
pub(crate) struct PieceData {
    pub phases: [Phase; 4],
}

const NULL_POS: Pos = Pos { row: 0, column: 0 };

const fn p(column: i8, row: i8) -> Pos {
    Pos { row, column }
}

const fn phase(width: u8, height: u8, cells: [Pos; 4]) -> Phase {
    Phase {
        width,
        height,
        cells,
        pivot: NULL_POS,
    }
}

const fn gen_uniform_phases(only: Phase) -> [Phase; 4] {
    [only; 4]
}

const fn gen_two_fold_phases(even: Phase, odd: Phase) -> [Phase; 4] {
    let mut ret = [even; 4];

    let mut i = 1;
    while i < 4 {
        ret[i] = odd;
        i += 2;
    }
    ret
}

const J_PHASES: [Phase; 4] = [
    phase(2, 3, [p(0, 0), p(1, 0), p(0, 1), p(0, 2)]),
    phase(3, 2, [p(0, 0), p(0, 1), p(1, 1), p(2, 1)]),
    phase(2, 3, [p(1, 0), p(1, 1), p(1, 2), p(0, 2)]),
    phase(3, 2, [p(0, 0), p(1, 0), p(2, 0), p(2, 1)]),
];

const L_PHASES: [Phase; 4] = [
    phase(2, 3, [p(0, 0), p(1, 0), p(1, 1), p(1, 2)]),
    phase(3, 2, [p(0, 0), p(0, 1), p(1, 0), p(2, 0)]),
    phase(2, 3, [p(0, 0), p(0, 1), p(0, 2), p(1, 2)]),
    phase(3, 2, [p(0, 1), p(1, 1), p(2, 1), p(2, 0)]),
];

const T_PHASES: [Phase; 4] = [
    phase(2, 3, [p(0, 0), p(0, 1), p(1, 1), p(0, 2)]),
    phase(3, 2, [p(0, 1), p(1, 0), p(1, 1), p(2, 1)]),
    phase(2, 3, [p(0, 1), p(1, 0), p(1, 1), p(1, 2)]),
    phase(3, 2, [p(0, 0), p(1, 0), p(2, 0), p(1, 1)]),
];

// The bar turns around its second square rather than its box corner, so each
// phase carries the origin shift needed to keep that square in place.
const fn gen_i_phases() -> [Phase; 4] {
    let mut horizontal = phase(4, 1, [NULL_POS; 4]);
    let mut vertical = phase(1, 4, [NULL_POS; 4]);

    let mut i = 0;
    while i < 4 {
        horizontal.cells[i] = p(i as i8, 0);
        vertical.cells[i] = p(0, i as i8);
        i += 1;
    }

    horizontal.pivot = p(-1, 1);
    vertical.pivot = p(1, -1);

    gen_two_fold_phases(horizontal, vertical)
}

const I_PHASES: [Phase; 4] = gen_i_phases();

const Z_PHASES: [Phase; 4] = gen_two_fold_phases(
    phase(2, 3, [p(1, 0), p(1, 1), p(0, 1), p(0, 2)]),
    phase(3, 2, [p(0, 0), p(1, 0), p(1, 1), p(2, 1)]),
);

const S_PHASES: [Phase; 4] = gen_two_fold_phases(
    phase(2, 3, [p(0, 0), p(0, 1), p(1, 1), p(1, 2)]),
    phase(3, 2, [p(0, 1), p(1, 1), p(1, 0), p(2, 0)]),
);

const O_PHASES: [Phase; 4] =
    gen_uniform_phases(phase(2, 2, [p(0, 0), p(0, 1), p(1, 0), p(1, 1)]));

pub(crate) static PIECE_DATA: [PieceData; 7] = [
    PieceData { phases: J_PHASES },
    PieceData { phases: L_PHASES },
    PieceData { phases: T_PHASES },
    PieceData { phases: I_PHASES },
    PieceData { phases: Z_PHASES },
    PieceData { phases: S_PHASES },
    PieceData { phases: O_PHASES },
];
