//! Pieces tests - shapes, clockwise rotation, spawning and placement

use blockfall::core::pieces::{get_shape, rotate_cw, try_rotate, Piece, RotationMode, Shape};
use blockfall::core::placement::{drop_distance, is_grounded, is_valid};
use blockfall::core::rng::{game_rng, PieceSource};
use blockfall::core::Board;
use blockfall::types::PieceKind;

// ============== Shape Tests ==============

#[test]
fn test_spawn_shapes() {
    let expected: [(PieceKind, &[&str]); 7] = [
        (PieceKind::I, &["####"]),
        (PieceKind::O, &["##", "##"]),
        (PieceKind::T, &[".#.", "###"]),
        (PieceKind::S, &[".##", "##."]),
        (PieceKind::Z, &["##.", ".##"]),
        (PieceKind::J, &["#..", "###"]),
        (PieceKind::L, &["..#", "###"]),
    ];
    for (kind, rows) in expected {
        assert_eq!(get_shape(kind), Shape::from_rows(rows).unwrap(), "{:?}", kind);
    }
}

#[test]
fn test_l_piece_rotations() {
    let l = get_shape(PieceKind::L);
    let r1 = rotate_cw(&l);
    assert_eq!(r1.to_rows(), vec!["#.", "#.", "##"]);
    let r2 = rotate_cw(&r1);
    assert_eq!(r2.to_rows(), vec!["###", "#.."]);
    let r3 = rotate_cw(&r2);
    assert_eq!(r3.to_rows(), vec!["##", ".#", ".#"]);
    assert_eq!(rotate_cw(&r3), l);
}

#[test]
fn test_o_rotation_is_identity() {
    let o = get_shape(PieceKind::O);
    assert_eq!(rotate_cw(&o), o);
}

#[test]
fn test_four_rotations_return_original() {
    for kind in PieceKind::ALL {
        let shape = get_shape(kind);
        let back = rotate_cw(&rotate_cw(&rotate_cw(&rotate_cw(&shape))));
        assert_eq!(back, shape, "{:?}", kind);
    }
}

#[test]
fn test_rotation_keeps_anchor() {
    let piece = Piece::at(PieceKind::J, 3, 7);
    let rotated = piece.rotated();
    assert_eq!((rotated.x, rotated.y), (3, 7));
    assert_eq!(rotated.kind, PieceKind::J);
    assert_eq!(rotated.shape.rows(), 3);
    assert_eq!(rotated.shape.cols(), 2);
}

// ============== Placement Tests ==============

#[test]
fn test_spawn_fits_on_empty_board() {
    let board = Board::new();
    for kind in PieceKind::ALL {
        assert!(is_valid(&Piece::spawn(kind), &board, 0, 0), "{:?}", kind);
    }
}

#[test]
fn test_locked_cells_block_placement() {
    let mut board = Board::new();
    board.set(4, 1, Some(PieceKind::Z));
    // O spawns over columns 4-5, rows 0-1
    assert!(!is_valid(&Piece::spawn(PieceKind::O), &board, 0, 0));
    assert!(is_valid(&Piece::spawn(PieceKind::O), &board, 1, 0));
}

#[test]
fn test_drop_distance_lands_on_stack() {
    let board = Board::from_rows(&["....#.....", "##########"]).unwrap();
    let piece = Piece::spawn(PieceKind::I);

    // Column 4 is filled at row 18
    assert_eq!(drop_distance(&piece, &board), 17);
    let landed = piece.shifted(0, 17);
    assert!(is_grounded(&landed, &board));
    assert!(!is_grounded(&piece, &board));
}

#[test]
fn test_strict_rotation_against_stack_fails() {
    let board = Board::from_rows(&[".#........", ".#........", ".#........", ".#........"]).unwrap();
    // Turning vertical in place needs column 1, which is filled below row 15
    let piece = Piece::at(PieceKind::I, 1, 15);
    let fits = |p: &Piece| is_valid(p, &board, 0, 0);
    assert!(try_rotate(&piece, RotationMode::Strict, fits).is_none());
    let kicked = try_rotate(&piece, RotationMode::Kicks, fits).unwrap();
    assert_eq!(kicked.x, 0);
}

// ============== Piece Source Tests ==============

#[test]
fn test_bag_deals_each_kind_once_per_seven() {
    let (mut rng, _) = game_rng(Some(99));
    let mut source = PieceSource::bag();
    for _ in 0..5 {
        let mut seen: Vec<PieceKind> = (0..7).map(|_| source.next_kind(&mut rng)).collect();
        seen.sort_by_key(|k| k.grid_id());
        assert_eq!(seen, PieceKind::ALL.to_vec());
    }
}

#[test]
fn test_sequence_cycles_and_resets() {
    let (mut rng, _) = game_rng(Some(1));
    let mut source = PieceSource::sequence([PieceKind::S, PieceKind::Z]).unwrap();
    assert_eq!(source.next_kind(&mut rng), PieceKind::S);
    assert_eq!(source.next_kind(&mut rng), PieceKind::Z);
    assert_eq!(source.next_kind(&mut rng), PieceKind::S);
    source.reset();
    assert_eq!(source.next_kind(&mut rng), PieceKind::S);
    assert!(PieceSource::sequence(Vec::new()).is_none());
}

#[test]
fn test_same_seed_same_pieces() {
    let (mut a, seed) = game_rng(Some(2024));
    let (mut b, _) = game_rng(Some(seed));
    let mut source_a = PieceSource::random();
    let mut source_b = PieceSource::random();
    for _ in 0..50 {
        assert_eq!(source_a.next_kind(&mut a), source_b.next_kind(&mut b));
    }
}
