//! Procedural player sprite sheet
//!
//! One row of 12x16 frames, facing right:
//! idle | walk 0..3 | shoot | damaged | dead.
//! Frames are assembled from a shared upper body and per-pose leg rows.

use crate::sim::{PlayerState, Rect};
use crate::{Color, palette};

pub const FRAME_W: usize = 12;
pub const FRAME_H: usize = 16;
pub const FRAME_COUNT: usize = 8;

const IDLE: usize = 0;
const WALK: usize = 1;
const WALK_FRAMES: usize = 4;
const SHOOT: usize = 5;
const DAMAGED: usize = 6;
const DEAD: usize = 7;

const UPPER: [&str; 12] = [
    "....hhhh....",
    "...hhhhhh...",
    "...ssssss...",
    "...sesses...",
    "...ssssss...",
    "....ssss....",
    "..bbbbbbbb..",
    ".sbbbbbbbbsg",
    ".sbbbbbbbbsg",
    ".s.bbbbbb.s.",
    "...bbbbbb...",
    "...bbbbbb...",
];

/// Arm raised, gun pointing up
const UPPER_SHOOT: [&str; 12] = [
    "....hhhh..g.",
    "...hhhhhh.g.",
    "...ssssss.s.",
    "...sesses.s.",
    "...ssssss.s.",
    "....ssss..s.",
    "..bbbbbbbbs.",
    ".sbbbbbbbb..",
    ".sbbbbbbbb..",
    ".s.bbbbbb...",
    "...bbbbbb...",
    "...bbbbbb...",
];

const LEGS_STAND: [&str; 4] = [
    "...ll..ll...",
    "...ll..ll...",
    "...ll..ll...",
    "..lll..lll..",
];

const LEGS_WALK: [[&str; 4]; WALK_FRAMES] = [
    ["...ll..ll...", "..ll....ll..", ".ll......ll.", ".ll......ll."],
    ["....llll....", "....llll....", "....l.ll....", "...ll.lll..."],
    ["...ll..ll...", "...ll...ll..", "..ll....ll..", "..ll.....ll."],
    ["....llll....", "....llll....", "....ll.l....", "...lll.ll..."],
];

/// Knocked flat: everything in the bottom rows
const DEAD_ROWS: [&str; 4] = [
    "............",
    "hhsbbbbbll..",
    "hssbbbbblll.",
    "hhsbbbbbll..",
];

fn color_of(c: char, hurt: bool) -> Option<Color> {
    match c {
        'h' => Some([90, 60, 30, 255]),
        's' => Some([255, 205, 150, 255]),
        'e' => Some(palette::CRT_BLACK),
        'b' if hurt => Some(palette::RED),
        'b' => Some(palette::BLUE),
        'l' => Some([40, 40, 90, 255]),
        'g' => Some(palette::GRAY),
        _ => None,
    }
}

/// Pixel rows of one frame
fn frame_rows(frame: usize) -> [&'static str; FRAME_H] {
    let mut rows = [""; FRAME_H];
    if frame == DEAD {
        rows[..12].fill("............");
        rows[12..].copy_from_slice(&DEAD_ROWS);
        return rows;
    }

    let upper = if frame == SHOOT { &UPPER_SHOOT } else { &UPPER };
    rows[..12].copy_from_slice(upper);
    let legs = match frame {
        f if (WALK..WALK + WALK_FRAMES).contains(&f) => &LEGS_WALK[f - WALK],
        _ => &LEGS_STAND,
    };
    rows[12..].copy_from_slice(legs);
    rows
}

/// Color of sheet pixel (x, y), or None when transparent
pub fn sheet_pixel(x: usize, y: usize) -> Option<Color> {
    if y >= FRAME_H || x >= FRAME_W * FRAME_COUNT {
        return None;
    }
    let frame = x / FRAME_W;
    let col = x % FRAME_W;
    let c = frame_rows(frame)[y].chars().nth(col)?;
    color_of(c, frame == DAMAGED)
}

/// Sheet frame for a player state and its animation frame
pub fn frame_index(state: PlayerState, frame: u8) -> usize {
    match state {
        PlayerState::Idle => IDLE,
        PlayerState::Walk => WALK + (frame as usize % WALK_FRAMES),
        PlayerState::Shoot => SHOOT,
        PlayerState::Damaged => DAMAGED,
        PlayerState::Dead => DEAD,
    }
}

/// Source rectangle of a frame; `flip` mirrors it via a negative width
pub fn source_rect(frame: usize, flip: bool) -> Rect {
    let x = (frame * FRAME_W) as f32;
    if flip {
        Rect::new(x + FRAME_W as f32, 0.0, -(FRAME_W as f32), FRAME_H as f32)
    } else {
        Rect::new(x, 0.0, FRAME_W as f32, FRAME_H as f32)
    }
}
