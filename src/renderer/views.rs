//! Presentation adapter: simulation state -> `Scene`
//!
//! Pure functions over borrowed state. Nothing here mutates the sim.

use glam::Vec2;

use super::font::measure_text;
use super::scene::{Scene, TextEffect};
use super::sprites::{frame_index, source_rect};
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::palette;
use crate::sim::{BreakoutState, BubbleState, GamePhase, PlayerState};

pub const VICTORY_TEXT_SIZE: f32 = 100.0;
pub const GAME_OVER_TEXT_SIZE: f32 = 80.0;
pub const HUD_TEXT_SIZE: f32 = 21.0;

/// Text centered on screen
fn banner(scene: &mut Scene, text: &str, size: f32, color: crate::Color, effect: TextEffect) {
    let x = (SCREEN_WIDTH - measure_text(text, size)) * 0.5;
    let y = (SCREEN_HEIGHT - size) * 0.5;
    scene.text(text, x, y, size, color, effect);
}

pub fn breakout_scene(state: &BreakoutState) -> Scene {
    let mut scene = Scene::new(state.elapsed);

    if state.phase == GamePhase::Win {
        banner(
            &mut scene,
            "YOU WON!",
            VICTORY_TEXT_SIZE,
            palette::WHITE,
            TextEffect::Rainbow,
        );
        return scene;
    }

    for brick in state.bricks.iter().filter(|b| b.active) {
        scene.rect(brick.rect, brick.color);
    }
    scene.rect(state.paddle.rect, state.paddle.color);
    scene.rect(state.ball.rect, state.ball.color);

    if !state.ball.active {
        let hint = "SPACE TO LAUNCH";
        let x = (SCREEN_WIDTH - measure_text(hint, HUD_TEXT_SIZE)) * 0.5;
        scene.text(hint, x, 400.0, HUD_TEXT_SIZE, palette::GRAY, TextEffect::Plain);
    }

    scene
}

pub fn bubbles_scene(state: &BubbleState) -> Scene {
    let mut scene = Scene::new(state.elapsed);

    match state.phase {
        GamePhase::Win => {
            banner(
                &mut scene,
                "YOU WIN!",
                VICTORY_TEXT_SIZE,
                palette::WHITE,
                TextEffect::Rainbow,
            );
            return scene;
        }
        GamePhase::Loss => {
            draw_player(&mut scene, state);
            banner(
                &mut scene,
                "GAME OVER",
                GAME_OVER_TEXT_SIZE,
                palette::RED,
                TextEffect::Plain,
            );
            return scene;
        }
        GamePhase::Playing => {}
    }

    for bubble in state.bubbles.iter().filter(|b| b.active) {
        scene.circle(bubble.pos, bubble.radius, bubble.color);
        // Highlight
        let glint = bubble.pos + Vec2::new(-0.35, -0.35) * bubble.radius;
        scene.circle(glint, bubble.radius * 0.2, palette::WHITE);
    }

    for bullet in state.bullets.iter().filter(|b| b.active) {
        scene.rect(bullet.rect, palette::YELLOW);
    }

    draw_player(&mut scene, state);

    let hp = format!("HP: {}", state.player.health);
    scene.text(&hp, 10.0, 10.0, HUD_TEXT_SIZE, palette::WHITE, TextEffect::Plain);

    scene
}

fn draw_player(scene: &mut Scene, state: &BubbleState) {
    let player = &state.player;
    // Sheet frames face right; the dead pose is never mirrored
    let flip = player.facing < 0.0 && player.state != PlayerState::Dead;
    let src = source_rect(frame_index(player.state, player.frame), flip);
    scene.sprite(src, player.rect);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::scene::DrawCommand;
    use crate::tuning::Tuning;

    fn texts(scene: &Scene) -> Vec<&str> {
        scene
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_breakout_playing_draws_every_active_brick() {
        let mut state = BreakoutState::new(Tuning::default().breakout);
        state.bricks[3].active = false;
        let scene = breakout_scene(&state);
        let rects = scene
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Rect { .. }))
            .count();
        // Active bricks + paddle + ball
        assert_eq!(rects, state.bricks.iter().filter(|b| b.active).count() + 2);
    }

    #[test]
    fn test_breakout_win_is_centered_rainbow_text() {
        let mut state = BreakoutState::new(Tuning::default().breakout);
        state.phase = GamePhase::Win;
        let scene = breakout_scene(&state);
        assert_eq!(scene.commands.len(), 1);
        match &scene.commands[0] {
            DrawCommand::Text {
                text,
                x,
                size,
                effect,
                ..
            } => {
                assert_eq!(text, "YOU WON!");
                assert_eq!(*size, VICTORY_TEXT_SIZE);
                assert_eq!(*effect, TextEffect::Rainbow);
                let w = measure_text(text, *size);
                assert!((x + w * 0.5 - SCREEN_WIDTH * 0.5).abs() < 1e-3);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_bubbles_scene_hud_and_sprite() {
        let state = BubbleState::new(Tuning::default().bubbles, 7);
        let scene = bubbles_scene(&state);
        assert!(texts(&scene).contains(&"HP: 3"));
        let circles = scene
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
            .count();
        assert_eq!(circles, state.active_bubbles * 2);
        assert!(
            scene
                .commands
                .iter()
                .any(|c| matches!(c, DrawCommand::Sprite { dst, .. } if *dst == state.player.rect))
        );
    }

    #[test]
    fn test_player_facing_left_flips_sprite() {
        let mut state = BubbleState::new(Tuning::default().bubbles, 7);
        state.player.facing = -1.0;
        let scene = bubbles_scene(&state);
        let flipped = scene.commands.iter().any(|c| match c {
            DrawCommand::Sprite { src, .. } => src.w < 0.0,
            _ => false,
        });
        assert!(flipped);
    }

    #[test]
    fn test_bubbles_end_screens() {
        let mut state = BubbleState::new(Tuning::default().bubbles, 7);
        state.phase = GamePhase::Loss;
        assert!(texts(&bubbles_scene(&state)).contains(&"GAME OVER"));
        state.phase = GamePhase::Win;
        assert_eq!(texts(&bubbles_scene(&state)), vec!["YOU WIN!"]);
    }

    #[test]
    fn test_scene_time_tracks_elapsed() {
        let mut state = BreakoutState::new(Tuning::default().breakout);
        state.elapsed = 2.5;
        assert_eq!(breakout_scene(&state).post.time, 2.5);
    }
}
