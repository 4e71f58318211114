//! Bubble Destroyer: a walking shooter against bouncing, splitting bubbles
//!
//! Bubbles fall under gravity, bounce off the walls and ceiling and get
//! kicked back up by the floor. A bullet hit shrinks a bubble one tier and
//! splits it in two; the smallest tier pops. Popping every bubble wins,
//! losing all health loses.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{bounce_ceiling, bounce_span};
use super::player::Player;
use super::pool::{Slot, active_count, first_free, has_free};
use super::rect::{Rect, circle_intersects_rect};
use super::state::{GameEvent, GamePhase};
use crate::consts::*;
use crate::tuning::BubbleTuning;
use crate::{Color, palette};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct BubbleInput {
    /// Horizontal input: -1 left, 0 none, 1 right
    pub dir: f32,
    /// Shoot requested (held)
    pub shoot: bool,
    /// Start over with a fresh wave
    pub reset: bool,
}

/// Bubble size tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tier {
    Large,
    Medium,
    Small,
}

impl Tier {
    /// Next tier down; the smallest has none and pops instead
    pub fn smaller(self) -> Option<Tier> {
        match self {
            Tier::Large => Some(Tier::Medium),
            Tier::Medium => Some(Tier::Small),
            Tier::Small => None,
        }
    }

    pub fn radius(self, tuning: &BubbleTuning) -> f32 {
        match self {
            Tier::Large => tuning.large_radius,
            Tier::Medium => tuning.medium_radius,
            Tier::Small => tuning.small_radius,
        }
    }

    pub fn color(self) -> Color {
        match self {
            Tier::Large => palette::RED,
            Tier::Medium => palette::ORANGE,
            Tier::Small => palette::YELLOW,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Bubble {
    /// Center
    pub pos: Vec2,
    pub radius: f32,
    pub tier: Tier,
    pub color: Color,
    pub vel: Vec2,
    pub active: bool,
}

impl Bubble {
    fn inactive() -> Self {
        Self {
            pos: Vec2::ZERO,
            radius: 0.0,
            tier: Tier::Small,
            color: palette::YELLOW,
            vel: Vec2::ZERO,
            active: false,
        }
    }

    pub fn new(tier: Tier, pos: Vec2, vel: Vec2, tuning: &BubbleTuning) -> Self {
        Self {
            pos,
            radius: tier.radius(tuning),
            tier,
            color: tier.color(),
            vel,
            active: true,
        }
    }
}

impl Slot for Bubble {
    fn is_active(&self) -> bool {
        self.active
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Bullet {
    pub rect: Rect,
    pub active: bool,
}

impl Slot for Bullet {
    fn is_active(&self) -> bool {
        self.active
    }
}

/// Complete Bubble Destroyer state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BubbleState {
    pub tuning: BubbleTuning,
    /// Seed of the opening wave
    pub seed: u64,
    pub phase: GamePhase,
    /// Seconds since the run started; all cooldowns compare against it
    pub elapsed: f32,
    pub player: Player,
    pub bullets: [Bullet; MAX_BULLETS],
    pub bullet_count: usize,
    pub bubbles: [Bubble; MAX_BUBBLES],
    pub active_bubbles: usize,
    /// Events produced by the last tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl BubbleState {
    pub fn new(tuning: BubbleTuning, seed: u64) -> Self {
        let mut state = Self {
            player: Player::new(&tuning),
            tuning,
            seed,
            phase: GamePhase::Playing,
            elapsed: 0.0,
            bullets: [Bullet {
                rect: Rect::default(),
                active: false,
            }; MAX_BULLETS],
            bullet_count: 0,
            bubbles: [Bubble::inactive(); MAX_BUBBLES],
            active_bubbles: 0,
            events: Vec::new(),
        };
        state.spawn_opening_wave();
        state
    }

    /// Reinitialize every flag and counter; the same seed gives the same wave
    pub fn reset(&mut self) {
        *self = Self::new(self.tuning.clone(), self.seed);
        log::info!("Bubble Destroyer reset ({} bubbles)", self.active_bubbles);
    }

    fn spawn_opening_wave(&mut self) {
        let mut rng = Pcg32::seed_from_u64(self.seed);
        let radius = Tier::Large.radius(&self.tuning);
        let (min_x, max_x) = (radius, (SCREEN_WIDTH - radius).max(radius));

        for _ in 0..self.tuning.initial_bubbles {
            let x = rng.random_range(min_x..=max_x);
            let vx = if rng.random_bool(0.5) {
                self.tuning.bubble_speed
            } else {
                -self.tuning.bubble_speed
            };
            let bubble = Bubble::new(
                Tier::Large,
                Vec2::new(x, self.tuning.spawn_y),
                Vec2::new(vx, 0.0),
                &self.tuning,
            );
            self.spawn_bubble(bubble);
        }
    }

    /// Place a bubble in the first free slot; dropped when the pool is full
    pub fn spawn_bubble(&mut self, bubble: Bubble) -> Option<usize> {
        let slot = first_free(&self.bubbles)?;
        self.bubbles[slot] = Bubble {
            active: true,
            ..bubble
        };
        self.active_bubbles += 1;
        Some(slot)
    }

    /// Fire a bullet from the player's muzzle; dropped when the pool is full
    pub fn spawn_bullet(&mut self) -> Option<usize> {
        let slot = first_free(&self.bullets)?;
        let muzzle = self.player.muzzle();
        let (w, h) = (self.tuning.bullet_width, self.tuning.bullet_height);
        self.bullets[slot] = Bullet {
            rect: Rect::new(muzzle.x - w / 2.0, muzzle.y - h, w, h),
            active: true,
        };
        self.bullet_count += 1;
        Some(slot)
    }

    /// Counters agree with the pool flags
    pub fn is_consistent(&self) -> bool {
        self.bullet_count == active_count(&self.bullets)
            && self.active_bubbles == active_count(&self.bubbles)
    }

    fn update_bullets(&mut self, dt: f32) {
        for bullet in self.bullets.iter_mut().filter(|b| b.active) {
            bullet.rect.y -= self.tuning.bullet_speed * dt;
            if bullet.rect.bottom() < 0.0 {
                bullet.active = false;
                self.bullet_count -= 1;
            }
        }
    }

    fn update_bubbles(&mut self, dt: f32) {
        let tuning = &self.tuning;
        for bubble in self.bubbles.iter_mut().filter(|b| b.active) {
            bubble.vel.y += tuning.gravity * dt;
            bubble.pos += bubble.vel * dt;

            let r = bubble.radius;
            let mut left = bubble.pos.x - r;
            if bounce_span(&mut left, 2.0 * r, &mut bubble.vel.x, SCREEN_WIDTH) {
                bubble.pos.x = left + r;
            }

            let mut top = bubble.pos.y - r;
            if bounce_ceiling(&mut top, &mut bubble.vel.y) {
                bubble.pos.y = top + r;
            }

            // Floor is not elastic: always kicks back up at the same speed
            if bubble.pos.y + r > SCREEN_HEIGHT {
                bubble.pos.y = SCREEN_HEIGHT - r;
                bubble.vel.y = -tuning.floor_rebound_speed;
            }
        }
    }

    fn resolve_bullet_hits(&mut self) {
        for i in 0..MAX_BULLETS {
            if !self.bullets[i].active {
                continue;
            }
            let rect = self.bullets[i].rect;
            let Some(slot) = self
                .bubbles
                .iter()
                .position(|b| b.active && circle_intersects_rect(b.pos, b.radius, &rect))
            else {
                continue;
            };

            self.bullets[i].active = false;
            self.bullet_count -= 1;
            self.hit_bubble(slot);
        }
    }

    /// Pop the smallest tier; otherwise shrink and split into two
    fn hit_bubble(&mut self, slot: usize) {
        let bubble = &mut self.bubbles[slot];
        match bubble.tier.smaller() {
            None => {
                bubble.active = false;
                self.active_bubbles -= 1;
                self.events.push(GameEvent::BubbleHit { slot, split: false });
                log::debug!("Bubble {} popped, {} left", slot, self.active_bubbles);
            }
            Some(tier) => {
                bubble.tier = tier;
                bubble.radius = tier.radius(&self.tuning);
                bubble.color = tier.color();
                bubble.vel.y = -self.tuning.split_rise_speed;

                let mut twin = *bubble;
                twin.vel.x = -bubble.vel.x;
                match self.spawn_bubble(twin) {
                    Some(twin_slot) => {
                        log::debug!("Bubble {} split into {} ({:?})", slot, twin_slot, tier)
                    }
                    None => log::debug!("Bubble {} shrank, pool full for its twin", slot),
                }
                self.events.push(GameEvent::BubbleHit { slot, split: true });
            }
        }
    }

    fn resolve_player_contacts(&mut self) {
        let player_mid = self.player.rect.center().y;
        for bubble in self.bubbles.iter_mut().filter(|b| b.active) {
            if !circle_intersects_rect(bubble.pos, bubble.radius, &self.player.rect) {
                continue;
            }
            // Only turn around a bubble still heading into the player
            if (player_mid - bubble.pos.y) * bubble.vel.y > 0.0 {
                bubble.vel.y = -bubble.vel.y;
            }
            if self.player.take_hit(self.elapsed, &self.tuning) {
                self.events.push(GameEvent::PlayerHurt {
                    health: self.player.health,
                });
                log::debug!("Player hurt, health {}", self.player.health);
            }
        }
    }
}

/// Advance Bubble Destroyer by one step and return the resulting phase
pub fn tick(state: &mut BubbleState, input: &BubbleInput, dt: f32) -> GamePhase {
    state.events.clear();

    if input.reset {
        state.reset();
        return state.phase;
    }

    state.elapsed += dt;

    if state.phase.is_terminal() {
        return state.phase;
    }

    let bullet_free = has_free(&state.bullets);
    let fired = state.player.update(
        input.dir,
        input.shoot,
        bullet_free,
        state.elapsed,
        dt,
        &state.tuning,
    );
    if fired {
        if let Some(slot) = state.spawn_bullet() {
            state.events.push(GameEvent::ShotFired { slot });
        }
    }

    state.update_bullets(dt);
    state.update_bubbles(dt);
    state.resolve_bullet_hits();

    if state.active_bubbles == 0 {
        state.phase = GamePhase::Win;
        state.events.push(GameEvent::Victory);
        log::info!("Bubble Destroyer won after {:.1}s", state.elapsed);
        return state.phase;
    }

    state.resolve_player_contacts();

    if state.player.is_dead() {
        state.phase = GamePhase::Loss;
        state.events.push(GameEvent::Defeat);
        log::info!("Bubble Destroyer lost after {:.1}s", state.elapsed);
    }

    state.phase
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::player::PlayerState;

    fn empty_state() -> BubbleState {
        let mut s = BubbleState::new(BubbleTuning::default(), 7);
        for b in s.bubbles.iter_mut() {
            b.active = false;
        }
        s.active_bubbles = 0;
        s
    }

    /// Park a bubble far from the player so only what the test sets up matters
    fn place(s: &mut BubbleState, tier: Tier, pos: Vec2, vel: Vec2) -> usize {
        let bubble = Bubble::new(tier, pos, vel, &s.tuning);
        s.spawn_bubble(bubble).unwrap()
    }

    fn fire_into(s: &mut BubbleState, slot: usize) {
        let pos = s.bubbles[slot].pos;
        let i = first_free(&s.bullets).unwrap();
        s.bullets[i] = Bullet {
            rect: Rect::new(pos.x - 2.0, pos.y, 4.0, 16.0),
            active: true,
        };
        s.bullet_count += 1;
        s.resolve_bullet_hits();
    }

    #[test]
    fn test_opening_wave() {
        let s = BubbleState::new(BubbleTuning::default(), 42);
        assert_eq!(s.active_bubbles, 2);
        assert!(s.is_consistent());
        for b in s.bubbles.iter().filter(|b| b.active) {
            assert_eq!(b.tier, Tier::Large);
            assert!(b.pos.x >= b.radius && b.pos.x <= SCREEN_WIDTH - b.radius);
        }
    }

    #[test]
    fn test_same_seed_same_wave() {
        let a = BubbleState::new(BubbleTuning::default(), 1234);
        let b = BubbleState::new(BubbleTuning::default(), 1234);
        for (x, y) in a.bubbles.iter().zip(b.bubbles.iter()) {
            assert_eq!(x.pos, y.pos);
            assert_eq!(x.vel, y.vel);
        }
    }

    #[test]
    fn test_large_splits_into_two_medium() {
        let mut s = empty_state();
        let slot = place(&mut s, Tier::Large, Vec2::new(400.0, 200.0), Vec2::new(150.0, 80.0));
        fire_into(&mut s, slot);

        assert_eq!(s.active_bubbles, 2);
        assert_eq!(s.bullet_count, 0);
        assert!(s.is_consistent());

        let pair: Vec<_> = s.bubbles.iter().filter(|b| b.active).collect();
        assert_eq!(pair.len(), 2);
        for b in &pair {
            assert_eq!(b.tier, Tier::Medium);
            assert_eq!(b.radius, 40.0);
            assert_eq!(b.color, palette::ORANGE);
            assert!(b.vel.y < 0.0);
        }
        assert_eq!(pair[0].vel.x, -pair[1].vel.x);
        assert!(pair[0].vel.x.signum() != pair[1].vel.x.signum());
        assert_eq!(pair[0].vel.y, pair[1].vel.y);
        assert!(s.events.contains(&GameEvent::BubbleHit { slot, split: true }));
    }

    #[test]
    fn test_small_pops() {
        let mut s = empty_state();
        let slot = place(&mut s, Tier::Small, Vec2::new(400.0, 200.0), Vec2::new(150.0, 0.0));
        place(&mut s, Tier::Large, Vec2::new(100.0, 150.0), Vec2::ZERO);
        fire_into(&mut s, slot);

        assert!(!s.bubbles[slot].active);
        assert_eq!(s.active_bubbles, 1);
        assert!(s.is_consistent());
        assert!(s.events.contains(&GameEvent::BubbleHit { slot, split: false }));
    }

    #[test]
    fn test_split_with_full_pool_drops_twin() {
        let mut s = empty_state();
        for i in 0..MAX_BUBBLES {
            place(
                &mut s,
                Tier::Medium,
                Vec2::new(50.0 + i as f32 * 90.0, 100.0),
                Vec2::new(150.0, 0.0),
            );
        }
        fire_into(&mut s, 0);
        assert_eq!(s.active_bubbles, MAX_BUBBLES);
        assert_eq!(s.bubbles[0].tier, Tier::Small);
        assert!(s.is_consistent());
    }

    #[test]
    fn test_full_bullet_pool_blocks_shot() {
        let mut s = empty_state();
        place(&mut s, Tier::Large, Vec2::new(100.0, 150.0), Vec2::ZERO);
        for i in 0..MAX_BULLETS {
            s.bullets[i] = Bullet {
                rect: Rect::new(700.0, 300.0, 4.0, 16.0),
                active: true,
            };
        }
        s.bullet_count = MAX_BULLETS;

        let input = BubbleInput {
            shoot: true,
            ..Default::default()
        };
        tick(&mut s, &input, SIM_DT);
        assert_eq!(s.bullet_count, MAX_BULLETS);
        assert!(!s.events.iter().any(|e| matches!(e, GameEvent::ShotFired { .. })));
        assert_ne!(s.player.state, PlayerState::Shoot);
    }

    #[test]
    fn test_shot_spawns_and_leaves_screen() {
        let mut s = empty_state();
        place(&mut s, Tier::Large, Vec2::new(100.0, 150.0), Vec2::ZERO);
        let input = BubbleInput {
            shoot: true,
            ..Default::default()
        };
        tick(&mut s, &input, SIM_DT);
        assert_eq!(s.bullet_count, 1);
        assert!(s.events.contains(&GameEvent::ShotFired { slot: 0 }));

        // Keep the bubble out of the bullet's path and let it fly off the top
        for _ in 0..240 {
            s.bubbles[0].pos = Vec2::new(100.0, 150.0);
            tick(&mut s, &BubbleInput::default(), SIM_DT);
        }
        assert!(!s.bullets[0].active);
        assert!(s.is_consistent());
    }

    #[test]
    fn test_gravity_and_floor_rebound() {
        let mut s = empty_state();
        let slot = place(&mut s, Tier::Medium, Vec2::new(100.0, 561.0), Vec2::new(0.0, 100.0));
        tick(&mut s, &BubbleInput::default(), SIM_DT);
        let b = s.bubbles[slot];
        assert_eq!(b.pos.y, SCREEN_HEIGHT - b.radius);
        assert_eq!(b.vel.y, -s.tuning.floor_rebound_speed);
    }

    #[test]
    fn test_side_wall_bounce() {
        let mut s = empty_state();
        let slot = place(&mut s, Tier::Small, Vec2::new(15.2, 200.0), Vec2::new(-150.0, 0.0));
        tick(&mut s, &BubbleInput::default(), SIM_DT);
        let b = s.bubbles[slot];
        assert_eq!(b.pos.x, b.radius);
        assert!(b.vel.x > 0.0);
    }

    #[test]
    fn test_contact_hurts_once_and_inverts() {
        let mut s = empty_state();
        let player_top = s.player.rect.top();
        let px = s.player.rect.center().x;
        let slot = place(
            &mut s,
            Tier::Small,
            Vec2::new(px, player_top - 10.0),
            Vec2::new(0.0, 200.0),
        );
        tick(&mut s, &BubbleInput::default(), SIM_DT);
        assert_eq!(s.player.health, 2);
        assert_eq!(s.player.state, PlayerState::Damaged);
        assert!(s.bubbles[slot].vel.y < 0.0);
        assert!(s.events.contains(&GameEvent::PlayerHurt { health: 2 }));

        // Still touching and heading in on the next frame: flips again, no damage
        s.bubbles[slot].pos = Vec2::new(px, player_top - 10.0);
        s.bubbles[slot].vel = Vec2::new(0.0, 200.0);
        tick(&mut s, &BubbleInput::default(), SIM_DT);
        assert_eq!(s.player.health, 2);
        assert!(s.bubbles[slot].vel.y < 0.0);
    }

    #[test]
    fn test_floor_bubble_beside_player_rises_clear() {
        let mut s = empty_state();
        let px = s.player.rect.center().x;
        let slot = place(
            &mut s,
            Tier::Large,
            Vec2::new(px - 105.0, SCREEN_HEIGHT - 100.0),
            Vec2::new(150.0, 0.0),
        );

        let mut contact_frames = 0;
        for _ in 0..60 {
            tick(&mut s, &BubbleInput::default(), SIM_DT);
            let b = s.bubbles[slot];
            if circle_intersects_rect(b.pos, b.radius, &s.player.rect) {
                contact_frames += 1;
                // The floor kick points away from the player and must survive contact
                assert!(b.vel.y < 0.0);
            }
        }

        assert!(contact_frames > 0 && contact_frames < 20, "{contact_frames}");
        let b = s.bubbles[slot];
        assert!(!circle_intersects_rect(b.pos, b.radius, &s.player.rect));
        assert_eq!(s.player.health, 2);
    }

    #[test]
    fn test_last_pop_wins_once() {
        let mut s = empty_state();
        let slot = place(&mut s, Tier::Small, Vec2::new(400.0, 100.0), Vec2::ZERO);
        s.bullets[0] = Bullet {
            rect: Rect::new(398.0, 110.0, 4.0, 16.0),
            active: true,
        };
        s.bullet_count = 1;
        assert_eq!(tick(&mut s, &BubbleInput::default(), SIM_DT), GamePhase::Win);
        assert!(!s.bubbles[slot].active);
        assert_eq!(s.events.iter().filter(|e| **e == GameEvent::Victory).count(), 1);

        assert_eq!(tick(&mut s, &BubbleInput::default(), SIM_DT), GamePhase::Win);
        assert!(s.events.is_empty());
    }

    #[test]
    fn test_zero_health_loses_once() {
        let mut s = empty_state();
        s.player.health = 1;
        let px = s.player.rect.center().x;
        let top = s.player.rect.top();
        place(&mut s, Tier::Small, Vec2::new(px, top - 10.0), Vec2::new(0.0, 200.0));
        assert_eq!(tick(&mut s, &BubbleInput::default(), SIM_DT), GamePhase::Loss);
        assert!(s.player.is_dead());
        assert_eq!(s.events.iter().filter(|e| **e == GameEvent::Defeat).count(), 1);

        assert_eq!(tick(&mut s, &BubbleInput::default(), SIM_DT), GamePhase::Loss);
        assert!(s.events.is_empty());
    }

    #[test]
    fn test_reset_restores_wave() {
        let mut s = BubbleState::new(BubbleTuning::default(), 99);
        let before: Vec<_> = s.bubbles.iter().map(|b| b.pos).collect();
        s.player.health = 0;
        s.phase = GamePhase::Loss;
        tick(
            &mut s,
            &BubbleInput {
                reset: true,
                ..Default::default()
            },
            SIM_DT,
        );
        assert_eq!(s.phase, GamePhase::Playing);
        assert_eq!(s.player.health, 3);
        let after: Vec<_> = s.bubbles.iter().map(|b| b.pos).collect();
        assert_eq!(before, after);
    }
}
