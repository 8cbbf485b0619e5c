//! Fixed timestep simulation tick
//!
//! One tick is one video frame. Integration is semi-implicit Euler with the
//! frame as the time unit.

use super::collision::{boundary_collision, reflect_velocity};
use super::state::{BounceEvent, FrameRecord, Simulation};

/// Advance the simulation by one frame
///
/// Returns the bounce event emitted on this frame, if any.
pub fn tick(sim: &mut Simulation) -> Option<&BounceEvent> {
    let frame = sim.frame;
    sim.frame += 1;

    // Snapshot before integration
    sim.trace.push(FrameRecord {
        x: sim.ball.pos.x,
        y: sim.ball.pos.y,
        bounce_count: sim.bounce_count,
    });

    let radius = sim.effective_radius();

    sim.ball.vel.y += sim.physics.gravity;
    sim.ball.pos += sim.ball.vel;

    let hit = boundary_collision(
        sim.ball.pos,
        sim.ball.vel,
        radius,
        sim.centre,
        sim.physics.circle_radius,
    );
    if !hit.hit {
        return None;
    }

    sim.ball.vel = reflect_velocity(sim.ball.vel, hit.normal, sim.physics.bounciness);
    sim.ball.pos += hit.normal * hit.penetration;

    let notes = sim
        .pool
        .window(sim.note_index, sim.window.notes_per_bounce);
    log::debug!(
        "Bounce {} at frame {} (pool index {}, {} notes)",
        sim.bounce_count + 1,
        frame,
        sim.note_index,
        notes.len()
    );
    sim.events.push(BounceEvent {
        frame,
        time: crate::frame_to_secs(frame, sim.fps),
        notes,
    });
    sim.note_index = sim.pool.advance(sim.note_index, sim.window.stride);
    sim.bounce_count += 1;

    sim.events.last()
}

impl Simulation {
    /// Simulate `frames` more frames
    pub fn run(&mut self, frames: u32) {
        for _ in 0..frames {
            tick(self);
        }
    }

    /// Reset and simulate from frame 0
    pub fn replay(&mut self, frames: u32) {
        self.reset();
        self.run(frames);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::{Note, NotePool};
    use crate::settings::Settings;
    use crate::sim::state::effective_radius;
    use glam::DVec2;
    use proptest::prelude::*;

    fn pool(len: usize) -> NotePool {
        NotePool::from(
            (0..len)
                .map(|i| Note {
                    name: format!("n{i}"),
                    midi: 48 + (i % 40) as u8,
                    time: 23.0 + i as f64 * 0.1,
                    velocity: 0.6,
                    duration: 0.4,
                })
                .collect::<Vec<_>>(),
        )
    }

    fn default_sim() -> Simulation {
        Simulation::new(&Settings::default(), pool(300))
    }

    #[test]
    fn test_first_frame_records_launch_position() {
        let mut sim = default_sim();
        assert!(tick(&mut sim).is_none());
        assert_eq!(sim.trace.len(), 1);
        assert_eq!(sim.trace[0].pos(), DVec2::new(540.0, 960.0));
        assert_eq!(sim.trace[0].bounce_count, 0);
        // Semi-implicit Euler: gravity applied before the move
        assert!((sim.ball.vel - DVec2::new(10.0, 12.2)).length() < 1e-12);
        assert!((sim.ball.pos - DVec2::new(550.0, 972.2)).length() < 1e-9);
    }

    #[test]
    fn test_first_bounce_frame() {
        // After n steps: x = 10n, y = 12n + 0.1n(n+1). Step 23 is the first
        // with |d| > 450 - 60, and step n runs on frame n - 1.
        let mut sim = default_sim();
        sim.run(22);
        assert!(sim.events.is_empty());

        let event = tick(&mut sim).cloned().expect("bounce on frame 22");
        assert_eq!(event.frame, 22);
        assert!((event.time - 22.0 / 60.0).abs() < 1e-12);
        let names: Vec<&str> = event.notes.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["n0", "n1", "n2", "n3", "n4"]);
        assert_eq!(sim.note_index, 5);
        assert_eq!(sim.bounce_count, 1);
    }

    #[test]
    fn test_bounce_corrects_penetration() {
        let mut sim = default_sim();
        sim.run(22);
        let radius = sim.effective_radius();
        tick(&mut sim);
        let dist = (sim.ball.pos - sim.centre).length();
        assert!((dist + radius - 450.0).abs() < 1e-9);
    }

    #[test]
    fn test_trace_and_bounce_counts() {
        let mut sim = default_sim();
        sim.run(600);
        let (trace, events) = sim.into_output();
        assert_eq!(trace.len(), 600);
        assert!(!events.is_empty());

        // Strictly increasing event frames
        assert!(events.windows(2).all(|w| w[0].frame < w[1].frame));

        // The record after an event frame carries one more bounce
        let mut expected = 0;
        let mut next_event = events.iter().peekable();
        for (frame, rec) in trace.iter().enumerate() {
            assert_eq!(rec.bounce_count, expected, "frame {frame}");
            if next_event.peek().is_some_and(|e| e.frame as usize == frame) {
                next_event.next();
                expected += 1;
            }
        }
    }

    #[test]
    fn test_note_index_period() {
        // 300 / 5 = 60 bounces brings the index back to 0
        let mut sim = default_sim();
        let mut seen = Vec::new();
        while sim.events.len() < 61 && sim.frame < 100_000 {
            if tick(&mut sim).is_some() {
                seen.push(sim.note_index);
            }
        }
        assert_eq!(seen.len(), 61);
        assert_eq!(seen[59], 0);
        assert_eq!(seen[60], 5);
        assert_eq!(sim.events[60].notes[0].name, "n0");
    }

    #[test]
    fn test_empty_pool_still_bounces() {
        let mut sim = Simulation::new(&Settings::default(), NotePool::default());
        sim.run(23);
        assert_eq!(sim.bounce_count, 1);
        assert_eq!(sim.events.len(), 1);
        assert!(sim.events[0].notes.is_empty());
        assert_eq!(sim.note_index, 0);
    }

    #[test]
    fn test_reset_replays_identically() {
        let mut sim = default_sim();
        sim.run(400);
        let first = (sim.trace.clone(), sim.events.clone());

        sim.replay(400);
        assert_eq!(sim.trace, first.0);
        assert_eq!(sim.events, first.1);

        sim.reset();
        assert_eq!(sim.frame, 0);
        assert_eq!(sim.bounce_count, 0);
        assert_eq!(sim.note_index, 0);
        assert!(sim.trace.is_empty() && sim.events.is_empty());
    }

    #[test]
    fn test_elastic_bounce_preserves_speed() {
        let mut sim = default_sim();
        sim.run(22);
        tick(&mut sim);
        // Speed right after gravity on the bounce frame equals speed after reflection
        let pre = DVec2::new(10.0, 12.0 + 0.2 * 23.0);
        assert!((sim.ball.vel.length() - pre.length()).abs() < 1e-9);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_trace_len_matches_frames(frames in 0u32..1500) {
            let mut sim = default_sim();
            sim.run(frames);
            prop_assert_eq!(sim.trace.len(), frames as usize);
            prop_assert!(sim.trace.windows(2).all(|w| w[0].bounce_count <= w[1].bounce_count));
            prop_assert_eq!(sim.bounce_count as usize, sim.events.len());
        }

        #[test]
        fn prop_collisions_resolve_contact(
            vx in -15.0f64..15.0,
            vy in -15.0f64..15.0,
            gravity in 0.05f64..0.5,
        ) {
            let mut settings = Settings::default();
            settings.physics.initial_velocity = DVec2::new(vx, vy);
            settings.physics.gravity = gravity;
            let mut sim = Simulation::new(&settings, pool(20));

            // Only while the head still fits inside the arena
            while sim.frame < 2000
                && effective_radius(&sim.physics, sim.bounce_count + 1) < sim.physics.circle_radius
            {
                let radius = sim.effective_radius();
                let before = sim.ball;
                if tick(&mut sim).is_some() {
                    let vel = before.vel + DVec2::new(0.0, gravity);
                    let raw = before.pos + vel;
                    prop_assert!((raw - sim.centre).length() + radius >= sim.physics.circle_radius);
                    let dist = (sim.ball.pos - sim.centre).length();
                    prop_assert!(dist + radius <= sim.physics.circle_radius + 1e-9);
                    prop_assert!((sim.ball.vel.length() - vel.length()).abs() < 1e-9);
                }
            }
        }
    }
}
