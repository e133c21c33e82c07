mod common;

use common::{env, framed, OBS_H, OBS_W};
use harness::{Env, EnvError, Phase, SETTLE_DELAY};
use input::{Action, InputEvent, Key, Pickaxe};
use mission::{ScriptedSim, WorldState};

const ATK_R: usize = 2;
const SWITCH: usize = 3;

/// Mission that starts immediately and delivers a frame on every poll.
fn steady_env(max_steps: u32) -> common::TestEnv {
    env(ScriptedSim::new().otherwise(framed(7)), max_steps)
}

#[test]
fn done_arrives_on_the_step_after_the_cap() {
    let mut env = steady_env(3);
    env.reset().unwrap();

    for expected_count in 1..=3 {
        let step = env.step(ATK_R).unwrap();
        assert!(!step.done, "done early at step {expected_count}");
        assert_eq!(env.episode().step_count, expected_count);
    }

    let events_before = env.rig().device.events.len();
    let step = env.step(ATK_R).unwrap();
    assert!(step.done);
    assert_eq!(env.episode().step_count, 3);
    assert_eq!(env.rig().device.events.len(), events_before, "no input once done");
    assert_eq!(env.phase(), Phase::Done);

    // asking again keeps reporting done without acting
    assert!(env.step(ATK_R).unwrap().done);
    assert_eq!(env.episode().step_count, 3);
}

#[test]
fn observation_is_the_centered_crop() {
    let mut env = steady_env(5);
    let obs = env.reset().unwrap();
    assert_eq!(obs.len(), OBS_W * OBS_H * 3);
    assert!(!obs.is_sentinel());
    assert!(obs.pixels().iter().all(|&v| v == 7));
    assert_eq!(env.obs_size(), obs.len());
    assert_eq!(env.action_size(), 4);
}

#[test]
fn action_is_wrapped_in_commits_and_settles() {
    let mut env = steady_env(5);
    env.reset().unwrap();
    env.rig_mut().device.clear();
    env.rig_mut().clock.sleeps.clear();

    env.step(Action::AttackLeft.index()).unwrap();

    let events = &env.rig().device.events;
    assert_eq!(events.first(), Some(&InputEvent::Press(Key::Enter)));
    assert_eq!(events.last(), Some(&InputEvent::Press(Key::Enter)));
    assert_eq!(env.rig().device.presses(Key::Enter), 2);
    assert_eq!(env.rig().device.displacement(), (0, 0));
    assert_eq!(env.rig().clock.count(SETTLE_DELAY), 1);
}

#[test]
fn pickaxe_persists_within_episode_and_resets() {
    let mut env = steady_env(10);
    env.reset().unwrap();
    assert_eq!(env.episode().pickaxe, Pickaxe::Diamond);

    env.step(SWITCH).unwrap();
    env.step(0).unwrap();
    env.step(ATK_R).unwrap();
    assert_eq!(env.episode().pickaxe, Pickaxe::Golden);

    env.reset().unwrap();
    assert_eq!(env.episode().pickaxe, Pickaxe::Diamond);
    assert_eq!(env.episode().step_count, 0);
    assert_eq!(env.episode().cumulative_return, 0.0);
}

#[test]
fn step_reward_sums_every_event_since_last_poll() {
    let sim = ScriptedSim::new()
        // reset: mission begun, then the first frame (its reward precedes the episode)
        .then(WorldState::running())
        .then(framed(1).with_reward(-100.0))
        // step: done check, a frameless poll, then the frame
        .then(WorldState::running().with_reward(-0.1))
        .then(WorldState::running().with_reward(55.0).with_reward(-0.1))
        .then(framed(2).with_reward(66.0));
    let mut env = env(sim, 10);
    env.reset().unwrap();

    let step = env.step(0).unwrap();
    let expected = -0.1 + 10.0 - 0.1 - 1.0;
    assert!((step.reward - expected).abs() < 1e-9, "got {}", step.reward);
    assert!((env.episode().cumulative_return - expected).abs() < 1e-9);
    assert!(step.observation.pixels().iter().all(|&v| v == 2));
    assert!(step.info.is_empty());
}

#[test]
fn shaping_uses_pickaxe_after_the_action() {
    let sim = ScriptedSim::new()
        .then(WorldState::running())
        .then(framed(1))
        .then(WorldState::running())
        .then(framed(1).with_reward(55.0));
    let mut env = env(sim, 10);
    env.reset().unwrap();

    let step = env.step(SWITCH).unwrap();
    assert_eq!(env.episode().pickaxe, Pickaxe::Golden);
    assert_eq!(step.reward, -1.0);
}

#[test]
fn poll_error_yields_sentinel_and_episode_continues() {
    let sim = ScriptedSim::new()
        .then(WorldState::running())
        .then(framed(1))
        .then(WorldState::running())
        .then(WorldState::running().with_error("video stream interrupted"))
        .otherwise(framed(9));
    let mut env = env(sim, 10);
    env.reset().unwrap();

    let step = env.step(ATK_R).unwrap();
    assert!(!step.done);
    assert!(step.observation.is_sentinel());
    assert_eq!(step.observation.len(), OBS_W * OBS_H * 3);
    assert!(step.observation.pixels().iter().all(|&v| v == 0));

    let step = env.step(ATK_R).unwrap();
    assert!(!step.observation.is_sentinel());
    assert_eq!(env.episode().step_count, 2);
}

#[test]
fn ended_mission_is_done_with_sentinel() {
    let sim = ScriptedSim::new()
        .then(WorldState::running())
        .then(framed(1))
        .then(WorldState::ended().with_reward(-100.0));
    let mut env = env(sim, 10);
    env.reset().unwrap();
    let events_before = env.rig().device.events.len();

    let step = env.step(ATK_R).unwrap();
    assert!(step.done);
    assert!(step.observation.is_sentinel());
    assert_eq!(step.reward, -100.0);
    assert_eq!(env.episode().step_count, 0);
    assert_eq!(env.rig().device.events.len(), events_before);
}

#[test]
fn frames_without_colour_channel_give_sentinel() {
    let depth = mission::VideoFrame::new(
        common::VIDEO_W,
        common::VIDEO_H,
        mission::FrameType::DepthMap,
        vec![5; common::VIDEO_W * common::VIDEO_H * 3],
    );
    let sim = ScriptedSim::new()
        .then(WorldState::running())
        .then(WorldState::running().with_frame(depth));
    let mut env = env(sim, 10);
    let obs = env.reset().unwrap();
    assert!(obs.is_sentinel());
}

#[test]
fn undersized_frame_fails_after_booking_rewards() {
    let small = mission::VideoFrame::new(2, 2, mission::FrameType::ColourMap, vec![3; 2 * 2 * 3]);
    let sim = ScriptedSim::new()
        .then(WorldState::running())
        .then(framed(1))
        .then(WorldState::running().with_reward(55.0))
        .then(WorldState::running().with_frame(small.clone()).with_reward(-0.1))
        .then(WorldState::running())
        .then(WorldState::running().with_frame(small));
    let mut env = env(sim, 1);
    env.reset().unwrap();

    let err = env.step(ATK_R).unwrap_err();
    assert!(matches!(err, EnvError::Vision(_)), "got {err:?}");
    assert_eq!(env.episode().step_count, 1);
    assert!((env.episode().cumulative_return - 9.9).abs() < 1e-9);
    assert_eq!(env.phase(), Phase::Running);

    // the cap is reached: the failing step still ends the episode
    assert!(env.step(ATK_R).is_err());
    assert_eq!(env.episode().step_count, 1);
    assert_eq!(env.phase(), Phase::Done);
}

#[test]
fn out_of_range_action_is_rejected() {
    let mut env = steady_env(5);
    env.reset().unwrap();
    let err = env.step(4).unwrap_err();
    assert!(matches!(err, EnvError::InvalidAction { index: 4, count: 4 }), "got {err:?}");
    assert_eq!(env.episode().step_count, 0);
}

#[test]
fn step_before_reset_is_rejected() {
    let mut env = steady_env(5);
    assert!(matches!(env.step(0), Err(EnvError::NotStarted)));
    assert_eq!(env.phase(), Phase::Idle);
}

#[test]
fn fatal_start_surfaces_from_reset() {
    let mut env = env(ScriptedSim::new().failing_starts(3), 5);
    let err = env.reset().unwrap_err();
    assert!(err.is_fatal(), "got {err:?}");
    assert!(env.history().is_empty());
}

#[test]
fn drives_through_the_trait() {
    fn rollout<E: Env>(env: &mut E, actions: &[usize]) -> (usize, f64) {
        let first = env.reset().unwrap();
        let mut total = 0.0;
        for &a in actions {
            let step = env.step(a).unwrap();
            assert_eq!(step.observation.len(), first.len());
            total += step.reward;
            if step.done {
                break;
            }
        }
        (first.len(), total)
    }

    let mut env = env(ScriptedSim::new().otherwise(framed(3).with_reward(-0.1)), 4);
    let (len, total) = rollout(&mut env, &[0, 1, 2, 3, 0, 1]);
    assert_eq!(len, env.obs_size());
    assert!(total < 0.0);
}
