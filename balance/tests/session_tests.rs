use balance::{app, Session, TrainConfig};

fn config(seed: u64) -> TrainConfig {
    TrainConfig { seed, max_steps: 200, ..TrainConfig::default() }
}

#[test]
fn advance_yields_between_batches_without_losing_steps() {
    let mut session = Session::new(&config(1)).unwrap();
    let mut finished = None;
    let mut calls = 0;
    while finished.is_none() {
        finished = session.advance(3).unwrap();
        calls += 1;
        if finished.is_none() {
            assert_eq!(session.agent().episode_len(), calls * 3);
        }
    }
    let summary = finished.unwrap();
    assert!(summary.score > 0 && summary.score <= 3 * calls);
    assert_eq!(summary.episode, 1);
    assert!(session.agent().buffer().is_empty());
    assert_eq!(session.metrics().episode(), 1);
}

#[test]
fn episodes_end_by_termination_or_step_cap() {
    let mut session = Session::new(&TrainConfig { max_steps: 5, ..config(2) }).unwrap();
    for _ in 0..10 {
        let s = session.run_episode().unwrap();
        assert!(s.score <= 5);
        if s.truncated {
            assert_eq!(s.score, 5);
        }
        assert!(s.report.is_some());
    }
    assert_eq!(session.metrics().episode(), 10);
    assert!(session.metrics().best_score() <= 5);
}

#[test]
fn rebuild_swaps_in_a_fresh_pair_of_new_width() {
    let mut session = Session::new(&config(3)).unwrap();
    session.set_learning_rate(0.05).unwrap();
    session.run_episode().unwrap();
    session.advance(2).unwrap();

    session.rebuild(32).unwrap();
    assert_eq!(session.agent().hidden_width(), 32);
    assert_eq!(session.parameters().input_hidden.shape, vec![4, 32]);
    assert!(session.agent().buffer().is_empty());
    assert_eq!(session.metrics().episode(), 0);
    assert_eq!(session.agent().learning_rate(), 0.05);
    for v in session.env().state().to_array() {
        assert!(v.abs() <= 0.025);
    }
}

#[test]
fn rebuild_with_zero_width_keeps_current_pair() {
    let mut session = Session::new(&config(4)).unwrap();
    assert!(session.rebuild(0).is_err());
    assert_eq!(session.agent().hidden_width(), 16);
}

#[test]
fn evaluation_is_deterministic_and_leaves_training_alone() {
    let mut session = Session::new(&config(5)).unwrap();
    session.advance(4).unwrap();
    let len = session.agent().episode_len();
    let state = session.env().state();

    let a = session.evaluate(99);
    let b = session.evaluate(99);
    assert_eq!(a, b);
    assert!(a >= 1 && a <= 200);
    assert_eq!(session.agent().episode_len(), len);
    assert_eq!(session.env().state(), state);
}

#[test]
fn invalid_config_is_rejected_up_front() {
    let bad = TrainConfig { hidden_width: 0, ..TrainConfig::default() };
    assert!(Session::new(&bad).is_err());
    assert!(app::run(&bad, None).is_err());
}

#[test]
fn zero_step_cap_is_rejected_not_clamped() {
    for bad in [
        TrainConfig { max_steps: 0, ..TrainConfig::default() },
        TrainConfig { log_every: 0, ..TrainConfig::default() },
    ] {
        assert!(bad.validate().is_err());
        let err = Session::new(&bad).err().expect("session should refuse config");
        assert!(err.to_string().contains("must be at least 1"), "{err}");
    }
}

#[test]
fn run_writes_parameter_dump() {
    let path = std::env::temp_dir().join(format!("balance-params-{}.json", std::process::id()));
    let cfg = TrainConfig { episodes: 3, hidden_width: 8, ..config(6) };
    app::run(&cfg, Some(&path)).unwrap();

    let json = std::fs::read_to_string(&path).unwrap();
    let params: balance::ml::NetworkParameters = serde_json::from_str(&json).unwrap();
    assert_eq!(params.hidden_width(), 8);
    assert_eq!(params.hidden_output.shape, vec![8, 2]);
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn shipped_config_matches_defaults() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("configs/default.json");
    assert_eq!(TrainConfig::load(&path).unwrap(), TrainConfig::default());
}
