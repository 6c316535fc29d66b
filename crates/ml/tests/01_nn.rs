use ml::nn::{self, Dense};

fn close(a: &[f32], b: &[f32]) -> bool {
    a.iter().zip(b).all(|(x, y)| (*x - *y).abs() < 1e-5)
}

#[test]
fn dense_forward_known_case() {
    // [in=3, out=2], row-major
    let w = vec![1.0, -1.0,
                 0.5, 2.0,
                 0.2, 0.2];
    let b = vec![0.1, -0.1];
    let dense = Dense::new(w, b, 3, 2);
    let y = dense.forward(&[1.0, 2.0, 3.0]);
    assert!(close(&y, &[2.7, 3.5]), "{y:?}");
}

#[test]
fn dense_backward_gradients() {
    let w = vec![1.0, -3.0,
                 2.0, 0.5];
    let b = vec![0.1, -0.2];
    let dense = Dense::new(w, b, 2, 2);
    let x = [0.5, -1.0];
    let grad_out = [1.0, -2.0];
    let mut acc = dense.zero_grads();
    let dx = dense.backward(&x, &grad_out, &mut acc);

    let expected_dx = [1.0 * 1.0 + -3.0 * -2.0, 2.0 * 1.0 + 0.5 * -2.0];
    let expected_dw = [0.5 * 1.0, 0.5 * -2.0,
                       -1.0 * 1.0, -1.0 * -2.0];
    assert!(close(&dx, &expected_dx));
    assert!(close(&acc.w.data, &expected_dw));
    assert!(close(&acc.b.data, &grad_out));
}

#[test]
fn dense_backward_accumulates_across_calls() {
    let dense = Dense::new(vec![1.0, 1.0], vec![0.0], 2, 1);
    let mut acc = dense.zero_grads();
    dense.backward(&[1.0, 2.0], &[1.0], &mut acc);
    dense.backward(&[3.0, 4.0], &[0.5], &mut acc);
    assert!(close(&acc.w.data, &[2.5, 4.0]));
    assert!(close(&acc.b.data, &[1.5]));
}

#[test]
fn gaussian_init_stats() {
    let mut rng = fastrand::Rng::with_seed(42);
    let dense = Dense::gaussian(64, 64, 0.1, &mut rng);
    assert_eq!(dense.w.shape, vec![64, 64]);
    assert!(dense.b.data.iter().all(|&v| v == 0.0));

    let n = dense.w.data.len() as f32;
    let mean: f32 = dense.w.data.iter().sum::<f32>() / n;
    let var: f32 = dense.w.data.iter().map(|&x| (x - mean).powi(2)).sum::<f32>() / n;
    assert!(mean.abs() < 0.01, "mean {mean}");
    assert!((var.sqrt() - 0.1).abs() < 0.01, "std {}", var.sqrt());
    assert!(dense.w.is_finite());
}

#[test]
fn tanh_forward_backward() {
    let h = nn::tanh(&[0.0, 1.0]);
    assert!(close(&h, &[0.0, 1.0f32.tanh()]));
    let g = nn::tanh_backward(&h, &[0.2, -0.1]);
    let t1 = 1.0f32.tanh();
    assert!(close(&g, &[0.2, -0.1 * (1.0 - t1 * t1)]));
}

#[test]
fn softmax_is_a_distribution_for_arbitrary_logits() {
    let mut rng = fastrand::Rng::with_seed(7);
    for _ in 0..1000 {
        let logits = [(rng.f32() - 0.5) * 200.0, (rng.f32() - 0.5) * 200.0];
        let p = nn::softmax(&logits);
        assert!(p.iter().all(|&v| v >= 0.0 && v.is_finite()));
        assert!((p.iter().sum::<f32>() - 1.0).abs() < 1e-6);
    }
}

#[test]
fn softmax_extreme_logits_stay_finite() {
    let p = nn::softmax(&[1000.0, -1000.0]);
    assert_eq!(p, vec![1.0, 0.0]);
    let p = nn::softmax(&[-1000.0, 1000.0]);
    assert_eq!(p, vec![0.0, 1.0]);
}
