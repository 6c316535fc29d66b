use criterion::{criterion_group, criterion_main, Criterion};
use physics::{Action, CartPole};

fn bench_cartpole_episode(c: &mut Criterion) {
    c.bench_function("cartpole_episode", |b| {
        let mut env = CartPole::new(0);
        b.iter(|| {
            env.reset();
            let mut i = 0usize;
            while !env.step(if i % 2 == 0 { Action::Left } else { Action::Right }).done && i < 500 {
                i += 1;
            }
        });
    });
}

criterion_group!(benches, bench_cartpole_episode);
criterion_main!(benches);
