use bevy::prelude::*;

use crate::common::tunables::Tunables;
use crate::plugins::core;

#[test]
fn inserts_resources() {
    let mut app = App::new();
    core::plugin(&mut app);
    assert!(app.world().get_resource::<Tunables>().is_some());
    assert!(app.world().get_resource::<core::GameRng>().is_some());
    assert!(app.world().get_resource::<ClearColor>().is_some());
}

#[test]
fn seeded_rng_is_reproducible() {
    use rand::RngCore;

    let mut a = core::GameRng::seeded(7);
    let mut b = core::GameRng::seeded(7);
    for _ in 0..100 {
        assert_eq!(a.0.next_u64(), b.0.next_u64());
    }
}
