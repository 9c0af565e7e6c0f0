use {
  super::*,
  crate::{
    strategy::{
      BlackTarget, FixedStart, LocationPreference, PerlinPreference, PreferredLocation,
      SequentialLocation
    }
  },
  anyhow::Result,
  std::collections::HashSet
};

fn assert_frontier_matches_filled(engine: &GrowthEngine) {
  let tracker = engine.tracker();
  let expected: HashSet<_> = itertools::iproduct!(0..engine.width() as i32, 0..engine.height() as i32)
    .map(|(i, j)| Point::new(i, j))
    .filter(|&p| !tracker.is_filled(p) && p.neighbors().any(|n| tracker.is_filled(n)))
    .collect();
  let actual: HashSet<_> = tracker.frontier().iter().copied().collect();
  assert_eq!(actual, expected);
}

#[test] fn three_by_three_from_center() -> Result<()> {
  let mut engine = GrowthEngine::new(3, 3, 1)?
    .with_initial_location_generator(FixedStart(vec![Point::new(1, 1)]));
  assert_eq!(engine.state(), State::Seeded);

  let mut steps = 0;
  while engine.iterate()? {
    steps += 1;
    assert_eq!(engine.state(), State::Growing);
  }
  steps += 1;
  assert_eq!(steps, 9);
  assert_eq!(engine.state(), State::Done);
  assert_eq!(engine.filled_count(), 9);
  assert_eq!(engine.tracker().frontier_size(), 0);
  Ok(())
}

#[test] fn first_pixel_is_the_seed() -> Result<()> {
  let mut engine = GrowthEngine::new(8, 8, 0)?
    .with_initial_location_generator(FixedStart(vec![Point::new(6, 2)]));
  engine.iterate()?;
  assert!(engine.tracker().is_filled(Point::new(6, 2)));
  assert_eq!(engine.tracker().frontier_size(), 8);
  assert_eq!(engine.palette().colors_remaining(), 63);
  Ok(())
}

#[test] fn fills_every_pixel_once() -> Result<()> {
  let mut engine = GrowthEngine::new(40, 25, 7)?.with_epsilon(2.0)?;
  engine.iterate_until_done()?;
  assert_eq!(engine.state(), State::Done);
  assert_eq!(engine.filled_count(), 1000);
  assert_eq!(engine.palette().colors_remaining(), 0);

  let unique: HashSet<_> = engine.pixels().iter().collect();
  assert_eq!(unique.len(), 1000);
  Ok(())
}

#[test] fn deterministic_given_seed() -> Result<()> {
  let run = |seed| -> Result<Vec<Color>> {
    let mut engine = GrowthEngine::new(32, 16, seed)?
      .with_location_generator(PreferredLocation::new(5))
      .with_preference_generator(LocationPreference::default());
    engine.set_epsilon(1.0)?;
    engine.iterate_until_done()?;
    Ok(engine.pixels().to_vec())
  };
  assert_eq!(run(11)?, run(11)?);
  assert_ne!(run(11)?, run(12)?);
  Ok(())
}

#[test] fn frontier_tracks_filled_region() -> Result<()> {
  let mut engine = GrowthEngine::new(12, 9, 3)?;
  while engine.iterate()? {
    assert_frontier_matches_filled(&engine);
  }
  assert_frontier_matches_filled(&engine);
  Ok(())
}

#[test] fn sequential_black_target_is_ordered() -> Result<()> {
  let mut engine = GrowthEngine::new(4, 2, 0)?
    .with_location_generator(SequentialLocation::default())
    .with_target_color_generator(BlackTarget);
  engine.iterate_until_done()?;
  // the uniform palette of 8 colors, popped closest-to-black first
  let magnitudes: Vec<_> = engine.pixels().iter().map(Color::magnitude).collect();
  assert!(magnitudes.windows(2).all(|w| w[0] <= w[1]));
  assert_eq!(engine.pixel(0, 0), Some(Color::BLACK));
  assert_eq!(engine.pixel(3, 1), Some(Color::new(255, 255, 255)));
  assert_eq!(engine.pixel(4, 1), None);
  Ok(())
}

#[test] fn average_color_follows_neighbors() -> Result<()> {
  // grown left to right, every cell after the first has exactly one filled neighbor,
  // so it takes the remaining color closest to that neighbor
  let reds: Vec<u8> = (0..6).map(|k| k * 40).collect();
  let palette = reds.clone();
  let mut engine = GrowthEngine::new(6, 1, 0)?
    .with_initial_location_generator(FixedStart(vec![Point::new(0, 0)]))
    .with_location_generator(SequentialLocation::default())
    .with_palette_generator(move |_: &mut Pcg64, _: usize| -> Result<Vec<Color>> {
      Ok(palette.iter().map(|&r| Color::new(r, 0, 0)).collect())
    });
  engine.iterate_until_done()?;

  let painted: Vec<u8> = engine.pixels().iter().map(|c| c.r).collect();
  let mut remaining: HashSet<u8> = reds.into_iter().collect();
  assert!(remaining.remove(&painted[0]));
  for pair in painted.windows(2) {
    let best = remaining.iter()
      .map(|&r| (r as i32 - pair[0] as i32).abs())
      .min()
      .unwrap();
    assert_eq!((pair[1] as i32 - pair[0] as i32).abs(), best);
    assert!(remaining.remove(&pair[1]));
  }
  Ok(())
}

#[test] fn small_palette_is_regenerated() -> Result<()> {
  let calls = std::rc::Rc::new(std::cell::Cell::new(0));
  let counter = calls.clone();
  let mut engine = GrowthEngine::new(5, 5, 2)?
    .with_palette_generator(move |_: &mut Pcg64, _: usize| -> Result<Vec<Color>> {
      counter.set(counter.get() + 1);
      Ok((0..10).map(|k| Color::new(k * 20, 0, 0)).collect())
    });
  engine.iterate_until_done()?;
  assert_eq!(calls.get(), 3);
  assert_eq!(engine.filled_count(), 25);
  assert_eq!(engine.palette().colors_remaining(), 5);
  Ok(())
}

#[test] fn closures_as_strategies() -> Result<()> {
  let mut engine = GrowthEngine::new(10, 10, 5)?
    .with_initial_location_generator(|_: &mut Pcg64, w: u32, h: u32| {
      vec![Point::new(0, 0), Point::new(w as i32 - 1, h as i32 - 1)]
    })
    .with_location_generator(|_: &mut Pcg64, tracker: &mut FrontierTracker| {
      tracker.pop_frontier_at_index(tracker.frontier_size() - 1)
    })
    .with_target_color_generator(|_: &mut Pcg64, _: &[Color], p: Point| {
      Color::new(p.i() as u8 * 20, p.j() as u8 * 20, 0)
    });
  engine.iterate_until_done()?;
  assert_eq!(engine.filled_count(), 100);
  Ok(())
}

#[test] fn perlin_preference_run() -> Result<()> {
  let mut engine = GrowthEngine::new(20, 20, 9)?;
  let perlin = PerlinPreference::new(engine.rng_mut(), 5.0, 3);
  let mut engine = engine
    .with_location_generator(PreferredLocation::new(4))
    .with_preference_generator(perlin);
  engine.iterate_until_done()?;
  assert_eq!(engine.filled_count(), 400);
  assert!(engine.tracker().frontier().is_empty());
  Ok(())
}

#[test] fn reset_starts_over() -> Result<()> {
  let mut engine = GrowthEngine::new(6, 6, 4)?;
  engine.iterate_until_done()?;
  engine.reset();
  assert_eq!(engine.state(), State::Seeded);
  assert_eq!(engine.filled_count(), 0);
  assert!(engine.pixels().iter().all(|&c| c == Color::BLACK));
  // the exhausted palette is regenerated on demand
  engine.iterate_until_done()?;
  assert_eq!(engine.filled_count(), 36);
  Ok(())
}

#[test] fn configuration_errors() -> Result<()> {
  assert!(GrowthEngine::new(0, 4, 0).is_err());
  assert!(GrowthEngine::new(5000, 5000, 0).is_err());
  assert!(GrowthEngine::new(4, 4, 0)?.with_epsilon(-1.0).is_err());
  assert!(GrowthEngine::new(4, 4, 0)?.with_epsilon(f64::NAN).is_err());

  let mut engine = GrowthEngine::new(4, 4, 0)?
    .with_initial_location_generator(FixedStart(vec![Point::new(-1, 7)]));
  assert!(engine.iterate().is_err());

  let mut engine = GrowthEngine::new(4, 4, 0)?
    .with_palette_generator(|_: &mut Pcg64, _: usize| -> Result<Vec<Color>> { Ok(vec![]) });
  assert!(engine.iterate().is_err());
  Ok(())
}

#[test] #[should_panic(expected = "reset()")] fn iterate_after_done() {
  let mut engine = GrowthEngine::new(2, 2, 0).unwrap();
  engine.iterate_until_done().unwrap();
  engine.iterate().ok();
}
