use {
  super::*,
  crate::random,
  std::collections::HashSet
};

fn tracker_with_frontier(width: u32, height: u32, filled: &[(i32, i32)]) -> FrontierTracker {
  let mut tracker = FrontierTracker::new(width, height);
  for &(i, j) in filled {
    tracker.fill(Point::new(i, j), |p, _| p.i() as f64);
  }
  tracker
}

#[test] fn uniform_palette_generator() -> Result<()> {
  let colors = UniformPalette.generate(&mut random::seeded(0), 27)?;
  assert_eq!(colors.len(), 27);
  assert_eq!(colors.iter().collect::<HashSet<_>>().len(), 27);
  Ok(())
}

#[test] fn random_start_in_bounds() {
  let mut rng = random::seeded(5);
  for _ in 0..200 {
    let seeds = RandomStart.initial_locations(&mut rng, 7, 3);
    assert_eq!(seeds.len(), 1);
    assert!((0..7).contains(&seeds[0].i()) && (0..3).contains(&seeds[0].j()));
  }
}

#[test] fn fixed_start_repeats() {
  let mut start = FixedStart(vec![Point::new(1, 2), Point::new(3, 0)]);
  let mut rng = random::seeded(0);
  assert_eq!(start.initial_locations(&mut rng, 4, 4), start.initial_locations(&mut rng, 4, 4));
}

#[test] fn random_frontier_pops() {
  let mut tracker = tracker_with_frontier(5, 5, &[(2, 2)]);
  let mut rng = random::seeded(1);
  let p = RandomFrontier.next_location(&mut rng, &mut tracker);
  assert!(!tracker.is_in_frontier(p));
  assert!(!tracker.is_filled(p));
  assert_eq!(tracker.frontier_size(), 7);
  assert!(p.neighbors().any(|n| n == Point::new(2, 2)));
}

#[test] fn sequential_scans_row_major() {
  let mut tracker = FrontierTracker::new(3, 2);
  let mut rng = random::seeded(0);
  let mut scan = SequentialLocation::default();

  let mut order = vec![];
  for _ in 0..6 {
    let p = scan.next_location(&mut rng, &mut tracker);
    tracker.fill(p, |_, _| 0.0);
    order.push((p.i(), p.j()));
  }
  assert_eq!(order, vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]);
  assert_eq!(tracker.frontier_size(), 0);
}

#[test] fn sequential_skips_filled_and_restarts() {
  let mut tracker = tracker_with_frontier(3, 3, &[(0, 0), (1, 0)]);
  let mut rng = random::seeded(0);
  let mut scan = SequentialLocation::default();

  let p = scan.next_location(&mut rng, &mut tracker);
  assert_eq!(p, Point::new(2, 0));
  // the frontier entry is taken over, preference included
  assert_eq!(p.preference, 2.0);
  assert!(!tracker.is_in_frontier(p));

  tracker.clear();
  assert_eq!(scan.next_location(&mut rng, &mut tracker), Point::new(0, 0));
}

#[test] #[should_panic(expected = "ran past the end")] fn sequential_on_full_canvas() {
  let mut tracker = tracker_with_frontier(2, 1, &[(0, 0), (1, 0)]);
  SequentialLocation::default().next_location(&mut random::seeded(0), &mut tracker);
}

#[test] fn preferred_location_takes_best_sample() {
  // preferences equal the column index, so with enough samples the rightmost column wins
  let mut tracker = tracker_with_frontier(9, 1, &[(4, 0)]);
  let mut rng = random::seeded(2);
  let mut strategy = PreferredLocation::new(64);
  assert_eq!(strategy.next_location(&mut rng, &mut tracker), Point::new(5, 0));
  assert_eq!(tracker.frontier(), &[Point::new(3, 0)]);
}

#[test] fn preferred_location_single_sample() {
  let mut tracker = tracker_with_frontier(5, 5, &[(2, 2)]);
  let mut rng = random::seeded(3);
  let p = PreferredLocation::new(0).next_location(&mut rng, &mut tracker);
  assert_eq!(tracker.frontier_size(), 7);
  assert!(!tracker.is_in_frontier(p));
}

#[test] fn location_preference_favors_goal() {
  let tracker = tracker_with_frontier(20, 20, &[]);
  let mut rng = random::seeded(4);
  let mut preference = LocationPreference::default();
  assert_eq!(preference.goal(), None);

  let first = preference.preference(&mut rng, Point::new(0, 0), &tracker);
  let goal = preference.goal().unwrap();
  assert_eq!(preference.preference(&mut rng, goal, &tracker), 0.0);
  assert!(first <= 0.0);
  // the goal sticks while it is unfilled
  let near = preference.preference(&mut rng, Point::new(goal.i() + 1, goal.j()), &tracker);
  assert_eq!(near, -1.0);
  assert_eq!(preference.goal(), Some(goal));
}

#[test] fn location_preference_redraws_filled_goal() {
  let mut tracker = FrontierTracker::new(10, 10);
  let mut rng = random::seeded(6);
  let mut preference = LocationPreference::default();
  preference.preference(&mut rng, Point::new(0, 0), &tracker);
  let goal = preference.goal().unwrap();

  tracker.fill(goal, |_, _| 0.0);
  for _ in 0..32 {
    preference.preference(&mut rng, Point::new(0, 0), &tracker);
    if preference.goal() != Some(goal) {
      break;
    }
  }
  assert_ne!(preference.goal(), Some(goal));
  assert!(!tracker.is_filled(preference.goal().unwrap()));
}

#[test] fn perlin_strategies_are_deterministic() {
  let tracker = FrontierTracker::new(8, 8);
  let mut a = PerlinPreference::new(&mut random::seeded(9), 4.0, 3);
  let mut b = PerlinPreference::new(&mut random::seeded(9), 4.0, 3);
  let mut rng = random::seeded(0);
  for k in 0..8 {
    let p = Point::new(k, 7 - k);
    assert_eq!(a.preference(&mut rng, p, &tracker), b.preference(&mut rng, p, &tracker));
  }

  let mut color = PerlinColor::new(&mut random::seeded(9), 4.0, 3);
  let c = color.target_color(&mut rng, &[], Point::new(3, 3));
  assert!(c.r == c.g && c.g == c.b);
  // zero noise on the lattice maps to mid grey
  assert_eq!(color.target_color(&mut rng, &[], Point::new(0, 0)), Color::new(128, 128, 128));
}

#[test] fn average_color() {
  let mut rng = random::seeded(0);
  let neighbors = [Color::new(10, 0, 255), Color::new(20, 1, 255), Color::new(31, 2, 0)];
  let avg = AverageColor.target_color(&mut rng, &neighbors, Point::new(0, 0));
  assert_eq!(avg, Color::new(20, 1, 170));

  let single = AverageColor.target_color(&mut rng, &[Color::new(1, 2, 3)], Point::new(0, 0));
  assert_eq!(single, Color::new(1, 2, 3));
}

#[test] fn average_color_without_neighbors_is_random() {
  let draw = |seed| AverageColor.target_color(&mut random::seeded(seed), &[], Point::new(0, 0));
  assert_eq!(draw(3), draw(3));
  let distinct: HashSet<_> = (0..16).map(draw).collect();
  assert!(distinct.len() > 1);
}

#[test] fn black_target() {
  let neighbors = [Color::new(200, 200, 200)];
  assert_eq!(BlackTarget.target_color(&mut random::seeded(0), &neighbors, Point::new(1, 1)), Color::BLACK);
}
