use rand::{Rng, seq::SliceRandom};

/// Prefix every sponsor line starts with. The response validator counts it.
pub const SPONSOR_MARKER: &str = "Sponsored by";

pub const SPONSOR_LINES: [&str; 10] = [
    "Sponsored by SuperAI: build smarter apps with AI in minutes.",
    "Sponsored by NutriBaby: age-based analysis of baby food labels.",
    "Sponsored by CloudNest: hosting that scales with your traffic.",
    "Sponsored by ByteBooks: learn to code with bite-sized lessons.",
    "Sponsored by FreshCart: groceries at your door within the hour.",
    "Sponsored by TravelLite: weekend getaways without the planning.",
    "Sponsored by FitPulse: workouts that fit into a lunch break.",
    "Sponsored by PennyWise: track every rupee you spend.",
    "Sponsored by GreenRide: electric scooters across the city.",
    "Sponsored by StudySpark: exam prep with instant doubt solving.",
];

/// Draws `count` distinct sponsor lines in random order. Never repeats an
/// entry, so at most `SPONSOR_LINES.len()` lines are returned.
pub fn sample_sponsors<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<&'static str> {
    let mut picked: Vec<&'static str> = SPONSOR_LINES
        .choose_multiple(rng, count.min(SPONSOR_LINES.len()))
        .copied()
        .collect();
    picked.shuffle(rng);
    picked
}
