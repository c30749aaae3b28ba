use chrono::NaiveDate;

use weathervane::data::chart::COMPASS_ORDER;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn main() {
    let mut rng = SimpleRng::new(42);

    // Stations with different climates: (name, winter mean, summer mean).
    let stations = [
        ("Albury", 6.0, 22.0),
        ("Cobar", 9.0, 26.0),
        ("Penrith", 8.0, 24.0),
    ];

    let start = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid start date");
    let days = 365;

    let output_path = "sample_weather.csv";
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");
    writer
        .write_record([
            "Date",
            "Location",
            "MinTemp",
            "MaxTemp",
            "Rainfall",
            "WindGustDir",
            "WindGustSpeed",
        ])
        .expect("Failed to write header");

    let mut rows = 0usize;
    for (name, winter_mean, summer_mean) in stations {
        let mut date = start;
        for day in 0..days {
            // Southern-hemisphere seasonality: coldest mid-year.
            let phase = (day as f64 / 365.0) * std::f64::consts::TAU;
            let seasonal = (summer_mean + winter_mean) / 2.0
                + (summer_mean - winter_mean) / 2.0 * phase.cos();

            let min_temp = rng.gauss(seasonal - 6.0, 2.0);
            let max_temp = min_temp + rng.gauss(9.0, 2.5).abs();
            let rainfall = if rng.next_f64() < 0.3 {
                rng.gauss(4.0, 3.0).abs()
            } else {
                0.0
            };

            // Leave ~3% of gust observations blank, like real exports.
            let gust_dir = if rng.next_f64() < 0.03 {
                String::new()
            } else {
                COMPASS_ORDER[(rng.next_u64() % 16) as usize].to_string()
            };
            let gust_speed = if gust_dir.is_empty() {
                String::new()
            } else {
                format!("{:.0}", rng.gauss(38.0, 10.0).abs())
            };

            writer
                .write_record([
                    date.format("%Y-%m-%d").to_string(),
                    name.to_string(),
                    format!("{min_temp:.1}"),
                    format!("{max_temp:.1}"),
                    format!("{rainfall:.1}"),
                    gust_dir,
                    gust_speed,
                ])
                .expect("Failed to write row");
            rows += 1;

            date = date.succ_opt().expect("date in range");
        }
    }

    writer.flush().expect("Failed to flush output");
    println!(
        "Wrote {rows} observations for {} stations to {output_path}",
        stations.len()
    );
}
