use anyhow::{Context, Result};

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
        let result = (self.state[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
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

    fn below(&mut self, n: u64) -> u64 {
        self.next_u64() % n
    }
}

const CENTER: (f64, f64) = (35.6339, 139.6917);
const FACILITY_TYPES: [&str; 4] = ["認可保育所", "小規模保育", "認証保育所", "家庭的保育"];
const AGE_GROUPS: [&str; 3] = ["0-5", "0-2", "1-5"];
const NAME_STEMS: [&str; 8] = [
    "さくら", "ひまわり", "たんぽぽ", "青葉", "中目黒", "自由が丘", "学芸大学", "祐天寺",
];

fn main() -> Result<()> {
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sample_hoikuen.csv".to_string());
    let rows: usize = std::env::args()
        .nth(2)
        .map(|n| n.parse::<usize>())
        .transpose()
        .context("row count must be a number")?
        .unwrap_or(80);

    let mut rng = SimpleRng::new(42);
    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {output_path}"))?;

    writer.write_record([
        "date", "name", "type", "age_group", "age0", "age1", "age2", "age3", "age4", "age5",
        "extended_care", "latitude", "longitude",
    ])?;

    for i in 0..rows {
        let stem = NAME_STEMS[rng.below(NAME_STEMS.len() as u64) as usize];
        // Every seventh name carries a comma so the quoted-field path is exercised.
        let name = if i % 7 == 3 {
            format!("{stem}保育園, 分園{i}")
        } else {
            format!("{stem}保育園{i}")
        };
        let facility_type = FACILITY_TYPES[rng.below(FACILITY_TYPES.len() as u64) as usize];
        let age_group = AGE_GROUPS[rng.below(AGE_GROUPS.len() as u64) as usize];

        let mut record = vec![
            "2025-06-01".to_string(),
            name,
            facility_type.to_string(),
            age_group.to_string(),
        ];
        for _ in 0..6 {
            // Mostly full, occasionally a few openings.
            let slots = if rng.next_f64() < 0.6 { 0 } else { rng.below(6) };
            record.push(slots.to_string());
        }
        record.push(if rng.next_f64() < 0.5 { "2".into() } else { String::new() });

        // About one row in ten is missing its geocoding.
        if rng.next_f64() < 0.1 {
            record.push(String::new());
            record.push(String::new());
        } else {
            let lat = CENTER.0 + (rng.next_f64() - 0.5) * 0.03;
            let lng = CENTER.1 + (rng.next_f64() - 0.5) * 0.035;
            record.push(format!("{lat:.6}"));
            record.push(format!("{lng:.6}"));
        }

        writer.write_record(&record)?;
    }
    writer.flush().context("flushing CSV")?;

    println!("Wrote {rows} nurseries to {output_path}");
    Ok(())
}
