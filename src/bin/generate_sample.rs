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

    /// Uniform integer in `0..=max`.
    fn up_to(&mut self, max: u64) -> u64 {
        (self.next_f64() * (max + 1) as f64) as u64
    }
}

/// Split `total` into two parts using a random share.
fn split(total: u64, rng: &mut SimpleRng) -> (u64, u64) {
    let first = (total as f64 * rng.next_f64()).round() as u64;
    (first, total - first)
}

const HEADER: [&str; 19] = [
    "State Code",
    "District Code",
    "State Name",
    "District",
    "NIC Name",
    "Main Workers - Total -  Persons",
    "Main Workers - Rural -  Persons",
    "Main Workers - Urban -  Persons",
    "Main Workers - Total - Males",
    "Main Workers - Total - Females",
    "Main Workers - Rural - Males",
    "Main Workers - Rural - Females",
    "Main Workers - Urban - Males",
    "Main Workers - Urban - Females",
    "Marginal Workers - Total -  Persons",
    "Marginal Workers - Rural -  Persons",
    "Marginal Workers - Urban -  Persons",
    "Marginal Workers - Total - Males",
    "Marginal Workers - Total - Females",
];

/// (state, state code, [(district, latitude, longitude)])
const STATES: &[(&str, u32, &[(&str, f64, f64)])] = &[
    (
        "Kerala",
        32,
        &[
            ("Idukki", 9.85, 76.97),
            ("Kollam", 8.89, 76.61),
            ("Thrissur", 10.53, 76.21),
        ],
    ),
    (
        "Assam",
        18,
        &[("Dhubri", 26.02, 89.98), ("Kamrup", 26.14, 91.77)],
    ),
    (
        "Gujarat",
        24,
        &[
            ("Ahmadabad", 23.02, 72.57),
            ("Surat", 21.17, 72.83),
            ("Rajkot", 22.30, 70.80),
        ],
    ),
];

const INDUSTRIES: &[&str] = &[
    "Growing of rice",
    "Weaving of cotton textiles",
    "Manufacture of earthen pottery",
    "Retail sale of tea",
];

/// One class (main or marginal): total, rural, urban persons, then
/// total/rural/urban male-female pairs.
struct ClassCounts {
    total: u64,
    rural: u64,
    urban: u64,
    total_sex: (u64, u64),
    rural_sex: (u64, u64),
    urban_sex: (u64, u64),
}

fn class_counts(max: u64, rng: &mut SimpleRng) -> ClassCounts {
    let rural = rng.up_to(max);
    let urban = rng.up_to(max);
    let rural_sex = split(rural, rng);
    let urban_sex = split(urban, rng);
    ClassCounts {
        total: rural + urban,
        rural,
        urban,
        total_sex: (rural_sex.0 + urban_sex.0, rural_sex.1 + urban_sex.1),
        rural_sex,
        urban_sex,
    }
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let data_path = "sample_workforce.csv";
    let mut writer = csv::Writer::from_path(data_path).context("creating sample data file")?;
    writer.write_record(HEADER)?;

    let mut rows = 0usize;
    for (state, code, districts) in STATES {
        for (d_idx, (district, _, _)) in districts.iter().enumerate() {
            for industry in INDUSTRIES {
                let main = class_counts(5_000, &mut rng);
                let marginal = class_counts(800, &mut rng);
                let record: Vec<String> = vec![
                    format!("`{code:02}"),
                    format!("`{:03}", d_idx + 1),
                    state.to_string(),
                    district.to_string(),
                    industry.to_string(),
                    main.total.to_string(),
                    main.rural.to_string(),
                    main.urban.to_string(),
                    main.total_sex.0.to_string(),
                    main.total_sex.1.to_string(),
                    main.rural_sex.0.to_string(),
                    main.rural_sex.1.to_string(),
                    main.urban_sex.0.to_string(),
                    main.urban_sex.1.to_string(),
                    marginal.total.to_string(),
                    marginal.rural.to_string(),
                    marginal.urban.to_string(),
                    marginal.total_sex.0.to_string(),
                    marginal.total_sex.1.to_string(),
                ];
                writer.write_record(&record)?;
                rows += 1;
            }
        }
    }
    writer.flush()?;

    let coords_path = "sample_coordinates.csv";
    let mut coords = csv::Writer::from_path(coords_path).context("creating coordinates file")?;
    coords.write_record(["state", "district", "latitude", "longitude"])?;
    for (state, _, districts) in STATES {
        for (district, lat, lon) in districts.iter() {
            coords.write_record([
                state.to_string(),
                district.to_string(),
                lat.to_string(),
                lon.to_string(),
            ])?;
        }
    }
    coords.flush()?;

    println!("Wrote {rows} rows to {data_path} and district coordinates to {coords_path}");
    Ok(())
}
