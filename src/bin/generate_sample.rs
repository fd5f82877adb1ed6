use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

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

    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.next_f64()
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// Booster era: flights up to `until_flight` (exclusive) use this category.
struct Era {
    category: &'static str,
    until_flight: usize,
    payload: (f64, f64),
    success_rate: f64,
    sites: &'static [&'static str],
}

const ERAS: [Era; 5] = [
    Era {
        category: "v1.0",
        until_flight: 5,
        payload: (0.0, 700.0),
        success_rate: 0.2,
        sites: &["CCAFS LC-40"],
    },
    Era {
        category: "v1.1",
        until_flight: 20,
        payload: (500.0, 4500.0),
        success_rate: 0.35,
        sites: &["CCAFS LC-40", "VAFB SLC-4E"],
    },
    Era {
        category: "FT",
        until_flight: 40,
        payload: (2000.0, 9600.0),
        success_rate: 0.7,
        sites: &["CCAFS LC-40", "KSC LC-39A", "VAFB SLC-4E"],
    },
    Era {
        category: "B4",
        until_flight: 47,
        payload: (2000.0, 6000.0),
        success_rate: 0.55,
        sites: &["KSC LC-39A", "CCAFS SLC-40", "VAFB SLC-4E"],
    },
    Era {
        category: "B5",
        until_flight: 56,
        payload: (3000.0, 9600.0),
        success_rate: 0.9,
        sites: &["KSC LC-39A", "CCAFS SLC-40"],
    },
];

struct Launch {
    flight: i64,
    site: &'static str,
    class: i64,
    payload: f64,
    booster_version: String,
    category: &'static str,
}

fn generate_launches(rng: &mut SimpleRng) -> Vec<Launch> {
    let total = ERAS[ERAS.len() - 1].until_flight;
    let mut era_idx = 0;

    (0..total)
        .map(|i| {
            while i >= ERAS[era_idx].until_flight {
                era_idx += 1;
            }
            let era = &ERAS[era_idx];
            let payload = (rng.uniform(era.payload.0, era.payload.1) * 10.0).round() / 10.0;
            let class = i64::from(rng.next_f64() < era.success_rate);
            Launch {
                flight: i as i64 + 1,
                site: rng.pick(era.sites),
                class,
                payload,
                booster_version: format!("F9 {} B{}", era.category, 1003 + i),
                category: era.category,
            }
        })
        .collect()
}

fn write_csv(path: &str, launches: &[Launch]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    writer.write_record([
        "Flight Number",
        "Launch Site",
        "class",
        "Payload Mass (kg)",
        "Booster Version",
        "Booster Version Category",
    ])?;
    for l in launches {
        writer.write_record([
            l.flight.to_string(),
            l.site.to_string(),
            l.class.to_string(),
            format!("{:.1}", l.payload),
            l.booster_version.clone(),
            l.category.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(path: &str, launches: &[Launch]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Flight Number", DataType::Int64, false),
        Field::new("Launch Site", DataType::Utf8, false),
        Field::new("class", DataType::Int64, false),
        Field::new("Payload Mass (kg)", DataType::Float64, false),
        Field::new("Booster Version", DataType::Utf8, false),
        Field::new("Booster Version Category", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from_iter_values(launches.iter().map(|l| l.flight))),
            Arc::new(StringArray::from_iter_values(launches.iter().map(|l| l.site))),
            Arc::new(Int64Array::from_iter_values(launches.iter().map(|l| l.class))),
            Arc::new(Float64Array::from_iter_values(launches.iter().map(|l| l.payload))),
            Arc::new(StringArray::from_iter_values(
                launches.iter().map(|l| l.booster_version.as_str()),
            )),
            Arc::new(StringArray::from_iter_values(launches.iter().map(|l| l.category))),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let launches = generate_launches(&mut rng);

    write_csv("spacex_launch_dash.csv", &launches)?;
    write_parquet("spacex_launch_dash.parquet", &launches)?;

    let successes = launches.iter().filter(|l| l.class == 1).count();
    println!(
        "Wrote {} launches ({successes} successful) to spacex_launch_dash.csv and spacex_launch_dash.parquet",
        launches.len()
    );
    Ok(())
}
