use anyhow::Result;

use well_log_cleaner::data::export::write_las;
use well_log_cleaner::data::model::{CurveInfo, HeaderItem, WellLog};

/// Smooth step between two layer values, centred on `boundary`.
fn layer_step(depth: f64, boundary: f64, width: f64, above: f64, below: f64) -> f64 {
    let t = 1.0 / (1.0 + (-(depth - boundary) / width).exp());
    above + (below - above) * t
}

/// Piecewise-constant geology with soft bed boundaries.
fn layered(depth: f64, beds: &[(f64, f64)], base: f64) -> f64 {
    beds.iter().fold(base, |value, &(boundary, next)| {
        layer_step(depth, boundary, 0.8, value, next)
    })
}

fn generate_curve(
    depths: &[f64],
    beds: &[(f64, f64)],
    base: f64,
    noise_level: f64,
    spike_rate: f64,
    spike_size: f64,
    rng: &mut SimpleRng,
) -> Vec<f64> {
    depths
        .iter()
        .map(|&d| {
            let mut v = layered(d, beds, base) + rng.gauss(0.0, noise_level);
            if rng.next_f64() < spike_rate {
                let sign = if rng.next_f64() < 0.5 { -1.0 } else { 1.0 };
                v += sign * spike_size;
            }
            v
        })
        .collect()
}

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

fn main() -> Result<()> {
    env_logger::init();
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sample_well.las".to_string());

    let mut rng = SimpleRng::new(42);

    // 1500 m → 1750 m, 0.25 m step
    let step = 0.25;
    let depths: Vec<f64> = (0..1001).map(|i| 1500.0 + i as f64 * step).collect();

    // (bed top, value below it) per curve: shale / sand / shale / limestone
    let gr = generate_curve(
        &depths,
        &[(1560.0, 35.0), (1610.0, 95.0), (1680.0, 20.0)],
        90.0,
        4.0,
        0.01,
        120.0,
        &mut rng,
    );
    let rhob = generate_curve(
        &depths,
        &[(1560.0, 2.30), (1610.0, 2.55), (1680.0, 2.71)],
        2.50,
        0.02,
        0.005,
        0.6,
        &mut rng,
    );
    let nphi = generate_curve(
        &depths,
        &[(1560.0, 0.24), (1610.0, 0.33), (1680.0, 0.05)],
        0.30,
        0.01,
        0.005,
        0.2,
        &mut rng,
    );
    let mut rt = generate_curve(
        &depths,
        &[(1560.0, 40.0), (1610.0, 3.0), (1680.0, 150.0)],
        4.0,
        1.5,
        0.01,
        80.0,
        &mut rng,
    );

    // A tool dropout.
    let null_value = WellLog::DEFAULT_NULL;
    for v in &mut rt[400..412] {
        *v = null_value;
    }

    let curves = vec![
        CurveInfo::new("GR", "GAPI", "Gamma Ray"),
        CurveInfo::new("RHOB", "G/C3", "Bulk Density"),
        CurveInfo::new("NPHI", "V/V", "Neutron Porosity"),
        CurveInfo::new("RT", "OHMM", "True Resistivity"),
    ];
    let mut log = WellLog::from_columns(
        &output_path,
        CurveInfo::new("DEPT", "M", "Depth"),
        curves,
        depths.clone(),
        vec![gr, rhob, nphi, rt],
    )?;

    let first = depths.first().copied().unwrap_or_default();
    let last = depths.last().copied().unwrap_or_default();
    log.well_info = vec![
        HeaderItem::new("STRT", "M", &format!("{first:.4}"), "START DEPTH"),
        HeaderItem::new("STOP", "M", &format!("{last:.4}"), "STOP DEPTH"),
        HeaderItem::new("STEP", "M", &format!("{step:.4}"), "STEP"),
        HeaderItem::new("NULL", "", &format!("{null_value}"), "NULL VALUE"),
        HeaderItem::new("COMP", "", "SYNTHETIC OPERATING CO", "COMPANY"),
        HeaderItem::new("WELL", "", "SYNTH-1", "WELL"),
        HeaderItem::new("FLD", "", "TEST FIELD", "FIELD"),
        HeaderItem::new("SRVC", "", "GENERATOR", "SERVICE COMPANY"),
    ];

    std::fs::write(&output_path, write_las(&log))?;

    println!(
        "Wrote {} curves ({} depth steps each) to {output_path}",
        log.curves.len(),
        log.len()
    );
    Ok(())
}
