use anyhow::{Context, Result};

const HEADERS: [&str; 21] = [
    "City",
    "Zone",
    "S No.",
    "Outlet Name",
    "Location",
    "Survey Date",
    "Brand",
    "SKU",
    "Category",
    "BU",
    "Unit",
    "Batch No.",
    "MFG Date",
    "Exp. Date",
    "Unit Name",
    "MFG Type",
    "Sample Checked",
    "Defect (Cr.+Ma.)",
    "Defect Type",
    "Freshness",
    "Defect generation from",
];

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

    /// Uniform integer in `lo..=hi`.
    fn range(&mut self, lo: u64, hi: u64) -> u64 {
        lo + self.next_u64() % (hi - lo + 1)
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.range(0, items.len() as u64 - 1) as usize]
    }
}

struct Outlet {
    city: &'static str,
    zone: &'static str,
    name: &'static str,
    location: &'static str,
}

const OUTLETS: [Outlet; 6] = [
    Outlet { city: "Ahmedabad", zone: "West", name: "D Mart", location: "Bandu Nagar" },
    Outlet { city: "Mumbai", zone: "West", name: "Reliance Smart", location: "Andheri" },
    Outlet { city: "Delhi", zone: "North", name: "Big Bazaar", location: "Karol Bagh" },
    Outlet { city: "Lucknow", zone: "North", name: "Spencer's", location: "Hazratganj" },
    Outlet { city: "Kolkata", zone: "East", name: "More Retail", location: "Salt Lake" },
    Outlet { city: "Chennai", zone: "South", name: "D Mart, Velachery", location: "Velachery" },
];

/// (brand, category, business unit, unit, pack sizes)
const PRODUCTS: [(&str, &str, &str, &str, [u64; 3]); 4] = [
    ("Honey", "Health Supplement", "Health Care", "Gm", [250, 500, 1300]),
    ("Chyawanprash", "Health Supplement", "Health Care", "Gm", [500, 1000, 2000]),
    ("Hajmola", "Digestives", "Health Care", "Nos", [120, 60, 30]),
    ("Amla Hair Oil", "Hair Care", "Personal Care", "Ml", [90, 180, 275]),
];

const DEFECT_TYPES: [&str; 4] = ["Torn Label", "Leakage", "Dented Pack", "Seal Broken"];
const DEFECT_SOURCES: [&str; 3] = ["Manufacturing", "Transit", "Storage"];
const PLANTS: [&str; 3] = ["Baddi Manakpur", "Sahibabad", "Pithampur"];

fn date(day: u64, month: u64, year: u64) -> String {
    format!("{day:02}-{month:02}-{year}")
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let output_path = "sample_audits.csv";
    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;
    writer.write_record(HEADERS).context("writing header")?;

    let mut rows = 0;
    for (outlet_no, outlet) in OUTLETS.iter().enumerate() {
        for month in 1..=12u64 {
            let (brand, category, bu, unit, sizes) = PRODUCTS[rng.range(0, 3) as usize];
            let sku = sizes[rng.range(0, 2) as usize];
            let survey_day = rng.range(1, 28);
            let mfg_month = (month + 12 - rng.range(1, 5) - 1) % 12 + 1;
            let batch = format!("{}{}", &brand[..2].to_uppercase(), rng.range(1000, 9999));
            let samples = rng.range(10, 40);
            let defects = if rng.range(0, 3) == 0 { rng.range(1, 4) } else { 0 };
            let (defect_type, source) = if defects > 0 {
                (rng.pick(&DEFECT_TYPES), rng.pick(&DEFECT_SOURCES))
            } else {
                ("", "")
            };

            writer
                .write_record([
                    outlet.city.to_string(),
                    outlet.zone.to_string(),
                    (outlet_no + 1).to_string(),
                    outlet.name.to_string(),
                    outlet.location.to_string(),
                    date(survey_day, month, 2024),
                    brand.to_string(),
                    sku.to_string(),
                    category.to_string(),
                    bu.to_string(),
                    unit.to_string(),
                    batch,
                    date(rng.range(1, 28), mfg_month, 2024),
                    date(rng.range(1, 28), mfg_month, 2026),
                    rng.pick(&PLANTS).to_string(),
                    "DIL Unit".to_string(),
                    samples.to_string(),
                    defects.to_string(),
                    defect_type.to_string(),
                    rng.range(80, 99).to_string(),
                    source.to_string(),
                ])
                .with_context(|| format!("writing row {rows}"))?;
            rows += 1;
        }
    }
    writer.flush().context("flushing CSV")?;

    println!("Wrote {rows} audit rows to {output_path}");
    Ok(())
}
