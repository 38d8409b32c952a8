#![allow(clippy::missing_docs_in_private_items)]
#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

use plotters::prelude::*;
use primehash::{HashTable, TableConfig};
use rand::{Rng, distr::Alphanumeric};

// Base size of every measured table; 10007 is prime so no rounding happens
const TABLE_BASE_SIZE: usize = 10_007;
// Load factors from 10% to 95% in 10 steps
const NUM_LOAD_FACTORS: usize = 10;
const MISSING_KEYS: usize = 2_000;
const OUTPUT: &str = "probe_lengths.svg";

#[derive(Debug, Clone, Copy)]
struct Measurement {
    load: f64,
    avg_hit: f64,
    worst_hit: usize,
    avg_miss: f64,
}

fn random_key(rng: &mut impl Rng) -> String {
    let len = rng.random_range(4..16);
    (0..len).map(|_| char::from(rng.sample(Alphanumeric))).collect()
}

fn measure(rng: &mut impl Rng, n_keys: usize) -> Result<Measurement, Box<dyn std::error::Error>> {
    // Thresholds that keep the table at a fixed size while it fills up
    let config = TableConfig::new()
        .with_min_base_size(TABLE_BASE_SIZE)
        .with_grow_load_percent(99)
        .with_shrink_load_percent(0);
    let mut table = HashTable::with_config(config)?;

    let mut keys = Vec::with_capacity(n_keys);
    while keys.len() < n_keys {
        let key = random_key(rng);
        if table.insert(key.as_str(), "v").is_none() {
            keys.push(key);
        }
    }

    let hits: Vec<usize> = keys.iter().map(|key| table.probe_length(key)).collect();
    // Generated keys are shorter than 16 bytes, so the suffix keeps these absent
    let misses: Vec<usize> = (0..MISSING_KEYS)
        .map(|i| table.probe_length(&format!("{}-missing-{i}", random_key(rng))))
        .collect();

    Ok(Measurement {
        load: table.load() as f64,
        avg_hit: hits.iter().sum::<usize>() as f64 / hits.len().max(1) as f64,
        worst_hit: hits.iter().copied().max().unwrap_or(0),
        avg_miss: misses.iter().sum::<usize>() as f64 / misses.len().max(1) as f64,
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let load_factors: Vec<f64> = (0..NUM_LOAD_FACTORS)
        .map(|i| 0.1 + (0.95 - 0.1) * (i as f64) / ((NUM_LOAD_FACTORS - 1) as f64))
        .collect();

    let mut rng = rand::rng();
    let mut results = Vec::with_capacity(load_factors.len());

    for &load in &load_factors {
        let n_keys = (TABLE_BASE_SIZE as f64 * load) as usize;
        let measurement = measure(&mut rng, n_keys)?;
        println!(
            "load {:>3}%: avg hit = {:.2}, worst hit = {}, avg miss = {:.2}",
            measurement.load, measurement.avg_hit, measurement.worst_hit, measurement.avg_miss
        );
        results.push(measurement);
    }

    let font_family = "sans-serif";
    let title_size = 30;
    let text_size = 16;
    let hit_style = ShapeStyle::from(&RGBColor(50, 90, 220)).stroke_width(2);
    let miss_style = ShapeStyle::from(&RGBColor(220, 50, 50)).stroke_width(2);
    let worst_style = ShapeStyle::from(&RGBColor(180, 50, 180)).stroke_width(2);

    let root = SVGBackend::new(OUTPUT, (1200, 900)).into_drawing_area();
    root.fill(&WHITE)?;
    let areas = root.split_evenly((2, 1));
    let [average_area, worst_area] = areas.as_slice() else {
        return Err("expected two drawing areas".into());
    };

    // Plot 1: average probe length for present and absent keys
    let max_avg = results.iter().map(|m| m.avg_hit.max(m.avg_miss)).fold(1.0, f64::max) * 1.1;
    let mut chart = ChartBuilder::on(average_area)
        .caption("Average Probe Length", (font_family, title_size))
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..100.0, 0.0..max_avg)?;

    chart
        .configure_mesh()
        .x_desc("Load Factor (%)")
        .y_desc("Slots Inspected")
        .axis_desc_style((font_family, text_size))
        .draw()?;

    chart
        .draw_series(LineSeries::new(results.iter().map(|m| (m.load, m.avg_hit)), hit_style))?
        .label("Successful search")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], hit_style));
    chart
        .draw_series(LineSeries::new(results.iter().map(|m| (m.load, m.avg_miss)), miss_style))?
        .label("Unsuccessful search")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], miss_style));

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    // Plot 2: worst successful probe length
    let max_worst = results.iter().map(|m| m.worst_hit).max().unwrap_or(1) as f64 * 1.1;
    let mut chart = ChartBuilder::on(worst_area)
        .caption("Worst-Case Probe Length", (font_family, title_size))
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..100.0, 0.0..max_worst)?;

    chart
        .configure_mesh()
        .x_desc("Load Factor (%)")
        .y_desc("Slots Inspected")
        .axis_desc_style((font_family, text_size))
        .draw()?;

    chart.draw_series(LineSeries::new(
        results.iter().map(|m| (m.load, m.worst_hit as f64)),
        worst_style,
    ))?;
    chart.draw_series(
        results
            .iter()
            .map(|m| Circle::new((m.load, m.worst_hit as f64), 4, worst_style.color.filled())),
    )?;

    root.present()?;
    println!("Generated plot image: {OUTPUT}");

    Ok(())
}
