#![allow(clippy::missing_docs_in_private_items)]
#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::indexing_slicing)]
#![allow(clippy::cast_precision_loss)]

use log::info;
use plotters::prelude::*;
use quadmap::{QuadMap, TableConfig, initialize_logger};
use rand::Rng;

// Keys inserted per run
const NUM_KEYS: usize = 200_000;
// Measurements taken per run, evenly spaced over the inserts
const NUM_SAMPLES: usize = 20;

// Load factors compared; 0.5 is the largest the table accepts
const LOAD_FACTORS: [f64; 4] = [0.2, 0.3, 0.4, 0.5];

struct Sample {
    keys: usize,
    avg_probes: f64,
    worst_probes: usize,
    capacity: usize,
}

// Inserts `keys` into a fresh table and measures the lookup cost of every
// key inserted so far at each sample point
fn profile(keys: &[u64], load_factor: f64) -> Vec<Sample> {
    let config = TableConfig::default().with_load_factor(load_factor);
    let mut map: QuadMap<u64, ()> = QuadMap::with_config(config);
    let step = (keys.len() / NUM_SAMPLES).max(1);
    let mut samples = Vec::with_capacity(NUM_SAMPLES);

    for (i, &key) in keys.iter().enumerate() {
        map.put(key, ());
        if (i + 1) % step != 0 {
            continue;
        }
        let inserted = &keys[..=i];
        let probes: Vec<usize> = inserted.iter().map(|k| map.probe_len(k)).collect();
        samples.push(Sample {
            keys: map.len(),
            avg_probes: probes.iter().sum::<usize>() as f64 / probes.len() as f64,
            worst_probes: probes.iter().copied().max().unwrap_or(0),
            capacity: map.capacity(),
        });
    }
    samples
}

fn draw_lines<F>(
    path: &str,
    caption: &str,
    y_desc: &str,
    runs: &[Vec<Sample>],
    value: F,
) -> Result<(), Box<dyn std::error::Error>>
where
    F: Fn(&Sample) -> f64,
{
    let font_family = "sans-serif";
    let colors = [
        RGBColor(220, 50, 50),
        RGBColor(50, 90, 220),
        RGBColor(50, 180, 50),
        RGBColor(180, 50, 180),
    ];

    let root = BitMapBackend::new(path, (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_y = runs.iter().flatten().map(&value).fold(0.0, f64::max) * 1.1;
    let max_x = runs.iter().flatten().map(|s| s.keys).max().unwrap_or(1);

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, (font_family, 35))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(80)
        .build_cartesian_2d(0..max_x, 0.0..max_y)?;

    chart
        .configure_mesh()
        .x_desc("Number of Keys Inserted")
        .y_desc(y_desc)
        .axis_desc_style((font_family, 16))
        .draw()?;

    for (run_idx, run) in runs.iter().enumerate() {
        let color = colors[run_idx % colors.len()];
        let line_style = ShapeStyle::from(&color).stroke_width(2);
        chart
            .draw_series(LineSeries::new(run.iter().map(|s| (s.keys, value(s))), line_style))?
            .label(format!("load factor {}", LOAD_FACTORS[run_idx]))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));
        chart.draw_series(run.iter().map(|s| Circle::new((s.keys, value(s)), 4, color.filled())))?;
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    root.present()?;
    info!("wrote {path}");
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    initialize_logger();

    // Generate random keys once so every load factor sees the same input
    let mut rng = rand::rng();
    let keys: Vec<u64> = (0..NUM_KEYS).map(|_| rng.random()).collect();

    let mut runs = Vec::with_capacity(LOAD_FACTORS.len());
    for &load_factor in &LOAD_FACTORS {
        let samples = profile(&keys, load_factor);
        if let Some(last) = samples.last() {
            info!(
                "load factor {load_factor}: {} keys, capacity {}, avg probes {:.3}, worst {}",
                last.keys, last.capacity, last.avg_probes, last.worst_probes
            );
        }
        runs.push(samples);
    }

    draw_lines(
        "average_probe_length.png",
        "Average Probe Length by Load Factor",
        "Average Lookup Cost (probes)",
        &runs,
        |s| s.avg_probes,
    )?;
    draw_lines(
        "worst_probe_length.png",
        "Worst-Case Probe Length by Load Factor",
        "Worst-Case Lookup Cost (probes)",
        &runs,
        |s| s.worst_probes as f64,
    )?;
    draw_lines(
        "capacity_growth.png",
        "Table Capacity Growth",
        "Capacity (cells)",
        &runs,
        |s| s.capacity as f64,
    )?;

    Ok(())
}
