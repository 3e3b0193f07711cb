use criterion::{black_box, criterion_group, criterion_main, Criterion};
use wastewater_map::config::MapConfig;
use wastewater_map::data::parse_sites;
use wastewater_map::map::{MapView, RegionGeometry};

const PLANTS: &str = "\
Karlsruhe-Neureut;350000;8.359;49.046
Bruchsal;50000;8.594;49.142
Stuttgart-Muehlhausen;1200000;9.232;48.842
Freiburg;600000;7.842;47.997
Ulm;440000;9.993;48.401
Konstanz;120000;9.175;47.663";

fn populated_view(cols: usize, rows: usize) -> MapView {
    let mut map = MapView::new(&MapConfig::default(), RegionGeometry::builtin());
    map.resize(cols, rows);
    for (i, site) in parse_sites(PLANTS).iter().enumerate() {
        map.set_marker(site, (i as u64 + 1) * 90);
    }
    map
}

fn bench_render(c: &mut Criterion) {
    let map = populated_view(160, 60);
    c.bench_function("render_160x60", |b| b.iter(|| black_box(map.render())));
}

fn bench_tooltip(c: &mut Criterion) {
    let map = populated_view(160, 60);
    c.bench_function("tooltip_scan", |b| {
        b.iter(|| {
            for row in (0..60).step_by(3) {
                for col in (0..160).step_by(3) {
                    black_box(map.tooltip_at_cell(col, row));
                }
            }
        })
    });
}

fn bench_resize(c: &mut Criterion) {
    let mut map = populated_view(160, 60);
    let mut wide = false;
    c.bench_function("resize_refit", |b| {
        b.iter(|| {
            wide = !wide;
            map.resize(if wide { 200 } else { 160 }, 60);
        })
    });
}

criterion_group!(benches, bench_render, bench_tooltip, bench_resize);
criterion_main!(benches);
