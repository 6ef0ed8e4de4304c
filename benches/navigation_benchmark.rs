use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use geoquadtree::{Direction, TileAddress, load_service, parse_document};
use std::fs;
use std::hint::black_box;
use tempfile::TempDir;

/// An address of the given depth that crosses a parent edge on every pan
fn corner_address(depth: usize) -> TileAddress {
    "2".repeat(depth).parse().unwrap()
}

/// Generate a service document with `layers` layers of one dataset each
fn generate_service(layers: usize, dataset_path: &str) -> String {
    let mut xml = String::from("<?xml version=\"1.0\"?>\n<GeoQuadTreeServer>\n");
    xml.push_str("  <Service><Title>Benchmark</Title></Service>\n");
    for i in 0..layers {
        xml.push_str(&format!(
            "  <Layer Name=\"layer{}\" Title=\"Layer {}\">\n    <SRS Name=\"EPSG:4326\" Path=\"/srs/4326\"/>\n    <GeoQuadTree Path=\"{}\" WebPath=\"/tiles/{}/\"/>\n  </Layer>\n",
            i, i, dataset_path, i
        ));
    }
    xml.push_str("</GeoQuadTreeServer>\n");
    xml
}

fn bench_navigate(c: &mut Criterion) {
    let mut group = c.benchmark_group("navigate");

    for depth in [1, 8, 20, 64] {
        let address = corner_address(depth);
        group.bench_with_input(BenchmarkId::new("pan_right", depth), &address, |b, &address| {
            b.iter(|| black_box(address).navigate(Direction::Right));
        });
        group.bench_with_input(BenchmarkId::new("zoom_out", depth), &address, |b, &address| {
            b.iter(|| black_box(address).navigate(Direction::ZoomOut));
        });
    }

    group.finish();
}

fn bench_window(c: &mut Criterion) {
    let mut group = c.benchmark_group("window");
    let address = corner_address(16);

    for radius in [1, 2, 4] {
        group.bench_with_input(BenchmarkId::new("radius", radius), &radius, |b, &radius| {
            b.iter(|| black_box(address).window(radius, radius));
        });
    }

    group.finish();
}

fn bench_parse_service(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_service");

    for layers in [10, 100, 1000] {
        let xml = generate_service(layers, "/data/gqt.xml");
        group.bench_with_input(BenchmarkId::new("layers", layers), &xml, |b, xml| {
            b.iter(|| black_box(parse_document(xml).unwrap()));
        });
    }

    group.finish();
}

fn bench_load_service(c: &mut Criterion) {
    let mut group = c.benchmark_group("load_service");
    group.sample_size(20);

    let dir = TempDir::new().unwrap();
    let dataset = dir.path().join("gqt.xml");
    fs::write(
        &dataset,
        r#"<GeoQuadTree name="tile.png" levels="18" resx="0.5" resy="0.5" tilesizex="256" tilesizey="256"/>"#,
    )
    .unwrap();

    for layers in [10, 100] {
        let service = dir.path().join(format!("service{}.xml", layers));
        fs::write(&service, generate_service(layers, &dataset.display().to_string())).unwrap();

        group.bench_with_input(BenchmarkId::new("layers", layers), &service, |b, service| {
            b.iter(|| black_box(load_service(service).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_navigate,
    bench_window,
    bench_parse_service,
    bench_load_service
);
criterion_main!(benches);
