use criterion::{black_box, criterion_group, criterion_main, Criterion};

use conquest::map::{validate, ContinentId, CountryId, GameMap};
use conquest::protocol::mapfile::{encode_map, parse_map};

/// Builds a `side x side` grid per continent, continents chained east to west.
fn grid_map(continents: u32, side: u32) -> GameMap {
    let mut map = GameMap::new();
    let per = side * side;
    for c in 0..continents {
        let continent = map.add_continent(format!("C{}", c + 1), 3);
        for i in 0..per {
            let id = CountryId(c * per + i + 1);
            map.add_country(id, format!("n{}", id), continent).unwrap();
        }
    }
    for c in 0..continents {
        for i in 0..per {
            let id = c * per + i + 1;
            let (row, col) = (i / side, i % side);
            if col + 1 < side {
                map.add_neighbor(CountryId(id), CountryId(id + 1)).unwrap();
                map.add_neighbor(CountryId(id + 1), CountryId(id)).unwrap();
            }
            if row + 1 < side {
                map.add_neighbor(CountryId(id), CountryId(id + side)).unwrap();
                map.add_neighbor(CountryId(id + side), CountryId(id)).unwrap();
            }
        }
        // first country links to the next continent, wrapping
        let next = (c + 1) % continents;
        if next != c {
            map.add_neighbor(CountryId(c * per + 1), CountryId(next * per + 1))
                .unwrap();
        }
    }
    debug_assert!(map.continent(ContinentId(continents)).is_some());
    map
}

fn bench_validate_small(c: &mut Criterion) {
    let map = grid_map(4, 5);
    c.bench_function("validate_4x25", |b| b.iter(|| validate(black_box(&map))));
}

fn bench_validate_large(c: &mut Criterion) {
    let map = grid_map(10, 20);
    c.bench_function("validate_10x400", |b| b.iter(|| validate(black_box(&map))));
}

fn bench_parse_map(c: &mut Criterion) {
    let text = encode_map(&grid_map(10, 20), "grid.map");
    c.bench_function("parse_10x400", |b| b.iter(|| parse_map(black_box(&text))));
}

criterion_group!(benches, bench_validate_small, bench_validate_large, bench_parse_map);
criterion_main!(benches);
