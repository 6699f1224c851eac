use std::time::Duration;

use criterion::{
    criterion_group, criterion_main, measurement::WallTime, BenchmarkGroup, Criterion, SamplingMode,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const BUILD_SAMPLE_SIZE: usize = 10;
const BUILD_WARM_UP_TIME: Duration = Duration::from_millis(500);
const BUILD_MEASURE_TIME: Duration = Duration::from_secs(2);

const SEARCH_SAMPLE_SIZE: usize = 30;
const SEARCH_WARM_UP_TIME: Duration = Duration::from_millis(500);
const SEARCH_MEASURE_TIME: Duration = Duration::from_secs(2);

const HAYSTACK_LEN: usize = 1 << 20;

macro_rules! define_build_bench {
    ( $func_name:ident, $group:literal, $num:literal, $max_len:literal ) => {
        fn $func_name(c: &mut Criterion) {
            let mut group = c.benchmark_group($group);
            group.sample_size(BUILD_SAMPLE_SIZE);
            group.warm_up_time(BUILD_WARM_UP_TIME);
            group.measurement_time(BUILD_MEASURE_TIME);
            group.sampling_mode(SamplingMode::Flat);
            let patterns = generate_words($num, $max_len);
            add_build_benches(&mut group, &patterns);
        }
    };
}

macro_rules! define_scan_bench {
    ( $func_name:ident, $group:literal, $num:literal, $max_len:literal ) => {
        fn $func_name(c: &mut Criterion) {
            let mut group = c.benchmark_group($group);
            group.sample_size(SEARCH_SAMPLE_SIZE);
            group.warm_up_time(SEARCH_WARM_UP_TIME);
            group.measurement_time(SEARCH_MEASURE_TIME);
            group.sampling_mode(SamplingMode::Flat);
            let patterns = generate_words($num, $max_len);
            let haystack = generate_haystack(HAYSTACK_LEN);
            add_scan_benches(&mut group, &patterns, &haystack);
        }
    };
}

define_build_bench!(criterion_words_100_build, "words_100/build", 100, 8);
define_build_bench!(criterion_words_5000_build, "words_5000/build", 5000, 10);
define_build_bench!(criterion_words_15000_build, "words_15000/build", 15000, 12);

define_scan_bench!(criterion_words_100_scan, "words_100/scan", 100, 8);
define_scan_bench!(criterion_words_5000_scan, "words_5000/scan", 5000, 10);
define_scan_bench!(criterion_words_15000_scan, "words_15000/scan", 15000, 12);

fn add_build_benches(group: &mut BenchmarkGroup<WallTime>, patterns: &[String]) {
    group.bench_function("ahoscan/insert", |b| {
        b.iter(|| ahoscan::AutomatonBuilder::from_iter(patterns));
    });

    group.bench_function("ahoscan/compute_links", |b| {
        b.iter(|| ahoscan::AutomatonBuilder::from_iter(patterns).compute_links());
    });

    group.bench_function("ahoscan/compile", |b| {
        b.iter(|| ahoscan::Searcher::new(patterns).unwrap());
    });

    group.bench_function("aho_corasick/nfa", |b| {
        b.iter(|| aho_corasick::AhoCorasick::new(patterns).unwrap());
    });
}

fn add_scan_benches(group: &mut BenchmarkGroup<WallTime>, patterns: &[String], haystack: &[u8]) {
    let searcher = ahoscan::Searcher::new(patterns).unwrap();

    group.bench_function("ahoscan/scan", |b| {
        b.iter(|| {
            let result = searcher.scan(haystack);
            if result.is_empty() {
                panic!();
            }
        });
    });

    group.bench_function("ahoscan/find_overlapping_iter", |b| {
        b.iter(|| {
            let mut sum = 0;
            for m in searcher.find_overlapping_iter(haystack) {
                sum += m.start() + m.end() + m.pattern();
            }
            if sum == 0 {
                panic!();
            }
        });
    });

    let pma = aho_corasick::AhoCorasick::new(patterns).unwrap();
    group.bench_function("aho_corasick/nfa/find_overlapping_iter", |b| {
        b.iter(|| {
            let mut sum = 0;
            for m in pma.find_overlapping_iter(haystack) {
                sum += m.start() + m.end() + m.pattern().as_usize();
            }
            if sum == 0 {
                panic!();
            }
        });
    });
}

fn generate_words(num: usize, max_len: usize) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(num as u64);
    (0..num)
        .map(|_| {
            let len = rng.gen_range(1..=max_len);
            (0..len).map(|_| rng.gen_range(b'a'..=b'z') as char).collect()
        })
        .collect()
}

fn generate_haystack(len: usize) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(0);
    (0..len)
        .map(|_| {
            if rng.gen_range(0..6) == 0 {
                b' '
            } else {
                rng.gen_range(b'a'..=b'z')
            }
        })
        .collect()
}

criterion_group!(
    benches,
    criterion_words_100_build,
    criterion_words_5000_build,
    criterion_words_15000_build,
    criterion_words_100_scan,
    criterion_words_5000_scan,
    criterion_words_15000_scan,
);
criterion_main!(benches);
