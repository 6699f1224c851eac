use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn main() {
    for (num, max_len) in [(100, 8), (5000, 10), (15000, 12), (60000, 4)] {
        println!("== {num} random words of length <= {max_len} ==");
        let patterns = generate_words(num, max_len);
        show_memory_stats(&patterns);
    }
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

fn show_memory_stats(patterns: &[String]) {
    match ahoscan::Searcher::new(patterns) {
        Ok(searcher) => {
            println!(
                "states: {}, alphabet: {}",
                searcher.num_states(),
                searcher.alphabet_size()
            );
            format_memory("ahoscan", searcher.heap_bytes());
        }
        Err(e) => println!("ahoscan: {e}"),
    }
}

fn format_memory(title: &str, bytes: usize) {
    println!(
        "{}: {} bytes, {:.3} MiB",
        title,
        bytes,
        bytes as f64 / (1024.0 * 1024.0)
    );
}
