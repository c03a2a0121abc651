#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (u64, u16)| {
    let (total, workers) = input;
    let total = total % 1_000_000;
    let workers = usize::from(workers % 512).max(1);

    let shards = burst::fuzzing::partition_input(total, workers);
    debug_assert_eq!(shards.len(), workers);
    debug_assert_eq!(shards.iter().sum::<u64>(), total);

    let max = shards.iter().max().copied().unwrap_or(0);
    let min = shards.iter().min().copied().unwrap_or(0);
    debug_assert!(max - min <= 1);
    debug_assert!(shards.windows(2).all(|pair| pair[0] >= pair[1]));
});
