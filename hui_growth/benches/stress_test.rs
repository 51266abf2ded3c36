use hui_growth::hui::{build_tree, prune_and_sort, HuiMiner, HuiSession, MiningConfig};
use hui_growth::{Transaction, TransactionItem, UnitUtilities, Utility};
use rand::Rng;
use std::time::Instant;

fn generate_transactions(
    num_transactions: usize,
    num_items: usize,
    avg_transaction_size: usize,
    density: f64,
) -> (Vec<Transaction<usize>>, UnitUtilities<usize>) {
    let mut rng = rand::thread_rng();

    let utilities: UnitUtilities<usize> = (0..num_items)
        .map(|item| (item, f64::from(rng.gen_range(1u32..=50))))
        .collect();

    let mut transactions = Vec::with_capacity(num_transactions);
    for _ in 0..num_transactions {
        let random_factor: f64 = rng.gen();
        let size = (avg_transaction_size as f64 * (0.5 + random_factor)).round() as usize;
        let size = size.min(num_items);

        let mut transaction = Vec::with_capacity(size);
        for _ in 0..size {
            let density_check: f64 = rng.gen();
            if density_check < density {
                let item = rng.gen_range(0..num_items);
                let quantity = f64::from(rng.gen_range(1u32..=5));
                transaction.push(TransactionItem::new(item, quantity));
            }
        }
        transactions.push(transaction);
    }

    (transactions, utilities)
}

fn total_utility(transactions: &[Transaction<usize>], utilities: &UnitUtilities<usize>) -> Utility {
    transactions
        .iter()
        .flatten()
        .map(|entry| entry.quantity * utilities[&entry.item])
        .sum()
}

fn stress_test_scaling() {
    println!("\n=== Scaling Test ===");

    let configs = vec![
        ("10K x 50", 10_000, 50, 15),
        ("50K x 80", 50_000, 80, 20),
        ("100K x 100", 100_000, 100, 25),
    ];

    for (name, num_tx, num_items, avg_size) in configs {
        println!("\nTesting: {}", name);
        let start_gen = Instant::now();
        let (transactions, utilities) = generate_transactions(num_tx, num_items, avg_size, 0.7);
        println!("  Generated in {:?}", start_gen.elapsed());

        let min_util = total_utility(&transactions, &utilities) * 0.01;
        let start = Instant::now();
        let sorted_items = prune_and_sort(&transactions, min_util, &utilities).unwrap();
        let tree = build_tree(&transactions, &sorted_items, &utilities).unwrap();
        let build_time = start.elapsed();

        let result = HuiMiner::new(MiningConfig::new(min_util)).mine(&tree).unwrap();
        println!("  Tree: {} nodes, built in {:?}", tree.node_count(), build_time);
        println!("  ✓ Completed in {:?}", start.elapsed());
        println!("  Found {} itemsets", result.len());
    }
}

fn stress_test_session_vs_direct() {
    println!("\n=== Session vs Direct Comparison ===");

    let (transactions, utilities) = generate_transactions(50_000, 100, 20, 0.7);
    let min_util = total_utility(&transactions, &utilities) * 0.01;

    println!("  Direct:");
    let start = Instant::now();
    let sorted_items = prune_and_sort(&transactions, min_util, &utilities).unwrap();
    let tree = build_tree(&transactions, &sorted_items, &utilities).unwrap();
    let direct = HuiMiner::new(MiningConfig::new(min_util)).mine(&tree).unwrap();
    let direct_time = start.elapsed();
    println!("    Time: {:?}", direct_time);
    println!("    Itemsets: {}", direct.len());

    println!("  Session (chunked):");
    let start = Instant::now();
    let mut session = HuiSession::new(utilities.clone());
    for chunk in transactions.chunks(5000) {
        session.count_pass(chunk).unwrap();
    }
    session.finalize_counts(min_util).unwrap();
    for chunk in transactions.chunks(5000) {
        session.build_pass(chunk).unwrap();
    }
    session.finalize_building().unwrap();
    let chunked = session.mine().unwrap();
    let session_time = start.elapsed();
    println!("    Time: {:?}", session_time);
    println!("    Itemsets: {}", chunked.len());

    let overhead = (session_time.as_secs_f64() / direct_time.as_secs_f64() - 1.0) * 100.0;
    println!("    Overhead: {:.1}%", overhead);
}

fn stress_test_low_threshold_with_budget() {
    println!("\n=== Low Threshold Test ===");

    let (transactions, utilities) = generate_transactions(20_000, 100, 20, 0.6);
    let total = total_utility(&transactions, &utilities);
    let sorted_items = prune_and_sort(&transactions, 0.0, &utilities).unwrap();
    let tree = build_tree(&transactions, &sorted_items, &utilities).unwrap();

    for ratio in [0.05, 0.02, 0.01, 0.005, 0.001] {
        let min_util = total * ratio;
        println!("\nTesting min_util = {:.0} ({}%)", min_util, ratio * 100.0);

        let config = MiningConfig::new(min_util).with_max_expansions(2_000_000);
        let start = Instant::now();
        let result = HuiMiner::new(config).mine(&tree).unwrap();
        let max_len = result
            .itemsets
            .iter()
            .map(|found| found.items.len())
            .max()
            .unwrap_or(0);

        println!("  Time: {:?}", start.elapsed());
        println!("  Itemsets: {}", result.len());
        println!("  Max itemset size: {}", max_len);
        if result.truncated {
            println!("  ⚠ Expansion budget exhausted, result truncated");
        }
    }
}

fn main() {
    println!("=== HUI Mining Stress Testing Suite ===");

    stress_test_scaling();
    stress_test_session_vs_direct();
    stress_test_low_threshold_with_budget();

    println!("\n=== Stress Testing Complete ===");
}
