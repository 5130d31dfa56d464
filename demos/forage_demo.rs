// Demonstration: run the slope-foraging environment and evaluate a baseline
// policy.
//
// Run from the repo root:
//   cargo run --example forage_demo -- --policy forager --episodes 20 --steps 500

use std::env;

use slope_foraging::{
    EvaluationMetrics, ForagerPolicy, Policy, RandomPolicy, SlopeConfig, SlopeEnv,
};

fn main() {
    let args: Vec<String> = env::args().collect();
    let policy_name = arg_value(&args, "--policy").unwrap_or("forager");
    let episodes: usize = arg_value(&args, "--episodes")
        .and_then(|s| s.parse().ok())
        .unwrap_or(20);
    let steps: u32 = arg_value(&args, "--steps")
        .and_then(|s| s.parse().ok())
        .unwrap_or(500);
    let seed: u64 = arg_value(&args, "--seed")
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);

    let config = SlopeConfig {
        seed,
        ..SlopeConfig::default()
    };

    let mut env = match SlopeEnv::new(config.clone()) {
        Ok(env) => env,
        Err(err) => {
            eprintln!("Failed to build environment: {}", err);
            std::process::exit(1);
        }
    };

    let mut policy: Box<dyn Policy> = match policy_name {
        "random" => Box::new(RandomPolicy::new()),
        "forager" => Box::new(ForagerPolicy::new(config)),
        other => {
            eprintln!("Unknown --policy '{}'; expected 'forager' or 'random'.", other);
            std::process::exit(2);
        }
    };

    match EvaluationMetrics::evaluate(&mut env, policy.as_mut(), episodes, steps) {
        Ok(metrics) => {
            println!("Policy: {}", policy.name());
            println!("{}", metrics);
        }
        Err(err) => {
            eprintln!("Evaluation failed: {}", err);
            std::process::exit(1);
        }
    }
}

fn arg_value<'a>(args: &'a [String], key: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == key)
        .and_then(|i| args.get(i + 1))
        .map(|s| s.as_str())
}
