use std::fs;

use clap::Parser;
use nashsolver::{
    BimatrixGame, Strategy, all_equilibria, lemke_howson,
    lcp::{EquilibriumSearch, SearchConfig},
};
use ndarray::Array;
use ndarray_rand::RandomExt;
use ndarray_rand::rand_distr::Uniform;
use num_rational::BigRational;
use rand::{SeedableRng, rngs::StdRng};

/// Solves a random bimatrix game with payoffs drawn uniformly from [0, 10).
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Number of strategies of player 1.
    strategies1: usize,

    /// Number of strategies of player 2.
    strategies2: usize,

    /// Seed of the payoff generator.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Pivot with exact rational arithmetic.
    #[arg(short, long)]
    exact: bool,

    /// Enumerate every equilibrium reachable by Lemke-Howson paths.
    #[arg(short, long)]
    all: bool,

    /// JSON file with the search bounds, for example {"stop_after": 10, "max_depth": 0}.
    #[arg(short, long)]
    config: Option<String>,
}

fn print_strategy(game: &BimatrixGame, eq: &Strategy) {
    println!("Player 1: {}", eq.0);
    println!("Player 2: {}", eq.1);
    let eq_payoff = game.strategy_payoff(eq);
    println!("Payoff: {:.5}, {:.5}", eq_payoff.0, eq_payoff.1);
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let shape = (args.strategies1, args.strategies2);
    let a = Array::random_using(shape, Uniform::new(0., 10.), &mut rng);
    let b = Array::random_using(shape, Uniform::new(0., 10.), &mut rng);

    println!("Payoff for player 1:");
    println!("{a:.3}");
    println!("Payoff for player 2:");
    println!("{b:.3}");

    let game = BimatrixGame::new(a, b)?;

    if !args.all {
        let eq = if args.exact {
            lemke_howson::<BigRational>(&game)?
        } else {
            lemke_howson::<f64>(&game)?
        };
        println!("Equilibrium strategies");
        print_strategy(&game, &eq);
        return Ok(());
    }

    let config: SearchConfig = match args.config {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => SearchConfig::default(),
    };
    let search = EquilibriumSearch::new(config);
    let (strategies, truncated) = if args.exact {
        let found = all_equilibria::<BigRational>(&game, &search)?;
        (found.strategies, found.report.truncated)
    } else {
        let found = all_equilibria::<f64>(&game, &search)?;
        (found.strategies, found.report.truncated)
    };

    println!("{} equilibria found", strategies.len());
    if truncated {
        println!("The search stopped at the configured bounds.");
    }
    for (i, eq) in strategies.iter().enumerate() {
        println!("Equilibrium {}", i + 1);
        print_strategy(&game, eq);
    }
    Ok(())
}
