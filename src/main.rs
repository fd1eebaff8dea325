use std::hash::{Hash, Hasher};
use std::rc::Rc;
use std::time::Instant;

use anyhow::ensure;
use clap::Parser;
use tracing::{debug, info, Level};

use identity_comparer::IdentitySet;

/// Inserts freshly allocated instances of a type whose own equality claims
/// every instance is the same, into a set keyed by reference identity, and
/// verifies that every instance survives as a distinct member.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Number of instances to allocate and insert.
    #[arg(long, default_value_t = 10_000_000)]
    count: usize,

    /// Log per-chunk progress during insertion.
    #[arg(short, long)]
    verbose: bool,
}

/// Deliberately pathological element: equality always holds and the hash is a
/// constant, so any value-based set would collapse to a single member.
struct DegenerateElement {
    _payload: u64,
}

impl DegenerateElement {
    fn new() -> Self {
        DegenerateElement { _payload: 0 }
    }
}

impl PartialEq for DegenerateElement {
    fn eq(&self, _: &Self) -> bool {
        true
    }
}

impl Eq for DegenerateElement {}

impl Hash for DegenerateElement {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(123);
    }
}

const PROGRESS_CHUNK: usize = 1_000_000;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    info!(count = args.count, "inserting under reference identity");
    let start = Instant::now();

    let mut set = IdentitySet::by_identity_with_capacity(args.count);
    for inserted in 1..=args.count {
        set.add(Rc::new(DegenerateElement::new()));
        if inserted % PROGRESS_CHUNK == 0 {
            debug!(inserted, "progress");
        }
    }

    ensure!(
        set.len() == args.count,
        "identity comparer failed to keep instances distinct: \
         {} members after {} insertions",
        set.len(),
        args.count
    );

    info!(
        members = set.len(),
        elapsed = ?start.elapsed(),
        "every instance remained distinct under reference identity"
    );
    Ok(())
}
