//! walk through the life of a small cluster on a 360 slot ring
//! - five servers join and receive seven keys
//! - a sixth server joins and takes over part of the keys of its successor
//! - the sixth server leaves again and hands its keys back
//!
//! run with `RUST_LOG=debug cargo run --example walkthrough` to follow the migrations

extern crate hashring_store;

use hashring_store::{Error, HashRing, HashSpace, Node, RingSnapshot};
use tracing::warn;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Error> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // a small hash space keeps positions readable, but names collide easily
    let space = HashSpace::bounded(360).unwrap();
    let mut ring: HashRing = HashRing::new(space);

    for name in ["can1", "can2", "can3", "can4", "can6"] {
        if let Err(err) = ring.add_node(Node::new(name)) {
            warn!(%err, "skipping server");
        }
    }

    for (key, value) in [
        ("key1", 5),
        ("key2", 6),
        ("key3", 7),
        ("key4", 8),
        ("key5", 8),
        ("key6", 8),
        ("key7", 8),
    ] {
        ring.add_data(key, value)?;
    }

    println!("# before server insertion");
    print_snapshot(&ring.snapshot());

    match ring.add_node(Node::new("can5")) {
        Ok(_) => {
            println!("\n# after server insertion");
            print_snapshot(&ring.snapshot());

            ring.remove_node("can5")?;
            println!("\n# after server removal");
            print_snapshot(&ring.snapshot());
        }
        Err(err) => warn!(%err, "skipping server"),
    }

    println!("\n# hash ranges");
    for range in ring.key_ranges() {
        println!("{:>3}..={:<3} {}", range.hash_range.start(), range.hash_range.end(), range.node);
    }

    Ok(())
}

fn print_snapshot(snapshot: &RingSnapshot) {
    for node in &snapshot.nodes {
        println!("@{:<3} {} {:?}", node.position, node.name, node.store);
    }
}
